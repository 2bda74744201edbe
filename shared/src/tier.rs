use serde::{Deserialize, Serialize};

pub const EXCELLENT_MIN: f64 = 8.5;
pub const GOOD_MIN: f64 = 7.0;
pub const FAIR_MIN: f64 = 5.5;

/// Qualitative bucket for a 0..10 score. Marker, badge, card accent and legend
/// all read their color from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Excellent,
    Good,
    Fair,
    Caution,
}

impl Tier {
    /// Best to worst, the order the legend lists them in.
    pub const ALL: [Tier; 4] = [Tier::Excellent, Tier::Good, Tier::Fair, Tier::Caution];

    /// Classify a score. NaN falls through to `Caution`.
    pub fn from_score(score: f64) -> Self {
        if score >= EXCELLENT_MIN {
            Self::Excellent
        } else if score >= GOOD_MIN {
            Self::Good
        } else if score >= FAIR_MIN {
            Self::Fair
        } else {
            Self::Caution
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Caution => "Caution",
        }
    }

    /// Lowercase key, also the suffix of the `safety-*` badge classes.
    pub fn key(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Caution => "caution",
        }
    }

    pub fn legend_label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent (8.5+)",
            Self::Good => "Good (7.0+)",
            Self::Fair => "Fair (5.5+)",
            Self::Caution => "Caution (<5.5)",
        }
    }

    /// Tailwind 600-shade for the tier.
    pub fn color_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Excellent => (0x16, 0xa3, 0x4a),
            Self::Good => (0x25, 0x63, 0xeb),
            Self::Fair => (0xca, 0x8a, 0x04),
            Self::Caution => (0xdc, 0x26, 0x26),
        }
    }

    pub fn color_hex(self) -> String {
        let (r, g, b) = self.color_rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn badge_class(self) -> String {
        format!("safety-{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::Tier;

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(Tier::from_score(8.5), Tier::Excellent);
        assert_eq!(Tier::from_score(8.4999), Tier::Good);
        assert_eq!(Tier::from_score(7.0), Tier::Good);
        assert_eq!(Tier::from_score(6.9999), Tier::Fair);
        assert_eq!(Tier::from_score(5.5), Tier::Fair);
        assert_eq!(Tier::from_score(5.4999), Tier::Caution);
    }

    #[test]
    fn extremes() {
        assert_eq!(Tier::from_score(10.0), Tier::Excellent);
        assert_eq!(Tier::from_score(0.0), Tier::Caution);
        assert_eq!(Tier::from_score(f64::NAN), Tier::Caution);
    }

    #[test]
    fn never_improves_as_score_drops() {
        let mut previous = Tier::from_score(10.0);
        for step in (0..=1000).rev() {
            let tier = Tier::from_score(step as f64 / 100.0);
            assert!(tier >= previous, "tier improved at {}", step as f64 / 100.0);
            previous = tier;
        }
    }

    #[test]
    fn hex_matches_legend_palette() {
        assert_eq!(Tier::Excellent.color_hex(), "#16a34a");
        assert_eq!(Tier::Good.color_hex(), "#2563eb");
        assert_eq!(Tier::Fair.color_hex(), "#ca8a04");
        assert_eq!(Tier::Caution.color_hex(), "#dc2626");
    }

    #[test]
    fn badge_class_uses_key() {
        assert_eq!(Tier::Fair.badge_class(), "safety-fair");
    }
}
