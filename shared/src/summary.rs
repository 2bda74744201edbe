use crate::location::LocationSet;
use crate::tier::Tier;

/// Quick stats shown under the search bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregates {
    pub average_score: f64,
    pub total_signals: u64,
    pub location_count: usize,
}

impl Aggregates {
    pub fn from_set(set: &LocationSet) -> Self {
        let location_count = set.len();
        let total: f64 = set.iter().map(|r| r.overall_score).sum();
        let average_score = if location_count == 0 {
            0.0
        } else {
            total / location_count as f64
        };
        let total_signals = set.iter().map(|r| u64::from(r.signal_count)).sum();
        Self {
            average_score,
            total_signals,
            location_count,
        }
    }

    /// Average rounded to one decimal for display.
    pub fn average_display(&self) -> String {
        format!("{:.1}", self.average_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub tier: Tier,
    pub count: usize,
}

/// One entry per tier, best first, counting records by overall score.
pub fn legend(set: &LocationSet) -> Vec<LegendEntry> {
    Tier::ALL
        .into_iter()
        .map(|tier| LegendEntry {
            tier,
            count: set.iter().filter(|r| r.tier() == tier).count(),
        })
        .collect()
}
