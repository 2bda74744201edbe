use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::tier::Tier;

const BUNDLED_LOCATIONS: &str = include_str!("../data/locations.json");

pub type LocationId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LngLat {
    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.longitude) && (-90.0..=90.0).contains(&self.latitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Restaurant,
    Park,
    Transit,
    Office,
    Retail,
}

impl LocationKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Park => "park",
            Self::Transit => "transit",
            Self::Office => "office",
            Self::Retail => "retail",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Safety,
    Hygiene,
    Reputation,
    Trust,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Safety,
        Category::Hygiene,
        Category::Reputation,
        Category::Trust,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Safety => "safety",
            Self::Hygiene => "hygiene",
            Self::Reputation => "reputation",
            Self::Trust => "trust",
        }
    }
}

/// Raw category scores. Tiers are never stored, only derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub safety: f64,
    pub hygiene: f64,
    pub reputation: f64,
    pub trust: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Safety => self.safety,
            Category::Hygiene => self.hygiene,
            Category::Reputation => self.reputation,
            Category::Trust => self.trust,
        }
    }

    /// `(category, score, tier)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64, Tier)> + '_ {
        Category::ALL.into_iter().map(move |category| {
            let score = self.get(category);
            (category, score, Tier::from_score(score))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub id: LocationId,
    pub name: String,
    #[serde(flatten)]
    pub position: LngLat,
    pub overall_score: f64,
    pub categories: CategoryScores,
    pub signal_count: u32,
    pub last_updated: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub kind: LocationKind,
}

impl LocationRecord {
    pub fn tier(&self) -> Tier {
        Tier::from_score(self.overall_score)
    }

    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .address
                .as_deref()
                .is_some_and(|address| address.to_lowercase().contains(needle))
            || self.kind.label().contains(needle)
    }

    fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::once(self.overall_score).chain(self.categories.iter().map(|(_, s, _)| s))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to parse location data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Location data is empty")]
    Empty,

    #[error("Duplicate location id {id}")]
    DuplicateId { id: LocationId },

    #[error("Score {score} for location {id} is outside 0..=10")]
    ScoreOutOfRange { id: LocationId, score: f64 },

    #[error("Coordinate ({longitude}, {latitude}) for location {id} is not a valid WGS84 position")]
    CoordinateOutOfRange {
        id: LocationId,
        longitude: f64,
        latitude: f64,
    },
}

/// The fixed record set. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSet {
    records: Vec<LocationRecord>,
}

impl LocationSet {
    /// Parse and validate the set embedded in the binary.
    pub fn bundled() -> Result<Self, DataError> {
        Self::from_json(BUNDLED_LOCATIONS)
    }

    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let records: Vec<LocationRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    pub fn new(records: Vec<LocationRecord>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::Empty);
        }
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(DataError::DuplicateId { id: record.id });
            }
            if let Some(score) = record.scores().find(|s| !(0.0..=10.0).contains(s)) {
                return Err(DataError::ScoreOutOfRange {
                    id: record.id,
                    score,
                });
            }
            if !record.position.is_valid() {
                return Err(DataError::CoordinateOutOfRange {
                    id: record.id,
                    longitude: record.position.longitude,
                    latitude: record.position.latitude,
                });
            }
        }
        Ok(Self { records })
    }

    pub fn get(&self, id: LocationId) -> Option<&LocationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// First record (in bundled order) matching a case-insensitive substring query.
    pub fn find(&self, query: &str) -> Option<&LocationRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.records.iter().find(|r| r.matches(&needle))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocationRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[LocationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a LocationSet {
    type Item = &'a LocationRecord;
    type IntoIter = std::slice::Iter<'a, LocationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: LocationId, name: &str) -> LocationRecord {
        LocationRecord {
            id,
            name: name.to_string(),
            position: LngLat {
                longitude: -74.0,
                latitude: 40.7,
            },
            overall_score: 7.5,
            categories: CategoryScores {
                safety: 7.0,
                hygiene: 7.0,
                reputation: 7.0,
                trust: 7.0,
            },
            signal_count: 10,
            last_updated: "just now".to_string(),
            address: None,
            description: None,
            kind: LocationKind::Retail,
        }
    }

    #[test]
    fn bundled_set_loads_four_records() {
        let set = LocationSet::bundled().expect("bundled data should be valid");
        assert_eq!(set.len(), 4);
        let park = set.get(3).expect("record 3");
        assert_eq!(park.name, "Riverside Park");
        assert_eq!(park.kind, LocationKind::Park);
        assert_eq!(park.position.longitude, -73.989);
        assert_eq!(park.signal_count, 2156);
    }

    #[test]
    fn category_tiers_follow_breakpoints() {
        let set = LocationSet::bundled().expect("bundled data should be valid");
        let metro = set.get(2).expect("record 2");
        let tiers: Vec<_> = metro.categories.iter().map(|(_, _, t)| t).collect();
        // 5.8 sits above the fair cutoff even though it is the weakest category.
        assert_eq!(tiers, vec![Tier::Fair, Tier::Fair, Tier::Fair, Tier::Fair]);

        let coffee = set.get(1).expect("record 1");
        let trust = coffee
            .categories
            .iter()
            .find(|(c, _, _)| *c == Category::Trust)
            .map(|(_, _, t)| t);
        assert_eq!(trust, Some(Tier::Excellent));
    }

    #[test]
    fn find_matches_name_address_and_kind() {
        let set = LocationSet::bundled().expect("bundled data should be valid");
        assert_eq!(set.find("riverside").map(|r| r.id), Some(3));
        assert_eq!(set.find("7th ave").map(|r| r.id), Some(2));
        assert_eq!(set.find("OFFICE").map(|r| r.id), Some(4));
        assert_eq!(set.find("  coffee  ").map(|r| r.id), Some(1));
        assert!(set.find("doesnotexist").is_none());
        assert!(set.find("   ").is_none());
    }

    #[test]
    fn find_returns_first_match_in_order() {
        let set = LocationSet::bundled().expect("bundled data should be valid");
        // Every bundled address ends in "New York, NY".
        assert_eq!(set.find("new york").map(|r| r.id), Some(1));
    }

    #[test]
    fn rejects_empty_set() {
        assert!(matches!(LocationSet::new(Vec::new()), Err(DataError::Empty)));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = LocationSet::new(vec![record(1, "a"), record(1, "b")]);
        assert!(matches!(result, Err(DataError::DuplicateId { id: 1 })));
    }

    #[test]
    fn rejects_out_of_range_scores() {
        let mut bad = record(7, "bad");
        bad.categories.hygiene = 11.0;
        let result = LocationSet::new(vec![bad]);
        assert!(matches!(
            result,
            Err(DataError::ScoreOutOfRange { id: 7, .. })
        ));
    }

    #[test]
    fn rejects_invalid_coordinates() {
        let mut bad = record(9, "bad");
        bad.position.latitude = 91.0;
        let result = LocationSet::new(vec![bad]);
        assert!(matches!(
            result,
            Err(DataError::CoordinateOutOfRange { id: 9, .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            LocationSet::from_json("{not json"),
            Err(DataError::Parse(_))
        ));
    }
}
