use serde::{Deserialize, Serialize};

/// Historical result of one ordered character pair (A vs B).
///
/// Matchups are asymmetric: the record for (A, B) is independent of (B, A)
/// and the two win fractions need not sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MatchupRecord {
    /// Number of recorded games for this pair
    pub games: u32,

    /// A's win fraction against B, in [0, 1].
    /// The scraper historically emitted this field as `percent`.
    #[serde(alias = "percent")]
    pub winrate: f64,
}

impl MatchupRecord {
    pub fn new(games: u32, winrate: f64) -> Self {
        Self { games, winrate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_winrate_field() {
        let rec: MatchupRecord = serde_json::from_str(r#"{"games": 20, "winrate": 0.7}"#).unwrap();
        assert_eq!(rec, MatchupRecord::new(20, 0.7));
    }

    #[test]
    fn test_deserialize_legacy_percent_alias() {
        let rec: MatchupRecord = serde_json::from_str(r#"{"games": 12, "percent": 0.55}"#).unwrap();
        assert_eq!(rec, MatchupRecord::new(12, 0.55));
    }

    #[test]
    fn test_missing_field_is_an_error() {
        assert!(serde_json::from_str::<MatchupRecord>(r#"{"games": 20}"#).is_err());
        assert!(serde_json::from_str::<MatchupRecord>(r#"{"winrate": 0.5}"#).is_err());
    }
}
