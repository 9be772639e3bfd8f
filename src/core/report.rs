use serde::{Deserialize, Serialize};

/// One ranked counter-pick candidate with its aggregate winrate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedPick {
    pub character: String,

    /// Mean winrate against the qualifying opponents, in [0, 1].
    /// 0.0 when no opponent had enough recorded games.
    pub score: f64,
}

impl RankedPick {
    pub fn new(character: impl Into<String>, score: f64) -> Self {
        Self {
            character: character.into(),
            score,
        }
    }

    /// Score formatted as a percentage for display (e.g. "57.3%")
    pub fn score_pct(&self) -> String {
        format!("{:.1}%", self.score * 100.0)
    }
}

/// Single opponent line in a detail report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchupDetail {
    pub opponent: String,
    pub winrate: f64,
    pub games: u32,
}

/// Full breakdown of one candidate against an opponent roster.
///
/// Opponents without a qualifying record are omitted from `matchups`
/// entirely rather than reported as missing; `matchups` keeps the
/// roster's iteration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickDetails {
    pub character: String,
    pub matchups: Vec<MatchupDetail>,
    pub average_winrate: f64,
    pub best_matchup: Option<MatchupDetail>,
    pub worst_matchup: Option<MatchupDetail>,
}

/// Outcome of resolving a free-text roster submission
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RosterResolution {
    /// Canonical names in token order; duplicates preserved
    pub resolved: Vec<String>,

    /// Raw token text of everything that did not resolve, in order
    pub unresolved: Vec<String>,
}

impl RosterResolution {
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// Response to a roster submission: the resolved roster plus ranked picks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Canonical opponent roster the ranking was computed against
    pub roster: Vec<String>,

    /// Tokens from the submission that did not resolve to any character
    #[serde(default)]
    pub unresolved: Vec<String>,

    /// Candidates sorted by descending aggregate winrate
    pub picks: Vec<RankedPick>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_pct_formatting() {
        let pick = RankedPick::new("Achilles", 0.5734);
        assert_eq!(pick.score_pct(), "57.3%");

        let zero = RankedPick::new("Alice", 0.0);
        assert_eq!(zero.score_pct(), "0.0%");
    }

    #[test]
    fn test_resolution_is_empty() {
        let mut res = RosterResolution::default();
        assert!(res.is_empty());

        res.unresolved.push("garbage".to_string());
        assert!(res.is_empty());

        res.resolved.push("Medusa".to_string());
        assert!(!res.is_empty());
    }

    #[test]
    fn test_recommendation_serialization() {
        let rec = Recommendation {
            roster: vec!["Achilles".to_string()],
            unresolved: vec![],
            picks: vec![RankedPick::new("Medusa", 0.61)],
        };
        let json = serde_json::to_string(&rec).unwrap();
        let back: Recommendation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.picks, rec.picks);
        assert_eq!(back.roster, rec.roster);
    }
}
