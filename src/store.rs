use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::core::MatchupRecord;
use crate::error::{CounterpickError, Result};

/// Read-only store for the precomputed winrate dataset.
///
/// The backing document maps character → opponent → record:
/// ```json
/// {
///     "Achilles": {
///         "Medusa": { "games": 34, "winrate": 0.62 },
///         "Alice":  { "games": 21, "winrate": 0.48 }
///     }
/// }
/// ```
/// The character universe is fixed at load time from the top-level keys,
/// in document order. That order is the stable enumeration order used by
/// name resolution and ranking tie-breaks, so it must not be re-sorted.
///
/// All validation happens here, eagerly: a malformed document or any
/// record with `winrate` outside [0, 1] is rejected before the store is
/// ever queried.
#[derive(Debug)]
pub struct MatchupStore {
    names: Vec<String>,
    table: HashMap<String, HashMap<String, MatchupRecord>>,
}

impl MatchupStore {
    /// Load and validate the dataset from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CounterpickError::Load(format!("{}: {}", path.display(), e)))?;

        let store = Self::from_json(&raw)?;
        tracing::info!(
            "Loaded matchup dataset: {} characters from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Parse and validate a dataset from a JSON string
    pub fn from_json(raw: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(raw)
            .map_err(|e| CounterpickError::Load(format!("invalid JSON: {}", e)))?;

        let root = doc
            .as_object()
            .ok_or_else(|| CounterpickError::Load("top level must be an object".to_string()))?;

        if root.is_empty() {
            return Err(CounterpickError::Load(
                "dataset contains no characters".to_string(),
            ));
        }

        let mut names = Vec::with_capacity(root.len());
        let mut table = HashMap::with_capacity(root.len());

        // serde_json's preserve_order feature keeps `root` in document
        // order, which becomes the stable enumeration order.
        for (name, opponents) in root {
            let opponents = opponents.as_object().ok_or_else(|| {
                CounterpickError::Load(format!("matchups for '{}' must be an object", name))
            })?;

            let mut records = HashMap::with_capacity(opponents.len());
            for (opponent, value) in opponents {
                let record: MatchupRecord =
                    serde_json::from_value(value.clone()).map_err(|e| {
                        CounterpickError::Load(format!(
                            "invalid record for '{}' vs '{}': {}",
                            name, opponent, e
                        ))
                    })?;

                if !(0.0..=1.0).contains(&record.winrate) {
                    return Err(CounterpickError::Load(format!(
                        "winrate out of range for '{}' vs '{}': {}",
                        name, opponent, record.winrate
                    )));
                }

                records.insert(opponent.clone(), record);
            }

            names.push(name.clone());
            table.insert(name.clone(), records);
        }

        Ok(Self { names, table })
    }

    /// Record for the ordered pair (a, b), if one exists
    pub fn record(&self, a: &str, b: &str) -> Option<&MatchupRecord> {
        self.table.get(a)?.get(b)
    }

    /// Character universe in stable enumeration order
    pub fn characters(&self) -> &[String] {
        &self.names
    }

    /// Whether `name` is a canonical character in the universe
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MatchupStore {
        MatchupStore::from_json(
            r#"{
                "Achilles": {
                    "Medusa": { "games": 34, "winrate": 0.62 },
                    "Alice":  { "games": 5,  "winrate": 0.9 }
                },
                "Medusa": {
                    "Achilles": { "games": 34, "winrate": 0.38 }
                },
                "Alice": {}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_universe_keeps_document_order() {
        let store = sample();
        assert_eq!(store.characters(), &["Achilles", "Medusa", "Alice"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_record_lookup() {
        let store = sample();
        let rec = store.record("Achilles", "Medusa").unwrap();
        assert_eq!(rec.games, 34);
        assert_eq!(rec.winrate, 0.62);

        // Asymmetric: the reverse pair is a distinct record
        let rev = store.record("Medusa", "Achilles").unwrap();
        assert_eq!(rev.winrate, 0.38);

        assert!(store.record("Alice", "Medusa").is_none());
        assert!(store.record("Nobody", "Medusa").is_none());
    }

    #[test]
    fn test_rejects_winrate_out_of_range() {
        let err = MatchupStore::from_json(
            r#"{"A": {"B": {"games": 10, "winrate": 1.5}}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("winrate out of range"));
    }

    #[test]
    fn test_rejects_negative_games() {
        let result = MatchupStore::from_json(
            r#"{"A": {"B": {"games": -3, "winrate": 0.5}}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_missing_fields() {
        let result = MatchupStore::from_json(r#"{"A": {"B": {"games": 10}}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_malformed_document() {
        assert!(MatchupStore::from_json("not json").is_err());
        assert!(MatchupStore::from_json("[1, 2, 3]").is_err());
        assert!(MatchupStore::from_json(r#"{"A": 42}"#).is_err());
        assert!(MatchupStore::from_json("{}").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = MatchupStore::load("/nonexistent/winrates.json").unwrap_err();
        assert!(matches!(err, CounterpickError::Load(_)));
    }
}
