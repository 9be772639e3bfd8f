use std::sync::Arc;

use crate::core::RosterResolution;
use crate::store::MatchupStore;

/// Maps user-supplied partial or garbled names to canonical characters.
///
/// Matching is two-phase: an exact case-folded match always wins, otherwise
/// the first character (in the store's enumeration order) whose case-folded
/// name contains the query as a substring is returned. The first-in-order
/// tie-break is a compatibility guarantee; do not replace it with
/// shortest-match or similarity scoring.
pub struct NameResolver {
    store: Arc<MatchupStore>,
}

impl NameResolver {
    pub fn new(store: Arc<MatchupStore>) -> Self {
        Self { store }
    }

    /// Resolve a single name fragment to a canonical character
    pub fn resolve(&self, query: &str) -> Option<&str> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        // Exact match first: "Alice" must not land on "Alice in Chains"
        // just because something else enumerates earlier.
        for name in self.store.characters() {
            if name.to_lowercase() == normalized {
                return Some(name);
            }
        }

        self.store
            .characters()
            .iter()
            .find(|name| name.to_lowercase().contains(&normalized))
            .map(|name| name.as_str())
    }

    /// Resolve a free-text roster submission token by token.
    ///
    /// Splits on commas when any comma is present, otherwise on whitespace.
    /// Resolved names keep token order (duplicates included); tokens that
    /// match nothing are returned verbatim in `unresolved` rather than
    /// failing the whole submission.
    pub fn parse_roster(&self, text: &str) -> RosterResolution {
        let tokens: Vec<&str> = if text.contains(',') {
            text.split(',').map(str::trim).collect()
        } else {
            text.split_whitespace().collect()
        };

        let mut resolution = RosterResolution::default();
        for token in tokens {
            if token.is_empty() {
                continue;
            }
            match self.resolve(token) {
                Some(name) => resolution.resolved.push(name.to_string()),
                None => resolution.unresolved.push(token.to_string()),
            }
        }
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> NameResolver {
        let store = MatchupStore::from_json(
            r#"{
                "Achilles": {},
                "Alice": {},
                "Bigfoot": {},
                "Bloody Mary": {},
                "Bruce Lee": {},
                "T. Rex": {},
                "Tomoe Gozen": {}
            }"#,
        )
        .unwrap();
        NameResolver::new(Arc::new(store))
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let r = resolver();
        assert_eq!(r.resolve("ACHILLES"), Some("Achilles"));
        assert_eq!(r.resolve("achilles"), Some("Achilles"));
        assert_eq!(r.resolve("  Alice  "), Some("Alice"));
    }

    #[test]
    fn test_substring_match() {
        let r = resolver();
        assert_eq!(r.resolve("ach"), Some("Achilles"));
        assert_eq!(r.resolve("gozen"), Some("Tomoe Gozen"));
        assert_eq!(r.resolve("t."), Some("T. Rex"));
    }

    #[test]
    fn test_substring_tie_break_is_first_in_order() {
        let r = resolver();
        // "b" matches Bigfoot, Bloody Mary and Bruce Lee; the first
        // in enumeration order wins, deterministically.
        assert_eq!(r.resolve("b"), Some("Bigfoot"));
        for _ in 0..10 {
            assert_eq!(r.resolve("b"), Some("Bigfoot"));
        }
    }

    #[test]
    fn test_exact_beats_earlier_substring() {
        let store = MatchupStore::from_json(
            r#"{"Alice in Chains": {}, "Alice": {}}"#,
        )
        .unwrap();
        let r = NameResolver::new(Arc::new(store));
        assert_eq!(r.resolve("alice"), Some("Alice"));
    }

    #[test]
    fn test_empty_and_whitespace_queries() {
        let r = resolver();
        assert_eq!(r.resolve(""), None);
        assert_eq!(r.resolve("   "), None);
        assert_eq!(r.resolve("zzz"), None);
    }

    #[test]
    fn test_parse_roster_comma_separated() {
        let r = resolver();
        let res = r.parse_roster("Achilles, alice, gozen");
        assert_eq!(res.resolved, vec!["Achilles", "Alice", "Tomoe Gozen"]);
        assert!(res.unresolved.is_empty());
    }

    #[test]
    fn test_parse_roster_whitespace_separated() {
        let r = resolver();
        let res = r.parse_roster("ach alice bigf");
        assert_eq!(res.resolved, vec!["Achilles", "Alice", "Bigfoot"]);
    }

    #[test]
    fn test_parse_roster_partitions_unresolved() {
        let r = resolver();
        let res = r.parse_roster("ach, zzz, gozen, qqq");
        assert_eq!(res.resolved, vec!["Achilles", "Tomoe Gozen"]);
        assert_eq!(res.unresolved, vec!["zzz", "qqq"]);
    }

    #[test]
    fn test_parse_roster_preserves_duplicates() {
        let r = resolver();
        let res = r.parse_roster("alice alice");
        assert_eq!(res.resolved, vec!["Alice", "Alice"]);
    }

    #[test]
    fn test_parse_roster_skips_empty_tokens() {
        let r = resolver();
        let res = r.parse_roster("alice,, ,ach");
        assert_eq!(res.resolved, vec!["Alice", "Achilles"]);
        assert!(res.unresolved.is_empty());
    }
}
