use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use crate::core::{MatchupDetail, PickDetails, RankedPick};
use crate::error::{CounterpickError, Result};
use crate::store::MatchupStore;

/// Minimum recorded games for a matchup to count toward any aggregate.
/// Shared by `score`, `rank` and `details` so the three never disagree.
pub const MIN_GAMES: u32 = 10;

/// Default number of ranked picks returned to the caller
pub const DEFAULT_LIMIT: usize = 10;

/// Computes aggregate winrates and ranks counter-pick candidates
pub struct RankingEngine {
    store: Arc<MatchupStore>,
}

impl RankingEngine {
    pub fn new(store: Arc<MatchupStore>) -> Self {
        Self { store }
    }

    /// Mean winrate of `candidate` over the opponents with a qualifying
    /// record (`games >= MIN_GAMES`).
    ///
    /// Returns 0.0 when no opponent qualifies, including the empty roster:
    /// a candidate with no data ranks worst-case rather than being omitted.
    pub fn score(&self, candidate: &str, opponents: &[String]) -> f64 {
        let mut total = 0.0;
        let mut counted = 0u32;

        for opponent in opponents {
            if let Some(record) = self.store.record(candidate, opponent) {
                if record.games >= MIN_GAMES {
                    total += record.winrate;
                    counted += 1;
                }
            }
        }

        if counted == 0 {
            0.0
        } else {
            total / counted as f64
        }
    }

    /// Rank every eligible candidate against the opponent roster.
    ///
    /// Candidates are the universe minus the roster minus `excluded`.
    /// The whole roster is validated before any scoring; unknown entries
    /// abort the request with every offender named.
    pub fn rank(
        &self,
        opponents: &[String],
        limit: usize,
        excluded: &HashSet<String>,
    ) -> Result<Vec<RankedPick>> {
        let invalid: Vec<String> = opponents
            .iter()
            .filter(|name| !self.store.contains(name))
            .cloned()
            .collect();
        if !invalid.is_empty() {
            return Err(CounterpickError::InvalidRoster { names: invalid });
        }

        let mut picks: Vec<RankedPick> = self
            .store
            .characters()
            .iter()
            .filter(|&name| !opponents.contains(name) && !excluded.contains(name.as_str()))
            .map(|name| RankedPick::new(name.clone(), self.score(name, opponents)))
            .collect();

        // Stable sort: ties keep the universe's enumeration order
        picks.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        picks.truncate(limit);

        tracing::debug!(
            "Ranked {} candidates against roster of {}",
            picks.len(),
            opponents.len()
        );

        Ok(picks)
    }

    /// Per-opponent breakdown for one candidate.
    ///
    /// Only qualifying records appear in the breakdown; opponents without
    /// one are omitted, not reported as missing. Best/worst ties go to the
    /// first occurrence in roster order.
    pub fn details(&self, candidate: &str, opponents: &[String]) -> Result<PickDetails> {
        if !self.store.contains(candidate) {
            return Err(CounterpickError::UnknownCharacter(candidate.to_string()));
        }

        let mut matchups = Vec::new();
        let mut total = 0.0;
        let mut counted = 0u32;
        let mut best: Option<MatchupDetail> = None;
        let mut worst: Option<MatchupDetail> = None;

        for opponent in opponents {
            let record = match self.store.record(candidate, opponent) {
                Some(r) if r.games >= MIN_GAMES => r,
                _ => continue,
            };

            let detail = MatchupDetail {
                opponent: opponent.clone(),
                winrate: record.winrate,
                games: record.games,
            };

            total += record.winrate;
            counted += 1;

            if best.as_ref().map_or(true, |b| record.winrate > b.winrate) {
                best = Some(detail.clone());
            }
            if worst.as_ref().map_or(true, |w| record.winrate < w.winrate) {
                worst = Some(detail.clone());
            }

            matchups.push(detail);
        }

        let average_winrate = if counted == 0 {
            0.0
        } else {
            total / counted as f64
        };

        Ok(PickDetails {
            character: candidate.to_string(),
            matchups,
            average_winrate,
            best_matchup: best,
            worst_matchup: worst,
        })
    }
}
