use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::bans::{BanStore, SqliteBanStore};
use crate::core::{PickDetails, Recommendation, RosterResolution};
use crate::error::{CounterpickError, Result};
use crate::ranking::{RankingEngine, DEFAULT_LIMIT};
use crate::resolver::NameResolver;
use crate::session::SessionStore;
use crate::store::MatchupStore;

/// Main counter-pick engine orchestrator.
///
/// Ties the read-only matchup store, the name resolver, the ranking
/// engine, the externally-persisted ban registry and the per-user
/// session store together behind the three front-end entry points.
pub struct CounterpickEngine {
    store: Arc<MatchupStore>,
    resolver: NameResolver,
    ranking: RankingEngine,
    bans: Arc<dyn BanStore>,
    sessions: SessionStore,
}

impl CounterpickEngine {
    /// Create an engine from a dataset file and a SQLite ban database
    pub fn new(dataset_path: impl AsRef<Path>, ban_db_path: &str) -> Result<Self> {
        let store = MatchupStore::load(dataset_path)?;
        let bans = Arc::new(SqliteBanStore::new(ban_db_path)?);
        Ok(Self::with_store(store, bans))
    }

    /// Create an engine from an already-loaded store and any ban backend
    pub fn with_store(store: MatchupStore, bans: Arc<dyn BanStore>) -> Self {
        let store = Arc::new(store);
        Self {
            resolver: NameResolver::new(store.clone()),
            ranking: RankingEngine::new(store.clone()),
            bans,
            sessions: SessionStore::new(),
            store,
        }
    }

    /// Character universe in stable enumeration order
    pub fn characters(&self) -> &[String] {
        self.store.characters()
    }

    /// Resolve a free-text roster without touching any session state
    pub fn resolve_roster(&self, text: &str) -> RosterResolution {
        self.resolver.parse_roster(text)
    }

    /// Resolve a roster submission, remember it as the user's session,
    /// and rank counter-picks with the user's bans excluded.
    pub async fn recommend(
        &self,
        user_id: u64,
        text: &str,
        limit: Option<usize>,
    ) -> Result<Recommendation> {
        let resolution = self.resolver.parse_roster(text);
        if resolution.is_empty() {
            return Err(CounterpickError::NoMatches(text.to_string()));
        }

        self.sessions.set_roster(user_id, resolution.resolved.clone());

        let banned: HashSet<String> = self.bans.list(user_id).await?.into_iter().collect();
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let picks = self.ranking.rank(&resolution.resolved, limit, &banned)?;

        tracing::info!(
            user_id,
            roster = ?resolution.resolved,
            banned = banned.len(),
            picks = picks.len(),
            "Ranked counter-picks"
        );

        Ok(Recommendation {
            roster: resolution.resolved,
            unresolved: resolution.unresolved,
            picks,
        })
    }

    /// Detail breakdown for one candidate against the user's
    /// last-resolved roster (empty breakdown if there is no session).
    pub async fn candidate_details(&self, user_id: u64, name: &str) -> Result<PickDetails> {
        let candidate = self.resolve_one(name)?.to_string();
        let roster = self.sessions.roster(user_id);
        self.ranking.details(&candidate, &roster)
    }

    /// Ban a character for a user; returns the new ban list size.
    /// Accepts partial names, same as roster input.
    pub async fn ban(&self, user_id: u64, name: &str) -> Result<usize> {
        let character = self.resolve_one(name)?.to_string();
        let size = self.bans.add(user_id, &character).await?;
        tracing::debug!(user_id, %character, size, "Character banned");
        Ok(size)
    }

    /// Unban a character for a user; returns the new ban list size
    pub async fn unban(&self, user_id: u64, name: &str) -> Result<usize> {
        let character = self.resolve_one(name)?.to_string();
        let size = self.bans.remove(user_id, &character).await?;
        tracing::debug!(user_id, %character, size, "Character unbanned");
        Ok(size)
    }

    /// The user's current ban list
    pub async fn bans(&self, user_id: u64) -> Result<Vec<String>> {
        self.bans.list(user_id).await
    }

    /// Drop the user's entire ban list
    pub async fn clear_bans(&self, user_id: u64) -> Result<()> {
        self.bans.clear(user_id).await
    }

    /// Whether a character is banned for a user
    pub async fn is_banned(&self, user_id: u64, name: &str) -> Result<bool> {
        let character = self.resolve_one(name)?.to_string();
        self.bans.contains(user_id, &character).await
    }

    /// Forget the user's last-resolved roster
    pub fn clear_session(&self, user_id: u64) {
        self.sessions.clear(user_id);
    }

    fn resolve_one<'a>(&'a self, name: &str) -> Result<&'a str> {
        self.resolver
            .resolve(name)
            .ok_or_else(|| CounterpickError::UnknownCharacter(name.to_string()))
    }
}
