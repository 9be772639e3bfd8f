pub mod sqlite;

use async_trait::async_trait;

use crate::error::Result;

pub use sqlite::SqliteBanStore;

/// Trait for per-user ban list persistence.
///
/// An absent entry is indistinguishable from an empty list. Calls are
/// individually consistent but no atomicity is assumed across them; any
/// retry policy belongs to the implementation, not the engine.
#[async_trait]
pub trait BanStore: Send + Sync {
    /// All banned characters for a user (empty if none recorded)
    async fn list(&self, user_id: u64) -> Result<Vec<String>>;

    /// Ban a character; returns the new list size.
    /// Banning an already-banned character is a no-op (set semantics).
    async fn add(&self, user_id: u64, character: &str) -> Result<usize>;

    /// Unban a character; returns the new list size
    async fn remove(&self, user_id: u64, character: &str) -> Result<usize>;

    /// Drop the user's entire ban list
    async fn clear(&self, user_id: u64) -> Result<()>;

    /// Whether a character is currently banned for a user
    async fn contains(&self, user_id: u64, character: &str) -> Result<bool>;
}
