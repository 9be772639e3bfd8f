//! # Counterpick Engine
//!
//! Counter-pick recommendation engine for competitive Unmatched:
//! - Precomputed matchup winrate dataset with eager validation
//! - Partial-name character resolution (exact, then first substring match)
//! - Winrate ranking against an opponent roster
//! - Per-user ban lists persisted in SQLite
//! - Per-user sessions for follow-up detail lookups
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use counterpick_engine::CounterpickEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = CounterpickEngine::new("data/winrates.json", "counterpick.db")?;
//!
//!     let rec = engine.recommend(42, "achilles, medusa", None).await?;
//!     for pick in &rec.picks {
//!         println!("{} - {}", pick.character, pick.score_pct());
//!     }
//!     Ok(())
//! }
//! ```

pub mod bans;
pub mod core;
pub mod engine;
pub mod error;
pub mod ranking;
pub mod resolver;
pub mod session;
pub mod store;

// Re-export primary types
pub use bans::{BanStore, SqliteBanStore};
pub use self::core::{
    MatchupDetail, MatchupRecord, PickDetails, RankedPick, Recommendation, RosterResolution,
};
pub use engine::CounterpickEngine;
pub use error::{CounterpickError, Result};
pub use ranking::{RankingEngine, DEFAULT_LIMIT, MIN_GAMES};
pub use resolver::NameResolver;
pub use session::SessionStore;
pub use store::MatchupStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
