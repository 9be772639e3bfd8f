pub mod matchup;
pub mod report;

pub use matchup::MatchupRecord;
pub use report::{MatchupDetail, PickDetails, RankedPick, Recommendation, RosterResolution};
