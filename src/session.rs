use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory per-user session state: the last resolved opponent roster.
///
/// Passed into the engine as an explicit handle rather than living in a
/// process-wide global. Created on first submission, overwritten on each
/// new one, and gone on restart.
#[derive(Default)]
pub struct SessionStore {
    rosters: RwLock<HashMap<u64, Vec<String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the user's roster with a freshly resolved one
    pub fn set_roster(&self, user_id: u64, roster: Vec<String>) {
        self.rosters.write().unwrap().insert(user_id, roster);
    }

    /// Last resolved roster for the user, empty if none
    pub fn roster(&self, user_id: u64) -> Vec<String> {
        self.rosters
            .read()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Drop the user's session entirely
    pub fn clear(&self, user_id: u64) {
        self.rosters.write().unwrap().remove(&user_id);
    }
}
