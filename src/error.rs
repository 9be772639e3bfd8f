use thiserror::Error;

/// Main error type for the counterpick engine
#[derive(Error, Debug)]
pub enum CounterpickError {
    /// Dataset could not be loaded or failed validation (fatal at startup)
    #[error("Failed to load matchup dataset: {0}")]
    Load(String),

    /// Roster contains characters outside the dataset universe
    #[error("Unknown characters in opponent roster: {}", names.join(", "))]
    InvalidRoster { names: Vec<String> },

    /// Single character lookup outside the dataset universe
    #[error("Unknown character: {0}")]
    UnknownCharacter(String),

    /// No token in a roster submission resolved to a character
    #[error("No characters recognized in input: {0:?}")]
    NoMatches(String),

    /// Ban store database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for CounterpickError {
    fn from(s: String) -> Self {
        CounterpickError::Other(s)
    }
}

impl From<&str> for CounterpickError {
    fn from(s: &str) -> Self {
        CounterpickError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CounterpickError>;
