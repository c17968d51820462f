use std::path::PathBuf;

use thiserror::Error;

/// Requests the controller declines. Callers are expected to ignore these;
/// none of them change round state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("guess {0:?} is not an integer")]
    InvalidGuessFormat(String),
    #[error("guess submitted with no active round")]
    InactiveRoundGuess,
    #[error("difficulty cannot change while a round is active")]
    NoOpDifficultyChange,
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("sound asset {} is unavailable", .0.display())]
    MissingAsset(PathBuf),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
