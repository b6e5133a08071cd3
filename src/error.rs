//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading a single dictionary source.
///
/// These never reach the player: the lexicon falls back to its built-in
/// list and only logs them.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{0} contains no usable words")]
    Empty(String),
}

/// Rejected multiplayer setups. The player stays on the setup screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("at least {min} players are needed (got {got})")]
    TooFewPlayers { min: usize, got: usize },
    #[error("at most {max} players can play (got {got})")]
    TooManyPlayers { max: usize, got: usize },
    #[error("player name \"{0}\" is used twice")]
    DuplicateName(String),
    #[error("round count must be between 1 and {max} (got {got})")]
    InvalidRounds { max: u32, got: u32 },
}

/// A single failed definition request.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("service returned an error")]
    Service,
}
