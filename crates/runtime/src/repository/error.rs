//! Error types raised by store implementations.

use thiserror::Error;

/// Errors surfaced by [`PlayerStore`](super::PlayerStore) implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("player store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("player store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
