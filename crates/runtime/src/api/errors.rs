//! Error types surfaced by the runtime API.
//!
//! [`CombatError`] is what a front-end sees for a player request; every
//! variant carries a stable machine tag. [`RuntimeError`] covers assembling
//! and shutting down the runtime itself.
use thiserror::Error;

use combat_core::{CatalogMiss, ErrorSeverity, GameError, IllegalReason, ResolveError};

pub use crate::repository::StoreError;

pub type Result<T> = std::result::Result<T, CombatError>;

/// Failures of a player-facing combat request.
#[derive(Debug, Error)]
pub enum CombatError {
    #[error("player has no character")]
    NoCharacter,

    #[error("player is already in combat")]
    AlreadyInCombat,

    #[error("player is not in combat")]
    NotInCombat,

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("illegal action: {0}")]
    IllegalAction(IllegalReason),

    #[error(transparent)]
    CatalogMiss(#[from] CatalogMiss),

    #[error("player store failure: {0}")]
    StoreFailure(#[from] StoreError),

    /// The resolver refused a step that the session layer considered valid.
    #[error("resolver failure: {0}")]
    Resolver(ResolveError),
}

impl CombatError {
    /// Stable machine tag for front-ends.
    pub fn tag(&self) -> &'static str {
        self.error_code()
    }
}

impl From<ResolveError> for CombatError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::IllegalAction(reason) => Self::IllegalAction(reason),
            ResolveError::NotPlayerTurn => Self::NotYourTurn,
            ResolveError::CombatOver => Self::NotInCombat,
            ResolveError::CatalogMiss(miss) => Self::CatalogMiss(miss),
            other @ (ResolveError::NotMonsterTurn | ResolveError::Invariant { .. }) => {
                Self::Resolver(other)
            }
        }
    }
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoCharacter | Self::AlreadyInCombat | Self::NotInCombat => {
                ErrorSeverity::Validation
            }
            Self::NotYourTurn => ErrorSeverity::Recoverable,
            Self::IllegalAction(reason) => reason.severity(),
            Self::CatalogMiss(miss) => miss.severity(),
            Self::StoreFailure(_) => ErrorSeverity::Recoverable,
            Self::Resolver(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoCharacter => "NO_CHARACTER",
            Self::AlreadyInCombat => "ALREADY_IN_COMBAT",
            Self::NotInCombat => "NOT_IN_COMBAT",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::IllegalAction(_) => "ILLEGAL_ACTION",
            Self::CatalogMiss(_) => "CATALOG_MISS",
            Self::StoreFailure(_) => "STORE_FAILURE",
            Self::Resolver(_) => "RESOLVER_FAILURE",
        }
    }
}

/// Failures while assembling or stopping the runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a player store to be configured before building")]
    MissingStore,

    #[error("failed to load the built-in catalog: {0}")]
    Content(String),

    #[error("sweeper worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
