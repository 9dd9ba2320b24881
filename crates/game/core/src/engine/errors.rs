//! Error types for the resolver pipeline.

use crate::action::IllegalReason;
use crate::catalog::CatalogMiss;
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

impl std::fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced while resolving a step of an encounter.
///
/// On any error the combat state is left exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("illegal action: {0}")]
    IllegalAction(#[from] IllegalReason),

    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("it is not the monster's turn")]
    NotMonsterTurn,

    #[error("the encounter is already over")]
    CombatOver,

    #[error(transparent)]
    CatalogMiss(#[from] CatalogMiss),

    #[error("{phase} broke an invariant: {what}")]
    Invariant {
        phase: TransitionPhase,
        what: &'static str,
    },
}

impl GameError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IllegalAction(reason) => reason.severity(),
            Self::NotPlayerTurn | Self::NotMonsterTurn => ErrorSeverity::Recoverable,
            Self::CombatOver => ErrorSeverity::Validation,
            Self::CatalogMiss(miss) => miss.severity(),
            Self::Invariant { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IllegalAction(reason) => reason.error_code(),
            Self::NotPlayerTurn => "NOT_PLAYER_TURN",
            Self::NotMonsterTurn => "NOT_MONSTER_TURN",
            Self::CombatOver => "COMBAT_OVER",
            Self::CatalogMiss(miss) => miss.error_code(),
            Self::Invariant { .. } => "RESOLVER_INVARIANT",
        }
    }
}
