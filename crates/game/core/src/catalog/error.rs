//! Catalog lookup and validation errors.

use crate::error::{ErrorSeverity, GameError};

use super::ids::{ClassTag, EffectId, ItemId, MonsterId, SkillId};

/// A referenced catalog entry does not exist.
///
/// After a successful [`CatalogBuilder::build`](super::CatalogBuilder::build)
/// this only happens when a caller passes an id that never came from the
/// catalog, so it is classified as an internal error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogMiss {
    #[error("unknown monster '{0}'")]
    Monster(MonsterId),
    #[error("unknown skill '{0}'")]
    Skill(SkillId),
    #[error("unknown effect '{0}'")]
    Effect(EffectId),
    #[error("no ultimate defined for class '{0}'")]
    Ultimate(ClassTag),
    #[error("unknown item '{0}'")]
    Item(ItemId),
}

impl GameError for CatalogMiss {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Monster(_) => "CATALOG_MISS_MONSTER",
            Self::Skill(_) => "CATALOG_MISS_SKILL",
            Self::Effect(_) => "CATALOG_MISS_EFFECT",
            Self::Ultimate(_) => "CATALOG_MISS_ULTIMATE",
            Self::Item(_) => "CATALOG_MISS_ITEM",
        }
    }
}

/// Load-time validation failure.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate {table} id '{id}'")]
    DuplicateId { table: &'static str, id: String },

    #[error("{owner} references unknown effect '{effect}'")]
    UnknownEffect { owner: String, effect: EffectId },

    #[error("{owner} references unknown item '{item}'")]
    UnknownItem { owner: String, item: ItemId },

    #[error("{owner}: probability {value} for '{target}' is outside [0, 1]")]
    ProbabilityOutOfRange {
        owner: String,
        target: String,
        value: f64,
    },

    #[error("effect '{0}' has a zero magnitude for its kind")]
    InvalidMagnitude(EffectId),

    #[error("stacking effect '{0}' must declare max_stacks >= 1 and a non-stacking trigger")]
    InvalidStacking(EffectId),

    #[error("effect '{0}' must last at least one turn")]
    ZeroDuration(EffectId),

    #[error("skill '{skill}' requires zero of item '{item}'")]
    EmptyRequirement { skill: SkillId, item: ItemId },

    #[error("monster '{0}' has zero max HP")]
    ZeroHp(MonsterId),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } => "CATALOG_DUPLICATE_ID",
            Self::UnknownEffect { .. } => "CATALOG_UNKNOWN_EFFECT",
            Self::UnknownItem { .. } => "CATALOG_UNKNOWN_ITEM",
            Self::ProbabilityOutOfRange { .. } => "CATALOG_PROBABILITY_OUT_OF_RANGE",
            Self::InvalidMagnitude(_) => "CATALOG_INVALID_MAGNITUDE",
            Self::InvalidStacking(_) => "CATALOG_INVALID_STACKING",
            Self::ZeroDuration(_) => "CATALOG_ZERO_DURATION",
            Self::EmptyRequirement { .. } => "CATALOG_EMPTY_REQUIREMENT",
            Self::ZeroHp(_) => "CATALOG_ZERO_HP",
        }
    }
}
