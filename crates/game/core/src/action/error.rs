//! Reasons a player action is rejected.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorSeverity, GameError};

/// Why an action is not in the legal set right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum IllegalReason {
    #[error("not enough skill points")]
    InsufficientSp,

    #[error("ultimate energy is not full")]
    UltimateNotReady,

    #[error("skill is not available to this class")]
    WrongClass,

    #[error("required item is missing from the inventory")]
    MissingConsumable,

    #[error("no such skill")]
    UnknownSkill,

    #[error("no such item")]
    UnknownItem,

    #[error("item cannot be used in combat")]
    ItemNotConsumable,

    #[error("another consumable was used too recently")]
    ConsumableOnCooldown,

    #[error("stunned: only waiting or fleeing is possible")]
    Stunned,

    #[error("nothing to wait out")]
    WaitNotNeeded,
}

impl GameError for IllegalReason {
    fn severity(&self) -> ErrorSeverity {
        use IllegalReason::*;
        match self {
            UnknownSkill | UnknownItem | ItemNotConsumable | WrongClass => {
                ErrorSeverity::Validation
            }
            InsufficientSp | UltimateNotReady | MissingConsumable | ConsumableOnCooldown
            | Stunned | WaitNotNeeded => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use IllegalReason::*;
        match self {
            InsufficientSp => "INSUFFICIENT_SP",
            UltimateNotReady => "ULTIMATE_NOT_READY",
            WrongClass => "WRONG_CLASS",
            MissingConsumable => "MISSING_CONSUMABLE",
            UnknownSkill => "UNKNOWN_SKILL",
            UnknownItem => "UNKNOWN_ITEM",
            ItemNotConsumable => "ITEM_NOT_CONSUMABLE",
            ConsumableOnCooldown => "CONSUMABLE_ON_COOLDOWN",
            Stunned => "STUNNED",
            WaitNotNeeded => "WAIT_NOT_NEEDED",
        }
    }
}
