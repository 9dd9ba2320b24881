//! Player actions and their legality.
//!
//! - `CombatAction`: what the player asks for
//! - [`validate`]: the single legality check shared by listing and applying
//! - [`legal_actions`]: every candidate action that passes [`validate`]
mod available;
mod error;
mod validate;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use available::{LegalAction, legal_actions};
pub use error::IllegalReason;
pub use validate::validate;

use crate::catalog::{ItemId, SkillId};

/// An action the player can submit on their turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CombatAction {
    BasicAttack,
    UseSkill(SkillId),
    UseUltimate,
    UseConsumable(ItemId),
    Flee,
    /// Spend a stunned turn.
    Wait,
}

impl CombatAction {
    /// Actions that hand the turn to the monster when they resolve.
    pub fn passes_turn(&self) -> bool {
        matches!(self, Self::BasicAttack | Self::UseSkill(_) | Self::Wait)
    }
}

/// Stable identifier, e.g. `basic_attack` or `use_skill:fireball`.
impl fmt::Display for CombatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BasicAttack => f.write_str("basic_attack"),
            Self::UseSkill(id) => write!(f, "use_skill:{id}"),
            Self::UseUltimate => f.write_str("use_ultimate"),
            Self::UseConsumable(id) => write!(f, "use_consumable:{id}"),
            Self::Flee => f.write_str("flee"),
            Self::Wait => f.write_str("wait"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised action '{0}'")]
pub struct ParseActionError(String);

impl FromStr for CombatAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s.split_once(':') {
            None => match s {
                "basic_attack" => Self::BasicAttack,
                "use_ultimate" => Self::UseUltimate,
                "flee" => Self::Flee,
                "wait" => Self::Wait,
                _ => return Err(ParseActionError(s.to_owned())),
            },
            Some(("use_skill", id)) if !id.is_empty() => Self::UseSkill(id.into()),
            Some(("use_consumable", id)) if !id.is_empty() => Self::UseConsumable(id.into()),
            Some(_) => return Err(ParseActionError(s.to_owned())),
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_back() {
        for action in [
            CombatAction::BasicAttack,
            CombatAction::UseSkill("explosive_shot".into()),
            CombatAction::UseUltimate,
            CombatAction::UseConsumable("health_potion".into()),
            CombatAction::Flee,
            CombatAction::Wait,
        ] {
            assert_eq!(action.to_string().parse::<CombatAction>(), Ok(action));
        }
        assert!("use_skill:".parse::<CombatAction>().is_err());
        assert!("dance".parse::<CombatAction>().is_err());
    }

    #[test]
    fn only_turn_ending_actions_pass() {
        assert!(CombatAction::BasicAttack.passes_turn());
        assert!(CombatAction::UseSkill("x".into()).passes_turn());
        assert!(!CombatAction::UseUltimate.passes_turn());
        assert!(!CombatAction::UseConsumable("x".into()).passes_turn());
        assert!(!CombatAction::Flee.passes_turn());
    }
}
