//! Status effect definitions.
//!
//! Effects form a closed variant space. The variant decides both what the
//! effect does when it ticks and how it behaves when applied a second time:
//! [`EffectKind::Stacking`] accumulates stacks, everything else refreshes.

use serde::{Deserialize, Serialize};

use super::ids::EffectId;

/// Stat read by damage formulas while a modifier is active.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum StatKind {
    /// Scales the attacker's attack stat.
    Attack,
    /// Scales damage taken by the holder (positive values reduce it).
    Defense,
    /// Adds percentage points to critical chance.
    CritChance,
}

/// What an effect does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Lose `percent` of max HP at the start of each of the holder's turns.
    DamageOverTime { percent: u32 },
    /// Recover `percent` of max HP at the start of each of the holder's turns.
    HealOverTime { percent: u32 },
    /// The holder loses its next action.
    SkipTurn,
    /// Signed percentage modifier on one stat.
    StatModifier { stat: StatKind, percent: i32 },
    /// Counter that fires `trigger` on the holder once `max_stacks` is reached,
    /// then clears itself.
    Stacking { max_stacks: u32, trigger: EffectId },
}

impl EffectKind {
    /// Numeric payload stored on an [`EffectInstance`](crate::state::EffectInstance).
    pub fn magnitude(&self) -> i32 {
        match self {
            Self::DamageOverTime { percent } | Self::HealOverTime { percent } => {
                i32::try_from(*percent).unwrap_or(i32::MAX)
            }
            Self::StatModifier { percent, .. } => *percent,
            Self::SkipTurn | Self::Stacking { .. } => 0,
        }
    }

    pub fn reapply(&self) -> Reapply<'_> {
        match self {
            Self::Stacking {
                max_stacks,
                trigger,
            } => Reapply::Stack {
                max_stacks: *max_stacks,
                trigger,
            },
            _ => Reapply::Refresh,
        }
    }
}

/// Reapplication policy derived from the effect kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reapply<'a> {
    /// Replace the instance with a full-duration copy.
    Refresh,
    /// Increment the stack count up to `max_stacks`.
    Stack {
        max_stacks: u32,
        trigger: &'a EffectId,
    },
}

/// Dispel grouping.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum EffectCategory {
    #[default]
    Buff,
    Debuff,
    /// Removed by skills flagged `remove_debuffs`.
    Curse,
}

impl EffectCategory {
    pub fn is_harmful(&self) -> bool {
        matches!(self, Self::Debuff | Self::Curse)
    }
}

/// Catalog entry for a status effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDefinition {
    pub id: EffectId,
    pub name: String,
    pub kind: EffectKind,
    /// Turns the effect lasts from (re)application.
    pub duration: u32,
    #[serde(default)]
    pub category: EffectCategory,
}
