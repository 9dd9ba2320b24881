//! Skill and ultimate definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::{ClassTag, EffectId, ItemId, SkillId};

/// Damage type tag. A monster takes toughness damage only from its weakness.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum DamageType {
    Physical,
    Fire,
    Ice,
    Lightning,
    Wind,
    Magic,
    Temporal,
    Divine,
    Poison,
    Dark,
}

/// An effect together with the probability it lands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectChance {
    pub effect: EffectId,
    /// Independent Bernoulli probability in `[0, 1]`.
    pub chance: f64,
}

impl EffectChance {
    pub fn certain(effect: impl Into<EffectId>) -> Self {
        Self {
            effect: effect.into(),
            chance: 1.0,
        }
    }
}

/// Catalog entry for a class skill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    /// Skill points spent on use.
    pub cost: u32,
    #[serde(default)]
    pub damage: Option<u32>,
    pub damage_type: DamageType,
    #[serde(default)]
    pub toughness_damage: u32,
    /// Ultimate energy granted to the caster.
    #[serde(default)]
    pub ultimate_gain: u32,
    #[serde(default)]
    pub target_effects: Vec<EffectChance>,
    #[serde(default)]
    pub self_effects: Vec<EffectChance>,
    /// Ratio in `[0, 1]`; reported in the log, not subtracted from damage.
    #[serde(default)]
    pub armor_penetration: Option<f64>,
    #[serde(default)]
    pub heal: Option<u32>,
    /// Strips every curse from the caster.
    #[serde(default)]
    pub remove_debuffs: bool,
    /// Classes allowed to use the skill.
    pub classes: Vec<ClassTag>,
    /// Items consumed on use; the skill is unavailable unless all are held.
    #[serde(default)]
    pub requires: BTreeMap<ItemId, u32>,
}

impl SkillDefinition {
    pub fn allows(&self, class: &ClassTag) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Class ultimate, unlocked at full ultimate energy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UltimateDefinition {
    pub class: ClassTag,
    pub name: String,
    #[serde(default)]
    pub damage: Option<u32>,
    pub damage_type: DamageType,
    #[serde(default)]
    pub toughness_damage: u32,
    #[serde(default)]
    pub heal: Option<u32>,
    #[serde(default)]
    pub target_effects: Vec<EffectChance>,
    #[serde(default)]
    pub self_effects: Vec<EffectChance>,
}
