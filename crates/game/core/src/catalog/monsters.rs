use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::{ItemId, MonsterId};
use super::skills::{DamageType, EffectChance};

/// Static description of a monster, cloned into every encounter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub id: MonsterId,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
    pub hp: u32,
    pub attack: u32,
    #[serde(default)]
    pub defense: u32,
    pub toughness: u32,
    pub weakness: DamageType,
    pub xp_reward: u64,
    pub gold_reward: u64,
    /// Item id to independent drop probability in `[0, 1]`.
    #[serde(default)]
    pub loot: BTreeMap<ItemId, f64>,
    /// Weighted moves; empty means the plain attack every turn.
    #[serde(default)]
    pub skills: Vec<MonsterSkill>,
}

fn default_level() -> u32 {
    1
}

/// One move in a monster's repertoire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterSkill {
    pub name: String,
    pub weight: u32,
    /// Scales the plain attack roll (100 = unchanged).
    #[serde(default = "default_damage_percent")]
    pub damage_percent: u32,
    /// Effects applied to the player.
    #[serde(default)]
    pub effects: Vec<EffectChance>,
}

fn default_damage_percent() -> u32 {
    100
}
