//! Persistent player record.
//!
//! This is the document the Player Store loads and commits. Combat clones it
//! at encounter start, mutates only the clone, and hands the clone back on
//! commit. Fields the core does not interpret (auction listings, faction,
//! achievements, ...) ride along in the `extra` maps untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::{ClassTag, EffectId, ItemId};

use super::effects::EffectInstance;

/// Unknown JSON fields carried verbatim through load and commit.
pub type Extension = Map<String, Value>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub class: ClassTag,
    pub level: u32,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub gold: u64,
    #[serde(default)]
    pub stats: CoreStats,
    #[serde(default)]
    pub derived_stats: DerivedStats,
    #[serde(default)]
    pub resources: Resources,
    #[serde(default)]
    pub inventory: BTreeMap<ItemId, u32>,
    #[serde(default)]
    pub equipment: BTreeMap<String, Option<ItemId>>,
    #[serde(default)]
    pub active_effects: BTreeMap<EffectId, EffectInstance>,
    #[serde(default)]
    pub in_combat: bool,
    #[serde(default)]
    pub unallocated_points: u32,
    #[serde(default)]
    pub force_exits: u32,
    #[serde(flatten)]
    pub extra: Extension,
}

/// The six core attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreStats {
    pub strength: u32,
    pub dexterity: u32,
    pub constitution: u32,
    pub intelligence: u32,
    pub wisdom: u32,
    pub charisma: u32,
    #[serde(flatten)]
    pub extra: Extension,
}

impl Default for CoreStats {
    fn default() -> Self {
        Self {
            strength: 5,
            dexterity: 5,
            constitution: 5,
            intelligence: 5,
            wisdom: 5,
            charisma: 5,
            extra: Extension::new(),
        }
    }
}

/// Stats computed from [`CoreStats`] on level-up.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedStats {
    pub attack: u32,
    pub magic_attack: u32,
    pub defense: u32,
    pub critical_chance: f64,
    pub dodge_chance: f64,
    #[serde(flatten)]
    pub extra: Extension,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub hp: u32,
    pub max_hp: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub ultimate_energy: u32,
    #[serde(flatten)]
    pub extra: Extension,
}

impl PlayerRecord {
    /// Fresh level-1 character with derived stats computed and resources full.
    pub fn new(class: impl Into<ClassTag>) -> Self {
        let mut record = Self {
            class: class.into(),
            level: 1,
            xp: 0,
            gold: 0,
            stats: CoreStats::default(),
            derived_stats: DerivedStats::default(),
            resources: Resources::default(),
            inventory: BTreeMap::new(),
            equipment: BTreeMap::new(),
            active_effects: BTreeMap::new(),
            in_combat: false,
            unallocated_points: 0,
            force_exits: 0,
            extra: Extension::new(),
        };
        crate::progression::recompute_derived(&mut record);
        record.resources.hp = record.resources.max_hp;
        record.resources.mana = record.resources.max_mana;
        record
    }

    /// Display name stored by the surrounding bot, if any.
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }

    pub fn item_count(&self, item: &str) -> u32 {
        self.inventory.get(item).copied().unwrap_or(0)
    }

    /// True when every `(item, count)` requirement is held.
    pub fn has_items(&self, requirements: &BTreeMap<ItemId, u32>) -> bool {
        requirements
            .iter()
            .all(|(item, count)| self.item_count(item.as_str()) >= *count)
    }

    pub fn add_item(&mut self, item: ItemId, count: u32) {
        if count == 0 {
            return;
        }
        *self.inventory.entry(item).or_insert(0) += count;
    }

    /// Removes `count` of `item`, deleting the key when it reaches zero.
    ///
    /// Returns false (and changes nothing) if fewer than `count` are held.
    pub fn remove_item(&mut self, item: &str, count: u32) -> bool {
        let Some(held) = self.inventory.get_mut(item) else {
            return count == 0;
        };
        if *held < count {
            return false;
        }
        *held -= count;
        if *held == 0 {
            self.inventory.remove(item);
        }
        true
    }
}
