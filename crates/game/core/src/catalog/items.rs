use serde::{Deserialize, Serialize};

use super::ids::{EffectId, ItemId};

/// Item definition: common fields plus a kind-specific payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
}

impl ItemDefinition {
    /// Payload when the item can be used as a consumable in combat.
    pub fn consumable_effects(&self) -> Option<&[ConsumableEffect]> {
        match &self.kind {
            ItemKind::Consumable(effects) => Some(effects),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Usable from the combat menu.
    Consumable(Vec<ConsumableEffect>),
    /// Spent by skills that list it as a requirement.
    Ammunition,
    /// Crafting and trade goods; inert in combat.
    Material,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumableEffect {
    Heal(u32),
    RestoreMana(u32),
    UltimateEnergy(u32),
    /// Removes every harmful effect (debuffs and curses).
    ClearDebuffs,
    ApplyEffect(EffectId),
}
