//! The two sides of an encounter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{DamageType, ItemId, MonsterId, MonsterSkill, MonsterTemplate, PlayerId};
use crate::config::CombatRules;

use super::effects::ActiveEffects;
use super::record::PlayerRecord;

/// Fields every participant exposes to damage and effect code.
pub trait Combatant {
    fn name(&self) -> &str;
    fn hp(&self) -> u32;
    fn max_hp(&self) -> u32;
    fn set_hp(&mut self, hp: u32);
    fn effects(&self) -> &ActiveEffects;
    fn effects_mut(&mut self) -> &mut ActiveEffects;

    fn is_down(&self) -> bool {
        self.hp() == 0
    }

    /// Subtracts damage, flooring HP at zero. Returns HP actually lost.
    fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.hp();
        self.set_hp(before.saturating_sub(amount));
        before - self.hp()
    }

    /// Restores HP up to max. Returns HP actually gained.
    fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp();
        self.set_hp(before.saturating_add(amount).min(self.max_hp()));
        self.hp() - before
    }
}

/// Player side: a mutable clone of the stored record plus combat-only flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerCombatant {
    pub id: PlayerId,
    pub name: String,
    pub record: PlayerRecord,
    /// Set by a skip-turn tick; only `Wait` and `Flee` are legal while set.
    pub stunned: bool,
}

impl PlayerCombatant {
    pub fn new(id: PlayerId, record: PlayerRecord) -> Self {
        let name = record
            .name()
            .map(str::to_owned)
            .unwrap_or_else(|| id.to_string());
        Self {
            id,
            name,
            record,
            stunned: false,
        }
    }

    pub fn ultimate_energy(&self) -> u32 {
        self.record.resources.ultimate_energy
    }

    /// Adds ultimate energy, capped at [`CombatRules::MAX_ULTIMATE_ENERGY`].
    pub fn gain_ultimate(&mut self, amount: u32) {
        let ue = &mut self.record.resources.ultimate_energy;
        *ue = ue.saturating_add(amount).min(CombatRules::MAX_ULTIMATE_ENERGY);
    }

    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let res = &mut self.record.resources;
        let before = res.mana;
        res.mana = res.mana.saturating_add(amount).min(res.max_mana);
        res.mana - before
    }
}

impl Combatant for PlayerCombatant {
    fn name(&self) -> &str {
        &self.name
    }

    fn hp(&self) -> u32 {
        self.record.resources.hp
    }

    fn max_hp(&self) -> u32 {
        self.record.resources.max_hp
    }

    fn set_hp(&mut self, hp: u32) {
        self.record.resources.hp = hp.min(self.record.resources.max_hp);
    }

    fn effects(&self) -> &ActiveEffects {
        &self.record.active_effects
    }

    fn effects_mut(&mut self) -> &mut ActiveEffects {
        &mut self.record.active_effects
    }
}

/// Monster side, cloned from a catalog template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterCombatant {
    pub template: MonsterId,
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub toughness: u32,
    pub max_toughness: u32,
    pub weakness: DamageType,
    pub broken: bool,
    pub broken_turns_remaining: u32,
    pub effects: ActiveEffects,
    pub loot: BTreeMap<ItemId, f64>,
    pub xp_reward: u64,
    pub gold_reward: u64,
    pub skills: Vec<MonsterSkill>,
}

impl MonsterCombatant {
    pub fn from_template(template: &MonsterTemplate) -> Self {
        Self {
            template: template.id.clone(),
            name: template.name.clone(),
            level: template.level,
            hp: template.hp,
            max_hp: template.hp,
            attack: template.attack,
            defense: template.defense,
            toughness: template.toughness,
            max_toughness: template.toughness,
            weakness: template.weakness,
            broken: false,
            broken_turns_remaining: 0,
            effects: ActiveEffects::new(),
            loot: template.loot.clone(),
            xp_reward: template.xp_reward,
            gold_reward: template.gold_reward,
            skills: template.skills.clone(),
        }
    }
}

impl Combatant for MonsterCombatant {
    fn name(&self) -> &str {
        &self.name
    }

    fn hp(&self) -> u32 {
        self.hp
    }

    fn max_hp(&self) -> u32 {
        self.max_hp
    }

    fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    fn effects(&self) -> &ActiveEffects {
        &self.effects
    }

    fn effects_mut(&mut self) -> &mut ActiveEffects {
        &mut self.effects
    }
}
