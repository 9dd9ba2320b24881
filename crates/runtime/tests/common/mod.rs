//! Shared fixtures for the runtime integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use combat_core::catalog::{
    ConsumableEffect, EffectCategory, EffectChance, EffectDefinition, EffectKind, ItemDefinition,
    ItemKind, SkillDefinition, UltimateDefinition,
};
use combat_core::{
    Catalog, CombatAction, CombatRng, CombatRules, DamageType, MidpointRng, MonsterTemplate,
    PlayerId, PlayerRecord,
};
use combat_runtime::{
    ActionReport, CombatService, InMemoryPlayerStore, ManualClock, PlayerStore, RngFactory,
    SessionManager,
};

pub const START_MS: u64 = 1_000_000;

pub fn goblin() -> MonsterTemplate {
    MonsterTemplate {
        id: "goblin_warrior".into(),
        name: "Goblin Warrior".into(),
        level: 3,
        hp: 120,
        attack: 25,
        defense: 8,
        toughness: 60,
        weakness: DamageType::Physical,
        xp_reward: 100,
        gold_reward: 50,
        loot: BTreeMap::from([("health_potion".into(), 1.0)]),
        skills: Vec::new(),
    }
}

/// Goblin stats, but enough HP to survive a long exchange.
pub fn armored_goblin() -> MonsterTemplate {
    MonsterTemplate {
        id: "armored_goblin".into(),
        name: "Armored Goblin".into(),
        hp: 1_000,
        ..goblin()
    }
}

pub fn catalog() -> Catalog {
    Catalog::builder()
        .effect(EffectDefinition {
            id: "burn".into(),
            name: "Burn".into(),
            kind: EffectKind::DamageOverTime { percent: 10 },
            duration: 2,
            category: EffectCategory::Debuff,
        })
        .items([
            ItemDefinition {
                id: "health_potion".into(),
                name: "Health Potion".into(),
                kind: ItemKind::Consumable(vec![ConsumableEffect::Heal(50)]),
            },
            ItemDefinition {
                id: "explosive_arrow".into(),
                name: "Explosive Arrow".into(),
                kind: ItemKind::Ammunition,
            },
        ])
        .skill(SkillDefinition {
            id: "explosive_shot".into(),
            name: "Explosive Shot".into(),
            cost: 30,
            damage: Some(45),
            damage_type: DamageType::Fire,
            toughness_damage: 20,
            ultimate_gain: 20,
            target_effects: vec![EffectChance {
                effect: "burn".into(),
                chance: 0.6,
            }],
            self_effects: Vec::new(),
            armor_penetration: Some(0.2),
            heal: None,
            remove_debuffs: false,
            classes: vec!["archer".into()],
            requires: BTreeMap::from([("explosive_arrow".into(), 1)]),
        })
        .ultimate(UltimateDefinition {
            class: "mage".into(),
            name: "Cataclysm".into(),
            damage: Some(100),
            damage_type: DamageType::Magic,
            toughness_damage: 30,
            heal: None,
            target_effects: Vec::new(),
            self_effects: Vec::new(),
        })
        .monsters([goblin(), armored_goblin()])
        .build()
        .expect("fixture catalog is valid")
}

/// Every range roll at its midpoint, every Bernoulli roll at 0.5.
pub fn midpoint_rng() -> RngFactory {
    Arc::new(|_: &PlayerId, _: u64| -> Box<dyn CombatRng> { Box::new(MidpointRng::new()) })
}

pub struct Harness {
    pub service: CombatService,
    pub store: Arc<InMemoryPlayerStore>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    pub fn new(rules: CombatRules) -> Self {
        Self::with_store(rules, Arc::new(InMemoryPlayerStore::new()), midpoint_rng())
    }

    pub fn with_store(
        rules: CombatRules,
        store: Arc<InMemoryPlayerStore>,
        rng_factory: RngFactory,
    ) -> Self {
        let clock = Arc::new(ManualClock::new(START_MS));
        let sessions = SessionManager::new(
            Arc::new(catalog()),
            store.clone(),
            clock.clone(),
            rules,
            rng_factory,
        );
        Self {
            service: CombatService::new(Arc::new(sessions)),
            store,
            clock,
        }
    }

    pub fn add_player(&self, id: &str, record: PlayerRecord) -> PlayerId {
        let player = PlayerId::from(id);
        self.store
            .insert(player.clone(), record)
            .expect("store accepts the record");
        player
    }

    pub fn stored(&self, player: &PlayerId) -> PlayerRecord {
        self.store
            .get(player)
            .expect("store readable")
            .expect("record exists")
    }

    pub async fn submit(&self, player: &PlayerId, action: CombatAction) -> ActionReport {
        self.service
            .submit_action(player, &action)
            .await
            .unwrap_or_else(|err| panic!("{action} rejected: {err}"))
    }
}

/// Level-`level` character of `class` with no critical chance.
pub fn character(class: &str, level: u32) -> PlayerRecord {
    let mut record = PlayerRecord::new(class);
    record.level = level;
    record.derived_stats.critical_chance = 0.0;
    record
}

/// Asserts the value is usable as a `PlayerStore` trait object.
pub fn as_store(store: Arc<InMemoryPlayerStore>) -> Arc<dyn PlayerStore> {
    store
}
