//! Shared fixtures for unit tests.

use std::collections::BTreeMap;

use crate::catalog::{
    Catalog, ConsumableEffect, DamageType, EffectCategory, EffectChance, EffectDefinition,
    EffectKind, ItemDefinition, ItemKind, MonsterSkill, MonsterTemplate, SkillDefinition,
    StatKind, UltimateDefinition,
};
use crate::config::CombatRules;
use crate::engine::begin;
use crate::state::{CombatState, PlayerRecord};

fn effect(id: &str, kind: EffectKind, duration: u32, category: EffectCategory) -> EffectDefinition {
    EffectDefinition {
        id: id.into(),
        name: id.replace('_', " "),
        kind,
        duration,
        category,
    }
}

fn skill(id: &str, class: &str, cost: u32) -> SkillDefinition {
    SkillDefinition {
        id: id.into(),
        name: id.replace('_', " "),
        cost,
        damage: None,
        damage_type: DamageType::Physical,
        toughness_damage: 0,
        ultimate_gain: 0,
        target_effects: Vec::new(),
        self_effects: Vec::new(),
        armor_penetration: None,
        heal: None,
        remove_debuffs: false,
        classes: vec![class.into()],
        requires: BTreeMap::new(),
    }
}

pub(crate) fn goblin() -> MonsterTemplate {
    MonsterTemplate {
        id: "goblin_warrior".into(),
        name: "Goblin Warrior".into(),
        level: 1,
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

/// Small catalog covering every effect kind and item kind.
pub(crate) fn catalog() -> Catalog {
    let stone_gaze = MonsterTemplate {
        id: "stone_gaze".into(),
        name: "Stone Gaze".into(),
        skills: vec![MonsterSkill {
            name: "Petrify".into(),
            weight: 1,
            damage_percent: 100,
            effects: vec![EffectChance::certain("stun")],
        }],
        ..goblin()
    };

    Catalog::builder()
        .effects([
            effect(
                "burn",
                EffectKind::DamageOverTime { percent: 10 },
                2,
                EffectCategory::Debuff,
            ),
            effect(
                "regen",
                EffectKind::HealOverTime { percent: 10 },
                2,
                EffectCategory::Buff,
            ),
            effect("stun", EffectKind::SkipTurn, 1, EffectCategory::Debuff),
            effect(
                "stopwatch",
                EffectKind::Stacking {
                    max_stacks: 3,
                    trigger: "stun".into(),
                },
                3,
                EffectCategory::Debuff,
            ),
            effect(
                "hex",
                EffectKind::StatModifier {
                    stat: StatKind::Attack,
                    percent: -50,
                },
                3,
                EffectCategory::Curse,
            ),
            effect(
                "guard",
                EffectKind::StatModifier {
                    stat: StatKind::Defense,
                    percent: 50,
                },
                2,
                EffectCategory::Buff,
            ),
        ])
        .items([
            ItemDefinition {
                id: "health_potion".into(),
                name: "Health Potion".into(),
                kind: ItemKind::Consumable(vec![ConsumableEffect::Heal(50)]),
            },
            ItemDefinition {
                id: "cleansing_tea".into(),
                name: "Cleansing Tea".into(),
                kind: ItemKind::Consumable(vec![
                    ConsumableEffect::ClearDebuffs,
                    ConsumableEffect::UltimateEnergy(20),
                ]),
            },
            ItemDefinition {
                id: "explosive_arrow".into(),
                name: "Explosive Arrow".into(),
                kind: ItemKind::Ammunition,
            },
            ItemDefinition {
                id: "akuma_feather".into(),
                name: "Akuma Feather".into(),
                kind: ItemKind::Material,
            },
        ])
        .skills([
            SkillDefinition {
                damage: Some(40),
                toughness_damage: 20,
                target_effects: vec![EffectChance::certain("burn")],
                armor_penetration: Some(0.3),
                requires: BTreeMap::from([("explosive_arrow".into(), 1)]),
                ..skill("explosive_shot", "archer", 3)
            },
            SkillDefinition {
                damage: Some(30),
                toughness_damage: 20,
                ultimate_gain: 20,
                ..skill("power_strike", "warrior", 2)
            },
            SkillDefinition {
                damage: Some(10),
                damage_type: DamageType::Temporal,
                target_effects: vec![EffectChance::certain("stopwatch")],
                ..skill("chrono_tap", "mage", 1)
            },
            SkillDefinition {
                heal: Some(30),
                remove_debuffs: true,
                self_effects: vec![EffectChance::certain("guard")],
                ..skill("purify", "healer", 1)
            },
        ])
        .ultimates([
            UltimateDefinition {
                class: "mage".into(),
                name: "Cataclysm".into(),
                damage: Some(100),
                damage_type: DamageType::Magic,
                toughness_damage: 30,
                heal: None,
                target_effects: Vec::new(),
                self_effects: Vec::new(),
            },
            UltimateDefinition {
                class: "warrior".into(),
                name: "Lion's Roar".into(),
                damage: Some(80),
                damage_type: DamageType::Physical,
                toughness_damage: 40,
                heal: Some(20),
                target_effects: Vec::new(),
                self_effects: Vec::new(),
            },
        ])
        .monsters([goblin(), stone_gaze])
        .build()
        .expect("fixture catalog is valid")
}

/// Encounter of a fresh level-1 `class` against `monster`.
pub(crate) fn encounter(catalog: &Catalog, class: &str, monster: &str) -> CombatState {
    let record = PlayerRecord::new(class);
    let template = catalog.get_monster(monster).expect("fixture monster");
    begin("tester".into(), &record, template, CombatRules::default())
}
