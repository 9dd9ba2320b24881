//! Data-only views returned to front-ends.
//!
//! Nothing here is rendered text except the combat log lines and the labels
//! on [`LegalAction`]; layout is the front-end's job.

use serde::{Deserialize, Serialize};

use combat_core::state::ActiveEffects;
use combat_core::{
    Catalog, CombatState, Combatant, DamageType, EffectId, LegalAction, MonsterId, Outcome,
    PlayerId, Rewards, TurnOwner, legal_actions,
};

/// Snapshot of an encounter as the player sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatView {
    pub player: ParticipantView,
    pub monster: MonsterView,
    pub skill_points: u32,
    pub max_skill_points: u32,
    pub turn: TurnOwner,
    pub turn_count: u32,
    pub outcome: Outcome,
    /// Most recent log lines, oldest first.
    pub log: Vec<String>,
    /// Empty unless it is the player's turn.
    pub legal_actions: Vec<LegalAction>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub id: PlayerId,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub ultimate_energy: u32,
    pub stunned: bool,
    pub effects: Vec<EffectView>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterView {
    pub id: MonsterId,
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub toughness: u32,
    pub max_toughness: u32,
    pub weakness: DamageType,
    pub broken: bool,
    pub effects: Vec<EffectView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectView {
    pub id: EffectId,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacks: Option<u32>,
}

/// Result of a player request that advanced or ended an encounter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionReport {
    pub view: CombatView,
    /// Lines produced by this request only.
    pub log: Vec<String>,
    /// Victory payout, once the encounter is committed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewards: Option<Rewards>,
}

impl CombatView {
    pub fn from_state(state: &CombatState, catalog: &Catalog, now_ms: u64) -> Self {
        let player = &state.player;
        let monster = &state.monster;

        Self {
            player: ParticipantView {
                id: player.id.clone(),
                name: player.name.clone(),
                hp: player.hp(),
                max_hp: player.max_hp(),
                ultimate_energy: player.ultimate_energy(),
                stunned: player.stunned,
                effects: effect_views(player.effects()),
            },
            monster: MonsterView {
                id: monster.template.clone(),
                name: monster.name.clone(),
                level: monster.level,
                hp: monster.hp,
                max_hp: monster.max_hp,
                toughness: monster.toughness,
                max_toughness: monster.max_toughness,
                weakness: monster.weakness,
                broken: monster.broken,
                effects: effect_views(&monster.effects),
            },
            skill_points: state.skill_points.current(),
            max_skill_points: state.skill_points.max(),
            turn: state.turn,
            turn_count: state.turn_count,
            outcome: state.outcome,
            log: state.log.lines().map(str::to_owned).collect(),
            legal_actions: legal_actions(state, catalog, now_ms),
        }
    }
}

fn effect_views(effects: &ActiveEffects) -> Vec<EffectView> {
    effects
        .iter()
        .map(|(id, instance)| EffectView {
            id: id.clone(),
            duration: instance.duration,
            stacks: instance.stacks,
        })
        .collect()
}
