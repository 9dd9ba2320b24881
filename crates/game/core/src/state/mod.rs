//! In-memory state of a single encounter.
//!
//! A [`CombatState`] is owned by exactly one session and mutated only through
//! [`crate::engine::CombatEngine`] while the session lock is held. The
//! participants inside it are clones; the stored [`PlayerRecord`] changes only
//! when the session commits.
mod effects;
mod log;
mod participant;
mod record;
mod turn;

use serde::{Deserialize, Serialize};

pub use effects::{ActiveEffects, EffectInstance};
pub use log::CombatLog;
pub use participant::{Combatant, MonsterCombatant, PlayerCombatant};
pub use record::{CoreStats, DerivedStats, Extension, PlayerRecord, Resources};
pub use turn::{Outcome, SkillPoints, TurnOwner};

use crate::config::CombatRules;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub player: PlayerCombatant,
    pub monster: MonsterCombatant,
    pub rules: CombatRules,
    pub skill_points: SkillPoints,
    pub turn: TurnOwner,
    /// Monster turns resolved so far.
    pub turn_count: u32,
    pub log: CombatLog,
    pub outcome: Outcome,
    /// Caller-supplied clock reading of the last consumable use.
    pub last_consumable_at_ms: Option<u64>,
}

impl CombatState {
    pub fn new(player: PlayerCombatant, monster: MonsterCombatant, rules: CombatRules) -> Self {
        Self {
            player,
            monster,
            skill_points: SkillPoints::new(rules.initial_sp, rules.max_sp),
            turn: TurnOwner::Player,
            turn_count: 0,
            log: CombatLog::new(rules.log_capacity),
            outcome: Outcome::Ongoing,
            last_consumable_at_ms: None,
            rules,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn is_player_turn(&self) -> bool {
        !self.is_over() && self.turn == TurnOwner::Player
    }

    /// Sets a terminal outcome unless one is already set.
    pub(crate) fn terminate(&mut self, outcome: Outcome) {
        if !self.is_over() {
            self.outcome = outcome;
        }
    }

    /// Declares victory or defeat if either side is down. Monster death wins
    /// ties so a finishing blow that also kills the player still counts.
    pub(crate) fn settle(&mut self) {
        if self.is_over() {
            return;
        }
        if self.monster.is_down() {
            self.outcome = Outcome::Victory;
        } else if self.player.is_down() {
            self.outcome = Outcome::Defeat;
        }
    }

    /// Checks the bounds every resolver step must preserve.
    ///
    /// Returns a short description of the first violated bound.
    pub fn check_invariants(&self) -> Result<(), &'static str> {
        let player = &self.player;
        let monster = &self.monster;

        if player.hp() > player.max_hp() {
            return Err("player hp above max");
        }
        if monster.hp > monster.max_hp {
            return Err("monster hp above max");
        }
        if monster.toughness > monster.max_toughness {
            return Err("toughness above max");
        }
        if self.skill_points.current() > self.skill_points.max() {
            return Err("skill points above max");
        }
        if player.ultimate_energy() > CombatRules::MAX_ULTIMATE_ENERGY {
            return Err("ultimate energy above cap");
        }
        if player.record.inventory.values().any(|count| *count == 0) {
            return Err("zero-count inventory key");
        }
        match self.outcome {
            Outcome::Ongoing if player.is_down() || monster.is_down() => {
                Err("ongoing with a participant at zero hp")
            }
            Outcome::Victory if !monster.is_down() => Err("victory with monster alive"),
            Outcome::Defeat if !player.is_down() => Err("defeat with player alive"),
            _ => Ok(()),
        }
    }
}
