//! The resolver: every combat state transition flows through here.
//!
//! [`CombatEngine`] borrows a [`CombatState`] mutably for the duration of one
//! step. Each step runs pre_validate → apply → post_validate against a
//! scratch copy and swaps it in only on success, so a failed step leaves the
//! caller's state untouched. The engine never yields and never reads a clock;
//! time and randomness arrive through [`ResolveContext`].

mod damage;
mod errors;
mod monster;
mod player;
mod status;

#[cfg(test)]
mod tests;

pub use errors::{ResolveError, TransitionPhase};

use serde::{Deserialize, Serialize};

use crate::action::{CombatAction, validate};
use crate::catalog::{Catalog, MonsterTemplate, PlayerId};
use crate::config::CombatRules;
use crate::rng::CombatRng;
use crate::state::{
    CombatState, MonsterCombatant, Outcome, PlayerCombatant, PlayerRecord, TurnOwner,
};

/// Collaborators a resolver step reads from.
pub struct ResolveContext<'a> {
    pub catalog: &'a Catalog,
    pub rng: &'a mut dyn CombatRng,
    /// Caller's clock reading in milliseconds.
    pub now_ms: u64,
}

impl<'a> ResolveContext<'a> {
    pub fn new(catalog: &'a Catalog, rng: &'a mut dyn CombatRng, now_ms: u64) -> Self {
        Self {
            catalog,
            rng,
            now_ms,
        }
    }
}

/// Log lines produced by one step and whether the turn moved to the monster.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub log: Vec<String>,
    pub turn_passed: bool,
}

/// Creates the state for a new encounter from a stored record and a template.
///
/// The player side is a clone of `record` with `in_combat` set, ultimate
/// energy clamped to its cap, HP clamped into `[1, max_hp]` and empty
/// inventory entries dropped.
pub fn begin(
    player_id: PlayerId,
    record: &PlayerRecord,
    template: &MonsterTemplate,
    rules: CombatRules,
) -> CombatState {
    let mut snapshot = record.clone();
    snapshot.in_combat = true;
    let resources = &mut snapshot.resources;
    resources.ultimate_energy = resources
        .ultimate_energy
        .min(CombatRules::MAX_ULTIMATE_ENERGY);
    resources.hp = resources.hp.clamp(1, resources.max_hp.max(1));
    resources.max_hp = resources.max_hp.max(resources.hp);
    resources.mana = resources.mana.min(resources.max_mana);
    snapshot.inventory.retain(|_, count| *count > 0);

    let player = PlayerCombatant::new(player_id, snapshot);
    let monster = MonsterCombatant::from_template(template);
    let mut state = CombatState::new(player, monster, rules);
    state.log.push(format!(
        "A wild {} (Lv {}) appears! Weakness: {}.",
        state.monster.name, state.monster.level, state.monster.weakness
    ));
    state
}

/// Authoritative reducer for one [`CombatState`].
pub struct CombatEngine<'a> {
    state: &'a mut CombatState,
}

impl<'a> CombatEngine<'a> {
    pub fn new(state: &'a mut CombatState) -> Self {
        Self { state }
    }

    /// Resolves a player action.
    ///
    /// Turn-ending actions leave the turn with the monster; the caller then
    /// invokes [`advance_monster_turn`](Self::advance_monster_turn) once.
    pub fn apply(
        &mut self,
        ctx: &mut ResolveContext<'_>,
        action: &CombatAction,
    ) -> Result<Resolution, ResolveError> {
        validate(self.state, ctx.catalog, ctx.now_ms, action)?;

        let mut next = self.state.clone();
        let mut log = Vec::new();
        player::apply(&mut next, ctx, action, &mut log)?;

        next.settle();
        let turn_passed = action.passes_turn() && !next.is_over();
        if turn_passed {
            next.turn = TurnOwner::Monster;
        }

        self.commit(next, &log)?;
        Ok(Resolution { log, turn_passed })
    }

    /// Resolves the monster's turn and hands the turn back to the player.
    pub fn advance_monster_turn(
        &mut self,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Resolution, ResolveError> {
        if self.state.is_over() {
            return Err(ResolveError::CombatOver);
        }
        if self.state.turn != TurnOwner::Monster {
            return Err(ResolveError::NotMonsterTurn);
        }

        let mut next = self.state.clone();
        let mut log = Vec::new();
        monster::take_turn(&mut next, ctx.catalog, ctx.rng, &mut log)?;

        self.commit(next, &log)?;
        Ok(Resolution {
            log,
            turn_passed: false,
        })
    }

    /// Ends the encounter with the force-exit penalty. Ignores whose turn it is.
    pub fn force_exit(&mut self) -> Result<Resolution, ResolveError> {
        if self.state.is_over() {
            return Err(ResolveError::CombatOver);
        }
        let mut next = self.state.clone();
        let mut log = Vec::new();
        player::force_exit(&mut next, &mut log);
        self.commit(next, &log)?;
        Ok(Resolution {
            log,
            turn_passed: false,
        })
    }

    /// Ends an idle encounter as force-exited without any penalty.
    pub fn abandon(&mut self) -> Result<Resolution, ResolveError> {
        if self.state.is_over() {
            return Err(ResolveError::CombatOver);
        }
        let mut next = self.state.clone();
        let log = vec![format!(
            "{} wanders off; the encounter is abandoned.",
            next.player.name
        )];
        next.terminate(Outcome::ForceExited);
        self.commit(next, &log)?;
        Ok(Resolution {
            log,
            turn_passed: false,
        })
    }

    /// post_validate: checks invariants on the scratch state, then swaps it in.
    fn commit(&mut self, mut next: CombatState, log: &[String]) -> Result<(), ResolveError> {
        next.check_invariants()
            .map_err(|what| ResolveError::Invariant {
                phase: TransitionPhase::PostValidate,
                what,
            })?;
        next.log.extend(log.iter().cloned());
        *self.state = next;
        Ok(())
    }
}
