use crate::catalog::Catalog;
use crate::config::CombatRules;
use crate::engine::ResolveError;
use crate::state::CombatState;

use super::{CombatAction, IllegalReason};

/// Checks whether `action` may be applied to `state` right now.
///
/// `now_ms` is the caller's clock reading; it only matters for the
/// consumable cooldown.
pub fn validate(
    state: &CombatState,
    catalog: &Catalog,
    now_ms: u64,
    action: &CombatAction,
) -> Result<(), ResolveError> {
    if state.is_over() {
        return Err(ResolveError::CombatOver);
    }
    if !state.is_player_turn() {
        return Err(ResolveError::NotPlayerTurn);
    }

    let player = &state.player;
    if player.stunned && !matches!(action, CombatAction::Wait | CombatAction::Flee) {
        return Err(IllegalReason::Stunned.into());
    }

    match action {
        CombatAction::BasicAttack | CombatAction::Flee => Ok(()),
        CombatAction::Wait => {
            if player.stunned {
                Ok(())
            } else {
                Err(IllegalReason::WaitNotNeeded.into())
            }
        }
        CombatAction::UseSkill(id) => {
            let skill = catalog
                .get_skill(id.as_str())
                .map_err(|_| IllegalReason::UnknownSkill)?;
            if !skill.allows(&player.record.class) {
                return Err(IllegalReason::WrongClass.into());
            }
            if !state.skill_points.can_afford(skill.cost) {
                return Err(IllegalReason::InsufficientSp.into());
            }
            if !player.record.has_items(&skill.requires) {
                return Err(IllegalReason::MissingConsumable.into());
            }
            Ok(())
        }
        CombatAction::UseUltimate => {
            if player.ultimate_energy() < CombatRules::MAX_ULTIMATE_ENERGY {
                return Err(IllegalReason::UltimateNotReady.into());
            }
            catalog.get_ultimate(player.record.class.as_str())?;
            Ok(())
        }
        CombatAction::UseConsumable(id) => {
            let item = catalog
                .get_item(id.as_str())
                .map_err(|_| IllegalReason::UnknownItem)?;
            if item.consumable_effects().is_none() {
                return Err(IllegalReason::ItemNotConsumable.into());
            }
            if player.record.item_count(id.as_str()) == 0 {
                return Err(IllegalReason::MissingConsumable.into());
            }
            if let Some(last) = state.last_consumable_at_ms {
                let ready_at = last.saturating_add(state.rules.consumable_cooldown_ms);
                if now_ms < ready_at {
                    return Err(IllegalReason::ConsumableOnCooldown.into());
                }
            }
            Ok(())
        }
    }
}
