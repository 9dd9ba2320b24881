//! Enumerate the actions the player may submit.
//!
//! Candidates are generated from the player's class, inventory and energy,
//! then filtered through [`validate`], so listing and applying can never
//! disagree about what is legal.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::state::CombatState;

use super::{CombatAction, validate};

/// A legal action with hints a front-end can render however it likes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalAction {
    pub action: CombatAction,
    /// Stable id, parseable back into the action.
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sp_cost: Option<u32>,
}

/// Every action that would pass validation right now, in a stable order:
/// basic attack, skills by id, ultimate, consumables by item id, flee, wait.
///
/// Empty when the encounter is over or the monster is due to act.
pub fn legal_actions(state: &CombatState, catalog: &Catalog, now_ms: u64) -> Vec<LegalAction> {
    if !state.is_player_turn() {
        return Vec::new();
    }

    candidates(state, catalog)
        .into_iter()
        .filter(|candidate| validate(state, catalog, now_ms, &candidate.action).is_ok())
        .collect()
}

fn candidates(state: &CombatState, catalog: &Catalog) -> Vec<LegalAction> {
    let record = &state.player.record;
    let mut out = vec![entry(CombatAction::BasicAttack, "Basic Attack".into(), None)];

    out.extend(catalog.list_skills_for_class(&record.class).map(|skill| {
        entry(
            CombatAction::UseSkill(skill.id.clone()),
            skill.name.clone(),
            Some(skill.cost),
        )
    }));

    if let Ok(ultimate) = catalog.get_ultimate(record.class.as_str()) {
        out.push(entry(
            CombatAction::UseUltimate,
            ultimate.name.clone(),
            None,
        ));
    }

    for (item_id, count) in &record.inventory {
        let Ok(item) = catalog.get_item(item_id.as_str()) else {
            continue;
        };
        if item.consumable_effects().is_some() {
            out.push(entry(
                CombatAction::UseConsumable(item_id.clone()),
                format!("{} (x{count})", item.name),
                None,
            ));
        }
    }

    out.push(entry(CombatAction::Flee, "Flee".into(), None));
    out.push(entry(CombatAction::Wait, "Wait".into(), None));
    out
}

fn entry(action: CombatAction, label: String, sp_cost: Option<u32>) -> LegalAction {
    LegalAction {
        id: action.to_string(),
        action,
        label,
        sp_cost,
    }
}
