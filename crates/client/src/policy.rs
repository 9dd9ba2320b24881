//! Scripted action choice.

use combat_core::{Catalog, CombatAction, LegalAction};

/// Picks the next action from the legal list.
///
/// Preference order: ultimate, the first damaging skill on offer, basic
/// attack, waiting out a stun, fleeing. `None` once nothing is legal.
pub fn choose(legal: &[LegalAction], catalog: &Catalog) -> Option<CombatAction> {
    let offered = |wanted: &CombatAction| legal.iter().any(|entry| &entry.action == wanted);

    if offered(&CombatAction::UseUltimate) {
        return Some(CombatAction::UseUltimate);
    }

    let damaging_skill = legal.iter().find_map(|entry| match &entry.action {
        CombatAction::UseSkill(id) => catalog
            .get_skill(id.as_str())
            .ok()
            .filter(|skill| skill.damage.is_some())
            .map(|_| entry.action.clone()),
        _ => None,
    });
    if damaging_skill.is_some() {
        return damaging_skill;
    }

    [CombatAction::BasicAttack, CombatAction::Wait, CombatAction::Flee]
        .into_iter()
        .find(|action| offered(action))
}
