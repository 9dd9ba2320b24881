//! Damage rolls, criticals and the toughness/break step.
//!
//! Every player hit follows the same order: spread roll, clamp to at least
//! one, critical roll, break multiplier, target defense modifiers, HP
//! deduction, toughness damage.

use crate::catalog::{Catalog, DamageType, StatKind};
use crate::config::CombatRules;
use crate::rng::CombatRng;
use crate::state::{CombatState, Combatant, MonsterCombatant, PlayerCombatant};

use super::status::{modifier_percent, scale};

/// Parameters of one player hit against the monster.
#[derive(Clone, Copy, Debug)]
pub(super) struct Strike {
    pub base: i64,
    pub spread: (i64, i64),
    pub can_crit: bool,
    pub break_percent: u32,
    pub damage_type: DamageType,
    pub toughness_damage: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct StrikeReport {
    pub damage: u32,
    pub critical: bool,
    pub break_bonus: bool,
    pub broke: bool,
}

/// Player attack stat after attack modifiers.
pub(super) fn player_attack(player: &PlayerCombatant, catalog: &Catalog) -> u32 {
    let percent = modifier_percent(player.effects(), catalog, StatKind::Attack);
    scale(player.record.derived_stats.attack, percent)
}

fn player_crit_chance(player: &PlayerCombatant, catalog: &Catalog) -> f64 {
    let bonus = modifier_percent(player.effects(), catalog, StatKind::CritChance);
    player.record.derived_stats.critical_chance + f64::from(bonus) / 100.0
}

/// Damage after the holder's defense modifiers, never below one.
pub(super) fn mitigate<C: Combatant + ?Sized>(target: &C, catalog: &Catalog, damage: u32) -> u32 {
    let percent = modifier_percent(target.effects(), catalog, StatKind::Defense);
    scale(damage, -percent).max(1)
}

/// Resolves one player hit on the monster and appends log lines.
pub(super) fn strike_monster(
    state: &mut CombatState,
    catalog: &Catalog,
    rng: &mut dyn CombatRng,
    strike: Strike,
    log: &mut Vec<String>,
) -> StrikeReport {
    let mut report = StrikeReport::default();

    let rolled = rng.range(strike.base + strike.spread.0, strike.base + strike.spread.1);
    let mut damage = u32::try_from(rolled.max(1)).unwrap_or(u32::MAX);

    if strike.can_crit && rng.chance(player_crit_chance(&state.player, catalog)) {
        damage = percent(damage, CombatRules::CRIT_PERCENT);
        report.critical = true;
    }
    if state.monster.broken {
        damage = percent(damage, strike.break_percent);
        report.break_bonus = true;
    }
    damage = mitigate(&state.monster, catalog, damage);

    report.damage = state.monster.take_damage(damage);

    let mut line = format!(
        "{} deals {} {} damage to {}",
        state.player.name, report.damage, strike.damage_type, state.monster.name
    );
    if report.critical {
        line.push_str(" (CRITICAL)");
    }
    if report.break_bonus {
        line.push_str(" (broken)");
    }
    line.push('.');
    log.push(line);

    report.broke = deal_toughness(
        &mut state.monster,
        strike.damage_type,
        strike.toughness_damage,
        log,
    );
    report
}

/// Applies toughness damage when `damage_type` matches the weakness.
///
/// Returns true when this call depleted the bar and broke the monster.
pub(super) fn deal_toughness(
    monster: &mut MonsterCombatant,
    damage_type: DamageType,
    amount: u32,
    log: &mut Vec<String>,
) -> bool {
    if amount == 0 || damage_type != monster.weakness || monster.toughness == 0 {
        return false;
    }
    monster.toughness = monster.toughness.saturating_sub(amount);
    if monster.toughness > 0 {
        log.push(format!(
            "{} toughness: {}/{}.",
            monster.name, monster.toughness, monster.max_toughness
        ));
        return false;
    }

    monster.broken = true;
    monster.broken_turns_remaining = CombatRules::BREAK_DURATION;
    log.push(format!("BREAK! {}'s guard shatters.", monster.name));
    true
}

fn percent(value: u32, pct: u32) -> u32 {
    u32::try_from(u64::from(value) * u64::from(pct) / 100).unwrap_or(u32::MAX)
}
