//! Monster turn: effect tick, break handling, AI move and hand-back.

use crate::catalog::{Catalog, EffectChance, MonsterSkill, StatKind};
use crate::config::CombatRules;
use crate::rng::CombatRng;
use crate::state::{CombatState, Combatant, TurnOwner};

use super::ResolveError;
use super::damage::mitigate;
use super::status::{apply_effect, modifier_percent, scale, tick_effects};

pub(super) fn take_turn(
    state: &mut CombatState,
    catalog: &Catalog,
    rng: &mut dyn CombatRng,
    log: &mut Vec<String>,
) -> Result<(), ResolveError> {
    state.turn_count = state.turn_count.saturating_add(1);

    // A stun waits out a turn the break already takes.
    let break_skip = state.monster.broken && state.monster.broken_turns_remaining > 0;
    let tick = tick_effects(&mut state.monster, catalog, break_skip, log);
    state.settle();
    if state.is_over() {
        state.turn = TurnOwner::Player;
        return Ok(());
    }

    let mut skipped = false;
    let monster = &mut state.monster;
    if monster.broken {
        if monster.broken_turns_remaining > 0 {
            monster.broken_turns_remaining -= 1;
            log.push(format!("{} is broken and loses its turn.", monster.name));
            skipped = true;
        } else {
            monster.broken = false;
            monster.toughness = monster.max_toughness;
            log.push(format!("{} recovers from the break.", monster.name));
        }
    }
    if !skipped && tick.skip_turn {
        log.push(format!("{} cannot act this turn.", state.monster.name));
        skipped = true;
    }

    if !skipped {
        attack(state, catalog, rng, log)?;
    }

    let regen = state.skill_points.gain(state.rules.sp_regen);
    if regen > 0 {
        log.push(format!(
            "+{regen} SP ({}/{}).",
            state.skill_points.current(),
            state.skill_points.max()
        ));
    }
    state.turn = TurnOwner::Player;
    state.settle();
    if state.is_over() {
        return Ok(());
    }

    let tick = tick_effects(&mut state.player, catalog, false, log);
    if tick.skip_turn {
        state.player.stunned = true;
        log.push(format!("{} is stunned and must wait.", state.player.name));
    }
    state.settle();
    Ok(())
}

fn attack(
    state: &mut CombatState,
    catalog: &Catalog,
    rng: &mut dyn CombatRng,
    log: &mut Vec<String>,
) -> Result<(), ResolveError> {
    let chosen = pick_move(&state.monster.skills, rng);
    let (move_name, damage_percent, effects): (&str, u32, &[EffectChance]) = match chosen {
        Some(skill) => (
            skill.name.as_str(),
            skill.damage_percent,
            skill.effects.as_slice(),
        ),
        None => ("attacks", 100, &[] as &[EffectChance]),
    };

    let attack_percent = modifier_percent(&state.monster.effects, catalog, StatKind::Attack);
    let attack = i64::from(scale(state.monster.attack, attack_percent));
    let (low, high) = CombatRules::MONSTER_SPREAD;
    let rolled = u32::try_from(rng.range(attack + low, attack + high).max(1)).unwrap_or(u32::MAX);
    let raw = u32::try_from(u64::from(rolled) * u64::from(damage_percent) / 100)
        .unwrap_or(u32::MAX)
        .max(1);
    let damage = mitigate(&state.player, catalog, raw);
    let dealt = state.player.take_damage(damage);

    if chosen.is_some() {
        log.push(format!(
            "{} uses {} on {} for {} damage.",
            state.monster.name, move_name, state.player.name, dealt
        ));
    } else {
        log.push(format!(
            "{} {} {} for {} damage.",
            state.monster.name, move_name, state.player.name, dealt
        ));
    }

    for entry in effects {
        if rng.chance(entry.chance) {
            apply_effect(&mut state.player, catalog, &entry.effect, log)?;
        }
    }
    Ok(())
}

/// Weighted choice over the monster's moves. No roll is drawn when the
/// monster has no moves or every weight is zero.
fn pick_move<'a>(skills: &'a [MonsterSkill], rng: &mut dyn CombatRng) -> Option<&'a MonsterSkill> {
    let total: u64 = skills.iter().map(|s| u64::from(s.weight)).sum();
    if total == 0 {
        return None;
    }
    let total = i64::try_from(total).unwrap_or(i64::MAX);
    let mut roll = rng.range(0, total - 1);
    for skill in skills {
        let weight = i64::from(skill.weight);
        if roll < weight {
            return Some(skill);
        }
        roll -= weight;
    }
    None
}
