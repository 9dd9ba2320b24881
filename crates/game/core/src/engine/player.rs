//! Player action handlers.

use crate::action::{CombatAction, IllegalReason};
use crate::catalog::{
    Catalog, ConsumableEffect, DamageType, EffectCategory, EffectChance, ItemId,
    SkillDefinition, UltimateDefinition,
};
use crate::config::CombatRules;
use crate::rewards::{flee_penalty, force_exit_penalty};
use crate::rng::CombatRng;
use crate::state::{CombatState, Combatant, Outcome};

use super::damage::{Strike, player_attack, strike_monster};
use super::status::{apply_effect, purge};
use super::{ResolveContext, ResolveError};

pub(super) fn apply(
    state: &mut CombatState,
    ctx: &mut ResolveContext<'_>,
    action: &CombatAction,
    log: &mut Vec<String>,
) -> Result<(), ResolveError> {
    match action {
        CombatAction::BasicAttack => {
            basic_attack(state, ctx.catalog, ctx.rng, log);
            Ok(())
        }
        CombatAction::UseSkill(id) => {
            let skill = ctx.catalog.get_skill(id.as_str())?;
            use_skill(state, ctx.catalog, ctx.rng, skill, log)
        }
        CombatAction::UseUltimate => {
            let ultimate = ctx.catalog.get_ultimate(state.player.record.class.as_str())?;
            use_ultimate(state, ctx.catalog, ctx.rng, ultimate, log)
        }
        CombatAction::UseConsumable(item) => {
            use_consumable(state, ctx.catalog, item, log)?;
            state.last_consumable_at_ms = Some(ctx.now_ms);
            Ok(())
        }
        CombatAction::Flee => {
            flee(state, log);
            Ok(())
        }
        CombatAction::Wait => {
            state.player.stunned = false;
            log.push(format!("{} shakes off the stun.", state.player.name));
            Ok(())
        }
    }
}

fn basic_attack(
    state: &mut CombatState,
    catalog: &Catalog,
    rng: &mut dyn CombatRng,
    log: &mut Vec<String>,
) {
    let attack = player_attack(&state.player, catalog);
    let strike = Strike {
        base: CombatRules::BASIC_ATTACK_BASE + i64::from(attack / 2),
        spread: CombatRules::STRIKE_SPREAD,
        can_crit: true,
        break_percent: CombatRules::BASIC_BREAK_PERCENT,
        damage_type: DamageType::Physical,
        toughness_damage: CombatRules::BASIC_TOUGHNESS_DAMAGE,
    };
    strike_monster(state, catalog, rng, strike, log);

    let (low, high) = CombatRules::BASIC_SP_GAIN;
    let roll = u32::try_from(rng.range(low, high)).unwrap_or(0);
    let gained = state.skill_points.gain(roll);
    if gained > 0 {
        log.push(format!(
            "+{gained} SP ({}/{}).",
            state.skill_points.current(),
            state.skill_points.max()
        ));
    }

    state.player.gain_ultimate(CombatRules::BASIC_ULTIMATE_GAIN);
}

fn use_skill(
    state: &mut CombatState,
    catalog: &Catalog,
    rng: &mut dyn CombatRng,
    skill: &SkillDefinition,
    log: &mut Vec<String>,
) -> Result<(), ResolveError> {
    if !state.skill_points.spend(skill.cost) {
        return Err(IllegalReason::InsufficientSp.into());
    }
    for (item, count) in &skill.requires {
        if !state.player.record.remove_item(item.as_str(), *count) {
            return Err(IllegalReason::MissingConsumable.into());
        }
    }
    log.push(format!("{} uses {}!", state.player.name, skill.name));

    if let Some(damage) = skill.damage {
        if let Some(ratio) = skill.armor_penetration {
            log.push(format!("{} ignores {:.0}% of armor.", skill.name, ratio * 100.0));
        }
        let attack = player_attack(&state.player, catalog);
        let strike = Strike {
            base: i64::from(damage) + i64::from(attack / 2),
            spread: CombatRules::STRIKE_SPREAD,
            can_crit: true,
            break_percent: CombatRules::SKILL_BREAK_PERCENT,
            damage_type: skill.damage_type,
            toughness_damage: skill.toughness_damage,
        };
        strike_monster(state, catalog, rng, strike, log);
    }

    apply_chances(state, catalog, rng, &skill.target_effects, Side::Monster, log)?;
    if let Some(amount) = skill.heal {
        heal_player(state, amount, log);
    }
    apply_chances(state, catalog, rng, &skill.self_effects, Side::Player, log)?;

    if skill.remove_debuffs {
        let removed = purge(&mut state.player, catalog, |category| {
            category == EffectCategory::Curse
        });
        if !removed.is_empty() {
            log.push(format!("Cleansed: {}.", removed.join(", ")));
        }
    }

    state.player.gain_ultimate(skill.ultimate_gain);
    Ok(())
}

fn use_ultimate(
    state: &mut CombatState,
    catalog: &Catalog,
    rng: &mut dyn CombatRng,
    ultimate: &UltimateDefinition,
    log: &mut Vec<String>,
) -> Result<(), ResolveError> {
    if state.player.ultimate_energy() < CombatRules::MAX_ULTIMATE_ENERGY {
        return Err(IllegalReason::UltimateNotReady.into());
    }
    state.player.record.resources.ultimate_energy = 0;
    log.push(format!("{} unleashes {}!", state.player.name, ultimate.name));

    if let Some(damage) = ultimate.damage {
        let strike = Strike {
            base: i64::from(damage),
            spread: CombatRules::ULTIMATE_SPREAD,
            can_crit: false,
            break_percent: CombatRules::ULTIMATE_BREAK_PERCENT,
            damage_type: ultimate.damage_type,
            toughness_damage: ultimate.toughness_damage,
        };
        strike_monster(state, catalog, rng, strike, log);
    }

    apply_chances(state, catalog, rng, &ultimate.target_effects, Side::Monster, log)?;
    if let Some(amount) = ultimate.heal {
        heal_player(state, amount, log);
    }
    apply_chances(state, catalog, rng, &ultimate.self_effects, Side::Player, log)?;
    Ok(())
}

fn use_consumable(
    state: &mut CombatState,
    catalog: &Catalog,
    item_id: &ItemId,
    log: &mut Vec<String>,
) -> Result<(), ResolveError> {
    let item = catalog
        .get_item(item_id.as_str())
        .map_err(|_| IllegalReason::UnknownItem)?;
    let payload = item
        .consumable_effects()
        .ok_or(IllegalReason::ItemNotConsumable)?;
    if !state.player.record.remove_item(item_id.as_str(), 1) {
        return Err(IllegalReason::MissingConsumable.into());
    }
    log.push(format!("{} uses {}.", state.player.name, item.name));

    for effect in payload {
        match effect {
            ConsumableEffect::Heal(amount) => heal_player(state, *amount, log),
            ConsumableEffect::RestoreMana(amount) => {
                let gained = state.player.restore_mana(*amount);
                log.push(format!("{} restores {} mana.", state.player.name, gained));
            }
            ConsumableEffect::UltimateEnergy(amount) => {
                state.player.gain_ultimate(*amount);
                log.push(format!(
                    "Ultimate energy: {}/{}.",
                    state.player.ultimate_energy(),
                    CombatRules::MAX_ULTIMATE_ENERGY
                ));
            }
            ConsumableEffect::ClearDebuffs => {
                let removed = purge(&mut state.player, catalog, |category| category.is_harmful());
                if !removed.is_empty() {
                    log.push(format!("Cleansed: {}.", removed.join(", ")));
                }
            }
            ConsumableEffect::ApplyEffect(effect) => {
                apply_effect(&mut state.player, catalog, effect, log)?;
            }
        }
    }
    Ok(())
}

fn flee(state: &mut CombatState, log: &mut Vec<String>) {
    let record = &mut state.player.record;
    let lost = flee_penalty(record.gold);
    record.gold -= lost;
    log.push(format!(
        "{} flees from {}, dropping {} gold.",
        state.player.name, state.monster.name, lost
    ));
    state.terminate(Outcome::Fled);
}

/// Heavy-penalty exit: gold loss, HP set to one, counter bumped.
pub(super) fn force_exit(state: &mut CombatState, log: &mut Vec<String>) {
    let record = &mut state.player.record;
    let lost = force_exit_penalty(record.gold);
    record.gold -= lost;
    record.resources.hp = 1;
    record.resources.ultimate_energy = 0;
    record.force_exits = record.force_exits.saturating_add(1);
    log.push(format!(
        "{} force-exits the encounter and loses {} gold.",
        state.player.name, lost
    ));
    state.terminate(Outcome::ForceExited);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Player,
    Monster,
}

fn apply_chances(
    state: &mut CombatState,
    catalog: &Catalog,
    rng: &mut dyn CombatRng,
    chances: &[EffectChance],
    side: Side,
    log: &mut Vec<String>,
) -> Result<(), ResolveError> {
    for entry in chances {
        if !rng.chance(entry.chance) {
            continue;
        }
        match side {
            Side::Player => apply_effect(&mut state.player, catalog, &entry.effect, log)?,
            Side::Monster => apply_effect(&mut state.monster, catalog, &entry.effect, log)?,
        }
    }
    Ok(())
}

fn heal_player(state: &mut CombatState, amount: u32, log: &mut Vec<String>) {
    let gained = state.player.heal(amount);
    log.push(format!("{} recovers {} HP.", state.player.name, gained));
}
