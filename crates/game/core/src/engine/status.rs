//! Status effect application, ticking and stat modifiers.

use crate::catalog::{Catalog, CatalogMiss, EffectCategory, EffectId, EffectKind, Reapply, StatKind};
use crate::state::{ActiveEffects, Combatant, EffectInstance};

/// Applies `effect` to `holder` using the reapplication policy of its kind.
///
/// Stacking effects that reach their maximum clear themselves and apply their
/// trigger instead.
pub(super) fn apply_effect<C: Combatant + ?Sized>(
    holder: &mut C,
    catalog: &Catalog,
    effect: &EffectId,
    log: &mut Vec<String>,
) -> Result<(), CatalogMiss> {
    let definition = catalog.get_effect(effect.as_str())?;

    match definition.kind.reapply() {
        Reapply::Refresh => {
            holder.effects_mut().insert(
                effect.clone(),
                EffectInstance::new(definition.duration, definition.kind.magnitude()),
            );
            log.push(format!("{} is affected by {}.", holder.name(), definition.name));
        }
        Reapply::Stack {
            max_stacks,
            trigger,
        } => {
            let stacks = holder
                .effects()
                .get(effect)
                .and_then(|instance| instance.stacks)
                .unwrap_or(0)
                + 1;
            if stacks >= max_stacks {
                holder.effects_mut().remove(effect);
                log.push(format!(
                    "{} on {} reaches {} stacks!",
                    definition.name,
                    holder.name(),
                    max_stacks
                ));
                apply_effect(holder, catalog, trigger, log)?;
            } else {
                holder
                    .effects_mut()
                    .insert(effect.clone(), EffectInstance::stacked(definition.duration, stacks));
                log.push(format!(
                    "{} on {}: {}/{} stacks.",
                    definition.name,
                    holder.name(),
                    stacks,
                    max_stacks
                ));
            }
        }
    }
    Ok(())
}

/// What a tick asks the caller to do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct TickReport {
    pub skip_turn: bool,
}

/// Runs one start-of-turn tick for every effect on `holder`.
///
/// Payloads fire, durations drop by one and expired instances are removed.
/// Effects missing from the catalog are left untouched. With `hold_skips`
/// set, skip-turn effects neither fire nor age.
pub(super) fn tick_effects<C: Combatant + ?Sized>(
    holder: &mut C,
    catalog: &Catalog,
    hold_skips: bool,
    log: &mut Vec<String>,
) -> TickReport {
    let mut report = TickReport::default();
    let ids: Vec<EffectId> = holder.effects().keys().cloned().collect();

    for id in ids {
        let Ok(definition) = catalog.get_effect(id.as_str()) else {
            continue;
        };
        let Some(magnitude) = holder.effects().get(&id).map(|instance| instance.magnitude) else {
            continue;
        };

        match definition.kind {
            EffectKind::DamageOverTime { .. } => {
                let amount = percent_of(holder.max_hp(), magnitude).max(1);
                let lost = holder.take_damage(amount);
                log.push(format!(
                    "{} takes {} damage from {}.",
                    holder.name(),
                    lost,
                    definition.name
                ));
            }
            EffectKind::HealOverTime { .. } => {
                let amount = percent_of(holder.max_hp(), magnitude);
                let gained = holder.heal(amount);
                if gained > 0 {
                    log.push(format!(
                        "{} recovers {} HP from {}.",
                        holder.name(),
                        gained,
                        definition.name
                    ));
                }
            }
            EffectKind::SkipTurn if hold_skips => continue,
            EffectKind::SkipTurn => {
                report.skip_turn = true;
                log.push(format!("{} is held by {}!", holder.name(), definition.name));
            }
            EffectKind::StatModifier { .. } | EffectKind::Stacking { .. } => {}
        }

        let effects = holder.effects_mut();
        if let Some(instance) = effects.get_mut(&id) {
            instance.duration = instance.duration.saturating_sub(1);
            if instance.duration == 0 {
                effects.remove(&id);
                log.push(format!("{} wears off.", definition.name));
            }
        }
    }

    report
}

/// Sum of active modifier percentages for `stat`.
pub(super) fn modifier_percent(effects: &ActiveEffects, catalog: &Catalog, stat: StatKind) -> i32 {
    effects
        .iter()
        .filter_map(|(id, instance)| match catalog.get_effect(id.as_str()).ok()?.kind {
            EffectKind::StatModifier { stat: kind, .. } if kind == stat => Some(instance.magnitude),
            _ => None,
        })
        .fold(0i32, i32::saturating_add)
}

/// Removes every effect whose catalog category matches `remove`.
///
/// Returns the names of the effects removed.
pub(super) fn purge<C: Combatant + ?Sized>(
    holder: &mut C,
    catalog: &Catalog,
    remove: impl Fn(EffectCategory) -> bool,
) -> Vec<String> {
    let mut removed = Vec::new();
    holder.effects_mut().retain(|id, _| {
        match catalog.get_effect(id.as_str()) {
            Ok(definition) if remove(definition.category) => {
                removed.push(definition.name.clone());
                false
            }
            _ => true,
        }
    });
    removed
}

/// `value` scaled by `100 + percent` percent, floored at zero.
pub(super) fn scale(value: u32, percent: i32) -> u32 {
    let factor = (100 + i64::from(percent)).max(0) as u64;
    u32::try_from(u64::from(value) * factor / 100).unwrap_or(u32::MAX)
}

fn percent_of(value: u32, percent: i32) -> u32 {
    let percent = u64::try_from(percent).unwrap_or(0);
    u32::try_from(u64::from(value) * percent / 100).unwrap_or(u32::MAX)
}
