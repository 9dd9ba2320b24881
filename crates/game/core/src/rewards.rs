//! Commit-on-end: turning a finished encounter into the record to store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::ItemId;
use crate::progression::apply_level_ups;
use crate::rng::CombatRng;
use crate::state::{CombatState, Outcome, PlayerRecord};

/// What a victory paid out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub xp: u64,
    pub gold: u64,
    pub drops: BTreeMap<ItemId, u32>,
    pub levels_gained: u32,
    pub new_level: u32,
}

/// The record to commit plus the victory payout, if any.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub outcome: Outcome,
    pub record: PlayerRecord,
    pub rewards: Option<Rewards>,
}

/// Gold lost when fleeing: 10%, at least 1, never more than held.
pub fn flee_penalty(gold: u64) -> u64 {
    (gold / 10).max(1).min(gold)
}

/// Gold lost on defeat: 15%, at least 1, never more than held.
pub fn defeat_penalty(gold: u64) -> u64 {
    (gold.saturating_mul(15) / 100).max(1).min(gold)
}

/// Gold lost on force exit: 30%, at least 10, never more than held.
pub fn force_exit_penalty(gold: u64) -> u64 {
    (gold.saturating_mul(3) / 10).max(10).min(gold)
}

/// Level multiplier in tenths: level 1 is 10 (x1.0), level 10 is 19 (x1.9).
pub fn level_multiplier_tenths(level: u32) -> u64 {
    10 + u64::from(level.saturating_sub(1))
}

/// Builds the record to commit for a finished encounter.
///
/// Victory pays scaled XP and gold, rolls every loot entry in item-id order
/// and runs the level-up check. Defeat takes its gold penalty and leaves a
/// quarter of max HP. Flee and force-exit penalties were already applied by
/// the resolver. In every case ultimate energy is cleared and `in_combat`
/// is reset.
///
/// Returns `None` while the encounter is still ongoing.
pub fn finalize(state: &CombatState, rng: &mut dyn CombatRng) -> Option<Settlement> {
    if !state.is_over() {
        return None;
    }

    let mut record = state.player.record.clone();
    let mut rewards = None;

    match state.outcome {
        Outcome::Victory => {
            let multiplier = level_multiplier_tenths(record.level);
            let xp = state.monster.xp_reward.saturating_mul(multiplier) / 10;
            let gold = state.monster.gold_reward.saturating_mul(multiplier) / 10;
            record.xp = record.xp.saturating_add(xp);
            record.gold = record.gold.saturating_add(gold);

            let mut drops = BTreeMap::new();
            for (item, chance) in &state.monster.loot {
                if rng.chance(*chance) {
                    record.add_item(item.clone(), 1);
                    *drops.entry(item.clone()).or_insert(0) += 1;
                }
            }

            let levels_gained = apply_level_ups(&mut record);
            rewards = Some(Rewards {
                xp,
                gold,
                drops,
                levels_gained,
                new_level: record.level,
            });
        }
        Outcome::Defeat => {
            record.gold -= defeat_penalty(record.gold);
            record.resources.hp = (record.resources.max_hp / 4).max(1);
        }
        Outcome::Fled | Outcome::ForceExited | Outcome::Ongoing => {}
    }

    record.resources.ultimate_energy = 0;
    record.in_combat = false;

    Some(Settlement {
        outcome: state.outcome,
        record,
        rewards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penalties_round_and_saturate() {
        assert_eq!(flee_penalty(0), 0);
        assert_eq!(flee_penalty(5), 1);
        assert_eq!(flee_penalty(250), 25);

        assert_eq!(defeat_penalty(1000), 150);
        assert_eq!(defeat_penalty(3), 1);
        assert_eq!(defeat_penalty(0), 0);

        assert_eq!(force_exit_penalty(200), 60);
        assert_eq!(force_exit_penalty(20), 10);
        assert_eq!(force_exit_penalty(4), 4);
    }

    #[test]
    fn multiplier_scales_by_level() {
        assert_eq!(level_multiplier_tenths(1), 10);
        assert_eq!(level_multiplier_tenths(10), 19);
        assert_eq!(100 * level_multiplier_tenths(10) / 10, 190);
        assert_eq!(50 * level_multiplier_tenths(10) / 10, 95);
    }
}
