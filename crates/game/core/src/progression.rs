//! Level curve and derived-stat formulas.

use crate::state::PlayerRecord;

/// Unallocated points granted per level gained.
pub const POINTS_PER_LEVEL: u32 = 3;

/// XP needed to advance from `level`: `floor(100 * level^1.5)`.
///
/// Computed as `isqrt(10_000 * level^3)` to stay exact.
pub fn xp_threshold(level: u32) -> u64 {
    let level = u128::from(level.max(1));
    let exact = (10_000 * level * level * level).isqrt();
    u64::try_from(exact).unwrap_or(u64::MAX)
}

/// Recomputes derived stats and resource maxima from the core stats.
///
/// Current HP and mana are clamped to the new maxima but never raised.
pub fn recompute_derived(record: &mut PlayerRecord) {
    let stats = &record.stats;
    let derived = &mut record.derived_stats;
    derived.attack = 10 + stats.strength * 2;
    derived.magic_attack = 10 + stats.intelligence * 2;
    derived.defense = 5 + stats.constitution;
    derived.critical_chance = 0.05 + f64::from(stats.dexterity) * 0.01;
    derived.dodge_chance = f64::from(stats.dexterity) * 0.005;

    let resources = &mut record.resources;
    resources.max_hp = 100 + stats.constitution * 10;
    resources.max_mana = 50 + stats.intelligence * 5;
    resources.hp = resources.hp.min(resources.max_hp);
    resources.mana = resources.mana.min(resources.max_mana);
}

/// Applies every level-up the record's XP pays for.
///
/// Each level costs its threshold in XP and grants unallocated points plus
/// one strength and one constitution. Returns the number of levels gained;
/// when non-zero the player ends fully healed.
pub fn apply_level_ups(record: &mut PlayerRecord) -> u32 {
    let mut gained = 0;
    loop {
        let threshold = xp_threshold(record.level);
        if record.xp < threshold {
            break;
        }
        record.xp -= threshold;
        record.level += 1;
        record.unallocated_points += POINTS_PER_LEVEL;
        record.stats.strength += 1;
        record.stats.constitution += 1;

        let old_hp = record.resources.max_hp;
        let old_mana = record.resources.max_mana;
        recompute_derived(record);
        let resources = &mut record.resources;
        resources.hp = (resources.hp + resources.max_hp.saturating_sub(old_hp)).min(resources.max_hp);
        resources.mana =
            (resources.mana + resources.max_mana.saturating_sub(old_mana)).min(resources.max_mana);
        gained += 1;
    }

    if gained > 0 {
        record.resources.hp = record.resources.max_hp;
        record.resources.mana = record.resources.max_mana;
    }
    gained
}
