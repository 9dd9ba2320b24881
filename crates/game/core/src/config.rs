use serde::{Deserialize, Serialize};

/// Combat tuning constants and per-encounter parameters.
///
/// Compile-time constants are the balance numbers every encounter shares;
/// the struct fields are the knobs a deployment may override (loaded from
/// `rules.toml` or the environment).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatRules {
    /// Upper bound of the shared skill-point pool.
    pub max_sp: u32,
    /// Skill points available when an encounter begins.
    pub initial_sp: u32,
    /// Skill points regenerated every time the turn returns to the player.
    pub sp_regen: u32,
    /// Number of log lines retained in the combat state.
    pub log_capacity: usize,
    /// Minimum wall-clock gap between two consumables.
    pub consumable_cooldown_ms: u64,
}

impl CombatRules {
    // ===== balance constants =====
    pub const MAX_ULTIMATE_ENERGY: u32 = 100;

    pub const BASIC_ATTACK_BASE: i64 = 20;
    pub const BASIC_ULTIMATE_GAIN: u32 = 10;
    pub const BASIC_TOUGHNESS_DAMAGE: u32 = 10;
    /// Basic attack and skill roll window around their base damage.
    pub const STRIKE_SPREAD: (i64, i64) = (-5, 8);
    /// Ultimate roll window around its base damage.
    pub const ULTIMATE_SPREAD: (i64, i64) = (-10, 20);
    /// Monster attack roll window around its attack stat.
    pub const MONSTER_SPREAD: (i64, i64) = (-5, 10);
    /// Skill points granted by a basic attack, inclusive range.
    pub const BASIC_SP_GAIN: (i64, i64) = (1, 2);

    // Multipliers are whole percentages so damage stays integral.
    pub const CRIT_PERCENT: u32 = 150;
    pub const BASIC_BREAK_PERCENT: u32 = 130;
    pub const SKILL_BREAK_PERCENT: u32 = 150;
    pub const ULTIMATE_BREAK_PERCENT: u32 = 180;

    /// Monster turns skipped after toughness is depleted.
    pub const BREAK_DURATION: u32 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_SP: u32 = 10;
    pub const DEFAULT_INITIAL_SP: u32 = 5;
    pub const DEFAULT_SP_REGEN: u32 = 2;
    pub const DEFAULT_LOG_CAPACITY: usize = 8;
    pub const DEFAULT_CONSUMABLE_COOLDOWN_MS: u64 = 1_000;

    pub const fn new() -> Self {
        Self {
            max_sp: Self::DEFAULT_MAX_SP,
            initial_sp: Self::DEFAULT_INITIAL_SP,
            sp_regen: Self::DEFAULT_SP_REGEN,
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
            consumable_cooldown_ms: Self::DEFAULT_CONSUMABLE_COOLDOWN_MS,
        }
    }

    /// Same rules with a different skill-point pool.
    pub const fn with_skill_points(mut self, initial_sp: u32, max_sp: u32) -> Self {
        self.initial_sp = initial_sp;
        self.max_sp = max_sp;
        self
    }
}

impl Default for CombatRules {
    fn default() -> Self {
        Self::new()
    }
}
