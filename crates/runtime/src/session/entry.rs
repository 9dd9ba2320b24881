//! One live encounter and the bookkeeping around it.

use combat_core::{CombatRng, CombatState, Settlement, finalize};

/// An encounter owned by the session map.
///
/// Only mutated while the per-player session lock is held.
pub(crate) struct CombatSession {
    pub(crate) state: CombatState,
    pub(crate) rng: Box<dyn CombatRng>,
    pub(crate) started_at_ms: u64,
    pub(crate) last_active_ms: u64,
    /// Final record of an ended encounter that has not been committed yet.
    pub(crate) pending: Option<Settlement>,
}

impl CombatSession {
    pub(crate) fn new(state: CombatState, rng: Box<dyn CombatRng>, now_ms: u64) -> Self {
        Self {
            state,
            rng,
            started_at_ms: now_ms,
            last_active_ms: now_ms,
            pending: None,
        }
    }

    pub(crate) fn is_idle(&self, now_ms: u64, idle_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_active_ms) >= idle_ms
    }

    /// Settlement to commit, computed once. Loot is rolled on the first call
    /// only, so a retried commit never re-rolls rewards.
    ///
    /// Returns `None` while the encounter is still ongoing.
    pub(crate) fn settlement(&mut self) -> Option<&Settlement> {
        if self.pending.is_none() {
            self.pending = finalize(&self.state, &mut *self.rng);
        }
        self.pending.as_ref()
    }
}
