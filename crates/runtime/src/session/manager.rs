//! Session map and the request flows that drive it.
//!
//! The map itself sits behind a std mutex that is never held across an
//! await. Each entry is an async mutex around the player's session; a request
//! holds that lock for its whole duration, including the follow-up monster
//! turn and the end-of-combat commit, so requests from one player are
//! serialized while different players proceed independently.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard};
use tracing::{debug, info, warn};

use combat_core::{
    Catalog, CombatAction, CombatEngine, CombatRng, CombatRules, PcgRng, PlayerId,
    ResolveContext, TurnOwner, begin, derive_session_seed,
};

use crate::api::{ActionReport, CombatError, CombatView, Result};
use crate::clock::Clock;
use crate::repository::PlayerStore;

use super::entry::CombatSession;

/// Builds the RNG for a new session from the player and a session counter.
pub type RngFactory = Arc<dyn Fn(&PlayerId, u64) -> Box<dyn CombatRng> + Send + Sync>;

type Slot = Arc<AsyncMutex<Option<CombatSession>>>;
type SlotGuard<'a> = AsyncMutexGuard<'a, Option<CombatSession>>;

/// Owns every active encounter, at most one per player.
pub struct SessionManager {
    catalog: Arc<Catalog>,
    store: Arc<dyn PlayerStore>,
    clock: Arc<dyn Clock>,
    rules: CombatRules,
    rng_factory: RngFactory,
    session_counter: AtomicU64,
    sessions: Mutex<HashMap<PlayerId, Slot>>,
}

impl SessionManager {
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn PlayerStore>,
        clock: Arc<dyn Clock>,
        rules: CombatRules,
        rng_factory: RngFactory,
    ) -> Self {
        Self {
            catalog,
            store,
            clock,
            rules,
            rng_factory,
            session_counter: AtomicU64::new(0),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// PCG generators seeded per session from `base_seed`.
    pub fn seeded_rng_factory(base_seed: u64) -> RngFactory {
        Arc::new(move |player: &PlayerId, session: u64| -> Box<dyn CombatRng> {
            Box::new(PcgRng::new(derive_session_seed(base_seed, player, session)))
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> CombatRules {
        self.rules
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions().len()
    }

    pub fn has_session(&self, player: &PlayerId) -> bool {
        self.sessions().contains_key(player)
    }

    /// Opens an encounter against `monster`.
    ///
    /// The slot is claimed before the store is touched, so a concurrent
    /// second start for the same player is rejected immediately. The claim is
    /// given back if the start fails or the request is dropped mid-load.
    pub async fn start(&self, player: &PlayerId, monster: &str) -> Result<CombatView> {
        let slot: Slot = Arc::new(AsyncMutex::new(None));
        let mut guard = {
            let mut sessions = self.sessions();
            if sessions.contains_key(player) {
                return Err(CombatError::AlreadyInCombat);
            }
            let guard = slot
                .clone()
                .try_lock_owned()
                .map_err(|_| CombatError::AlreadyInCombat)?;
            sessions.insert(player.clone(), slot.clone());
            guard
        };
        let claim = SlotClaim {
            manager: self,
            player,
            slot: &slot,
            kept: false,
        };

        match self.open(player, monster).await {
            Ok(session) => {
                let view = self.view(&session);
                info!(
                    "Combat started: {} vs {} (Lv {})",
                    player, session.state.monster.name, session.state.monster.level
                );
                *guard = Some(session);
                claim.keep();
                Ok(view)
            }
            Err(err) => {
                drop(guard);
                drop(claim);
                debug!("Combat start for {} rejected: {}", player, err);
                Err(err)
            }
        }
    }

    async fn open(&self, player: &PlayerId, monster: &str) -> Result<CombatSession> {
        let record = self
            .store
            .load(player)
            .await?
            .ok_or(CombatError::NoCharacter)?;
        let template = self.catalog.get_monster(monster)?;
        let state = begin(player.clone(), &record, template, self.rules);

        let mut marked = record;
        marked.in_combat = true;
        self.store.commit(player, &marked).await?;

        let counter = self.session_counter.fetch_add(1, Ordering::Relaxed);
        let rng = (self.rng_factory)(player, counter);
        Ok(CombatSession::new(state, rng, self.clock.now_ms()))
    }

    /// Resolves one player action and, if it passed the turn, exactly one
    /// monster turn.
    ///
    /// A session whose final commit failed earlier retries that commit
    /// instead of taking a new action.
    pub async fn submit(&self, player: &PlayerId, action: &CombatAction) -> Result<ActionReport> {
        let slot = self.slot(player)?;
        let mut guard = slot.lock().await;
        let session = guard.as_mut().ok_or(CombatError::NotInCombat)?;

        if session.pending.is_some() {
            return self.finish(player, &slot, &mut guard, Vec::new()).await;
        }
        if session.state.turn == TurnOwner::Monster {
            return Err(CombatError::NotYourTurn);
        }

        let now = self.clock.now_ms();
        let mut log = Vec::new();
        {
            let CombatSession { state, rng, .. } = &mut *session;
            let mut ctx = ResolveContext::new(&self.catalog, &mut **rng, now);
            let mut engine = CombatEngine::new(state);

            let resolution = engine.apply(&mut ctx, action)?;
            log.extend(resolution.log);
            if resolution.turn_passed {
                let monster_turn = engine.advance_monster_turn(&mut ctx)?;
                log.extend(monster_turn.log);
            }
        }
        session.last_active_ms = now;
        debug!("{} used {} ({} log lines)", player, action, log.len());

        if session.state.is_over() {
            return self.finish(player, &slot, &mut guard, log).await;
        }

        Ok(ActionReport {
            view: self.view(session),
            log,
            rewards: None,
        })
    }

    /// Heavy-penalty escape. Accepted whenever a session exists, whoever's
    /// turn it is.
    pub async fn force_exit(&self, player: &PlayerId) -> Result<ActionReport> {
        let slot = self.slot(player)?;
        let mut guard = slot.lock().await;
        let session = guard.as_mut().ok_or(CombatError::NotInCombat)?;

        let mut log = Vec::new();
        if session.pending.is_none() {
            log = CombatEngine::new(&mut session.state).force_exit()?.log;
            info!("{} force-exited combat", player);
        }
        self.finish(player, &slot, &mut guard, log).await
    }

    /// Current view of the player's encounter. Does not change any state.
    pub async fn describe(&self, player: &PlayerId) -> Result<CombatView> {
        let slot = self.slot(player)?;
        let guard = slot.lock().await;
        let session = guard.as_ref().ok_or(CombatError::NotInCombat)?;
        Ok(self.view(session))
    }

    /// Re-attempts a failed end-of-combat commit.
    ///
    /// On an encounter that is still running this is a no-op returning the
    /// current view.
    pub async fn retry_commit(&self, player: &PlayerId) -> Result<ActionReport> {
        let slot = self.slot(player)?;
        let mut guard = slot.lock().await;
        let session = guard.as_ref().ok_or(CombatError::NotInCombat)?;

        if session.pending.is_none() && !session.state.is_over() {
            return Ok(ActionReport {
                view: self.view(session),
                log: Vec::new(),
                rewards: None,
            });
        }
        self.finish(player, &slot, &mut guard, Vec::new()).await
    }

    /// Ends every session idle for at least `idle_for` as force-exited,
    /// without the force-exit penalty. Sessions currently locked by a request
    /// are skipped and empty slots are dropped. Returns how many sessions
    /// were closed and committed.
    pub async fn sweep_abandoned(&self, idle_for: Duration) -> usize {
        let now = self.clock.now_ms();
        let idle_ms = u64::try_from(idle_for.as_millis()).unwrap_or(u64::MAX);
        let slots: Vec<(PlayerId, Slot)> = self
            .sessions()
            .iter()
            .map(|(player, slot)| (player.clone(), slot.clone()))
            .collect();

        let mut swept = 0;
        for (player, slot) in slots {
            let Ok(mut guard) = slot.try_lock() else {
                continue;
            };
            let Some(session) = guard.as_mut() else {
                drop(guard);
                self.release(&player, &slot);
                continue;
            };
            if !session.is_idle(now, idle_ms) {
                continue;
            }

            let mut log = Vec::new();
            if session.pending.is_none() {
                match CombatEngine::new(&mut session.state).abandon() {
                    Ok(resolution) => log = resolution.log,
                    Err(err) => {
                        warn!("Could not abandon session for {}: {}", player, err);
                        continue;
                    }
                }
            }

            match self.finish(&player, &slot, &mut guard, log).await {
                Ok(_) => {
                    warn!("Swept abandoned session for {}", player);
                    swept += 1;
                }
                Err(err) => warn!("Abandoned session for {} not committed: {}", player, err),
            }
        }
        swept
    }

    /// Commits an ended encounter and drops the session.
    ///
    /// On a store failure the session stays in the map with its settlement
    /// cached, and the player's stored `in_combat` flag is still set, so both
    /// sides agree the player is in combat until a retry succeeds.
    async fn finish(
        &self,
        player: &PlayerId,
        slot: &Slot,
        guard: &mut SlotGuard<'_>,
        log: Vec<String>,
    ) -> Result<ActionReport> {
        let session = guard.as_mut().ok_or(CombatError::NotInCombat)?;
        let settlement = session
            .settlement()
            .cloned()
            .ok_or(CombatError::NotInCombat)?;

        if let Err(err) = self.store.commit(player, &settlement.record).await {
            warn!(
                "Commit for {} failed, keeping session for retry: {}",
                player, err
            );
            return Err(err.into());
        }

        let view = self.view(session);
        let elapsed_ms = self.clock.now_ms().saturating_sub(session.started_at_ms);
        **guard = None;
        self.release(player, slot);

        info!(
            "Combat ended for {}: {} after {} monster turns ({} ms)",
            player, settlement.outcome, view.turn_count, elapsed_ms
        );
        Ok(ActionReport {
            view,
            log,
            rewards: settlement.rewards,
        })
    }

    fn view(&self, session: &CombatSession) -> CombatView {
        CombatView::from_state(&session.state, &self.catalog, self.clock.now_ms())
    }

    fn slot(&self, player: &PlayerId) -> Result<Slot> {
        self.sessions()
            .get(player)
            .cloned()
            .ok_or(CombatError::NotInCombat)
    }

    /// Removes `player`'s entry if it is still `slot`.
    fn release(&self, player: &PlayerId, slot: &Slot) {
        let mut sessions = self.sessions();
        if sessions
            .get(player)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
        {
            sessions.remove(player);
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<PlayerId, Slot>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A start's hold on a freshly inserted slot. Unless kept, dropping it
/// removes the slot from the map again.
struct SlotClaim<'a> {
    manager: &'a SessionManager,
    player: &'a PlayerId,
    slot: &'a Slot,
    kept: bool,
}

impl SlotClaim<'_> {
    fn keep(mut self) {
        self.kept = true;
    }
}

impl Drop for SlotClaim<'_> {
    fn drop(&mut self) {
        if !self.kept {
            self.manager.release(self.player, self.slot);
        }
    }
}
