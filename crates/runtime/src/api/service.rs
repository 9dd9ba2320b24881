//! Cloneable façade front-ends call into.
//!
//! [`CombatService`] is the whole request surface: three state-changing
//! calls (`start_combat`, `submit_action`, `force_exit`), the pure
//! `describe`, and `retry_commit` for encounters whose final commit failed.
//! Every call returns data or a tagged [`CombatError`](super::CombatError).
use std::sync::Arc;

use combat_core::{Catalog, CombatAction, PlayerId};

use super::errors::Result;
use super::view::{ActionReport, CombatView};
use crate::session::SessionManager;

/// Client-facing handle to the session manager.
#[derive(Clone)]
pub struct CombatService {
    sessions: Arc<SessionManager>,
}

impl CombatService {
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }

    /// Open an encounter against `monster_id`.
    pub async fn start_combat(&self, player: &PlayerId, monster_id: &str) -> Result<CombatView> {
        self.sessions.start(player, monster_id).await
    }

    /// Resolve a player action plus the monster's reply.
    pub async fn submit_action(
        &self,
        player: &PlayerId,
        action: &CombatAction,
    ) -> Result<ActionReport> {
        self.sessions.submit(player, action).await
    }

    /// Leave the encounter immediately with the force-exit penalty.
    pub async fn force_exit(&self, player: &PlayerId) -> Result<ActionReport> {
        self.sessions.force_exit(player).await
    }

    /// Current encounter view (read-only).
    pub async fn describe(&self, player: &PlayerId) -> Result<CombatView> {
        self.sessions.describe(player).await
    }

    /// Retry a commit that failed when the encounter ended.
    pub async fn retry_commit(&self, player: &PlayerId) -> Result<ActionReport> {
        self.sessions.retry_commit(player).await
    }

    pub fn catalog(&self) -> &Catalog {
        self.sessions.catalog()
    }

    /// Get a reference to the session manager for advanced usage
    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }
}
