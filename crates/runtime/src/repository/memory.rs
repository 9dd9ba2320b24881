//! In-memory PlayerStore implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use combat_core::{PlayerId, PlayerRecord};

use super::{PlayerStore, Result, StoreError};

/// In-memory implementation of [`PlayerStore`].
#[derive(Debug, Default)]
pub struct InMemoryPlayerStore {
    records: RwLock<HashMap<PlayerId, PlayerRecord>>,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a set of records.
    pub fn with_records(records: impl IntoIterator<Item = (PlayerId, PlayerRecord)>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
        }
    }

    /// Insert or replace a record without going through the async API.
    pub fn insert(&self, player: PlayerId, record: PlayerRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        records.insert(player, record);
        Ok(())
    }

    /// Current record for `player`, if any.
    pub fn get(&self, player: &PlayerId) -> Result<Option<PlayerRecord>> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.get(player).cloned())
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    async fn load(&self, player: &PlayerId) -> Result<Option<PlayerRecord>> {
        self.get(player)
    }

    async fn commit(&self, player: &PlayerId, record: &PlayerRecord) -> Result<()> {
        self.insert(player.clone(), record.clone())
    }
}
