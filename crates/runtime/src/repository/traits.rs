//! Player Store contract.

use async_trait::async_trait;

use combat_core::{PlayerId, PlayerRecord};

use super::Result;

/// Persistent store of player records.
///
/// Implementations must round-trip every field of the record, including the
/// unknown keys carried in its `extra` maps.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Load a player's record, or `None` if the player has no character.
    async fn load(&self, player: &PlayerId) -> Result<Option<PlayerRecord>>;

    /// Replace a player's record.
    async fn commit(&self, player: &PlayerId, record: &PlayerRecord) -> Result<()>;
}
