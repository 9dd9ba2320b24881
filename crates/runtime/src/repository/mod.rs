//! Player Store layer.
//!
//! The store holds the persistent [`PlayerRecord`](combat_core::PlayerRecord)
//! documents owned by the surrounding bot. Combat touches it exactly twice per
//! encounter: one load when the session starts and one commit when it ends.
//! Static encounter content lives in the catalog, not here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{Result, StoreError};
pub use file::JsonFileStore;
pub use memory::InMemoryPlayerStore;
pub use traits::PlayerStore;
