//! Session orchestration for turn-based combat encounters.
//!
//! This crate wires the deterministic rules in `combat-core` to the outside
//! world: a per-player session map, the Player Store, wall-clock time and a
//! background sweeper. Front-ends embed [`Runtime`] and talk to it through
//! [`CombatService`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types front-ends interact with
//! - [`session`] owns live encounters and the request flows
//! - [`repository`] provides Player Store adapters
//! - [`clock`] abstracts wall-clock time
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod clock;
pub mod repository;
pub mod runtime;
pub mod session;

mod workers;

pub use api::{
    ActionReport, CombatError, CombatService, CombatView, EffectView, MonsterView,
    ParticipantView, Result, RuntimeError,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use repository::{InMemoryPlayerStore, JsonFileStore, PlayerStore, StoreError};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use session::{RngFactory, SessionManager};
