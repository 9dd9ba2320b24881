//! Public runtime API surface.
//!
//! This module gathers the types exposed to front-ends so the session and
//! worker layers can stay focused on orchestration.

pub mod errors;
pub mod service;
pub mod view;

pub use errors::{CombatError, Result, RuntimeError};
pub use service::CombatService;
pub use view::{ActionReport, CombatView, EffectView, MonsterView, ParticipantView};
