//! Deterministic turn-based combat rules.
//!
//! `combat-core` defines the catalog tables, the in-memory combat state and
//! the resolver that transforms it. Nothing here performs I/O or reads a
//! clock: the runtime passes in time and randomness, so a given seed and
//! action sequence always produce the same encounter. All state mutation
//! flows through [`engine::CombatEngine`].
pub mod action;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod progression;
pub mod rewards;
pub mod rng;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{CombatAction, IllegalReason, LegalAction, legal_actions, validate};
pub use catalog::{
    Catalog, CatalogBuilder, CatalogError, CatalogMiss, ClassTag, DamageType, EffectId, ItemId,
    MonsterId, MonsterTemplate, PlayerId, SkillId,
};
pub use config::CombatRules;
pub use engine::{CombatEngine, Resolution, ResolveContext, ResolveError, TransitionPhase, begin};
pub use error::{ErrorSeverity, GameError};
pub use rewards::{Rewards, Settlement, finalize};
pub use rng::{CombatRng, MidpointRng, PcgRng, derive_session_seed};
pub use state::{
    CombatState, Combatant, EffectInstance, MonsterCombatant, Outcome, PlayerCombatant,
    PlayerRecord, TurnOwner,
};
