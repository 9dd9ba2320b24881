//! Data-driven encounter content and loaders.
//!
//! This crate houses the static game tables and loads them from RON/TOML:
//! - status effects, skills, ultimates, items and monsters (RON)
//! - combat rules (TOML)
//!
//! Tables are assembled into a validated [`combat_core::Catalog`]; content
//! never appears in combat state except as ids and cloned templates.
//!
//! [`builtin_catalog`] parses the tables compiled into the binary, while
//! [`ContentFactory`] reads the same files from a data directory at runtime.

pub mod builtin;
pub mod loaders;

pub use builtin::{builtin_catalog, builtin_rules};
pub use loaders::{CatalogTables, ContentFactory, LoadResult, RulesLoader, TableLoader};
