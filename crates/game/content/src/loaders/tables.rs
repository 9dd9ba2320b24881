//! Catalog table loaders.
//!
//! Each RON file holds one named list, e.g. `(effects: [ ... ])`. Tables are
//! parsed independently and validated together in
//! [`CatalogTables::into_catalog`], since cross references span files.

use std::path::Path;

use combat_core::catalog::{
    EffectDefinition, ItemDefinition, MonsterTemplate, SkillDefinition, UltimateDefinition,
};
use combat_core::Catalog;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Deserialize)]
struct EffectTable {
    effects: Vec<EffectDefinition>,
}

#[derive(Debug, Deserialize)]
struct SkillTable {
    skills: Vec<SkillDefinition>,
}

#[derive(Debug, Deserialize)]
struct UltimateTable {
    ultimates: Vec<UltimateDefinition>,
}

#[derive(Debug, Deserialize)]
struct ItemTable {
    items: Vec<ItemDefinition>,
}

#[derive(Debug, Deserialize)]
struct MonsterTable {
    monsters: Vec<MonsterTemplate>,
}

/// Loader for the individual RON tables.
pub struct TableLoader;

impl TableLoader {
    pub fn parse_effects(source: &str) -> LoadResult<Vec<EffectDefinition>> {
        parse::<EffectTable>(source, "effect table").map(|t| t.effects)
    }

    pub fn parse_skills(source: &str) -> LoadResult<Vec<SkillDefinition>> {
        parse::<SkillTable>(source, "skill table").map(|t| t.skills)
    }

    pub fn parse_ultimates(source: &str) -> LoadResult<Vec<UltimateDefinition>> {
        parse::<UltimateTable>(source, "ultimate table").map(|t| t.ultimates)
    }

    pub fn parse_items(source: &str) -> LoadResult<Vec<ItemDefinition>> {
        parse::<ItemTable>(source, "item table").map(|t| t.items)
    }

    pub fn parse_monsters(source: &str) -> LoadResult<Vec<MonsterTemplate>> {
        parse::<MonsterTable>(source, "monster table").map(|t| t.monsters)
    }

    /// Load the effect table from a RON file.
    pub fn load_effects(path: &Path) -> LoadResult<Vec<EffectDefinition>> {
        Self::parse_effects(&read_file(path)?)
    }

    pub fn load_skills(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        Self::parse_skills(&read_file(path)?)
    }

    pub fn load_ultimates(path: &Path) -> LoadResult<Vec<UltimateDefinition>> {
        Self::parse_ultimates(&read_file(path)?)
    }

    pub fn load_items(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        Self::parse_items(&read_file(path)?)
    }

    pub fn load_monsters(path: &Path) -> LoadResult<Vec<MonsterTemplate>> {
        Self::parse_monsters(&read_file(path)?)
    }
}

fn parse<T: DeserializeOwned>(source: &str, what: &str) -> LoadResult<T> {
    ron::from_str(source).map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}

/// Every catalog table, parsed but not yet cross-validated.
#[derive(Debug, Clone, Default)]
pub struct CatalogTables {
    pub effects: Vec<EffectDefinition>,
    pub skills: Vec<SkillDefinition>,
    pub ultimates: Vec<UltimateDefinition>,
    pub items: Vec<ItemDefinition>,
    pub monsters: Vec<MonsterTemplate>,
}

impl CatalogTables {
    /// Validates cross references and builds the shared catalog.
    pub fn into_catalog(self) -> LoadResult<Catalog> {
        Catalog::builder()
            .effects(self.effects)
            .skills(self.skills)
            .ultimates(self.ultimates)
            .items(self.items)
            .monsters(self.monsters)
            .build()
            .map_err(|e| anyhow::anyhow!("Catalog validation failed: {}", e))
    }
}
