//! Content factory for building the catalog from data files.

use std::path::{Path, PathBuf};

use combat_core::{Catalog, CombatRules};

use crate::loaders::{CatalogTables, LoadResult, RulesLoader, TableLoader};

/// Content factory that loads all encounter content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// ├── effects.ron
/// ├── skills.ron
/// ├── ultimates.ron
/// ├── items.ron
/// └── monsters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat rules from `rules.toml`.
    pub fn load_rules(&self) -> LoadResult<CombatRules> {
        RulesLoader::load(&self.data_dir.join("rules.toml"))
    }

    /// Parse every catalog table without cross-validation.
    pub fn load_tables(&self) -> LoadResult<CatalogTables> {
        Ok(CatalogTables {
            effects: TableLoader::load_effects(&self.data_dir.join("effects.ron"))?,
            skills: TableLoader::load_skills(&self.data_dir.join("skills.ron"))?,
            ultimates: TableLoader::load_ultimates(&self.data_dir.join("ultimates.ron"))?,
            items: TableLoader::load_items(&self.data_dir.join("items.ron"))?,
            monsters: TableLoader::load_monsters(&self.data_dir.join("monsters.ron"))?,
        })
    }

    /// Load and validate the full catalog.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        self.load_tables()?.into_catalog()
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
