//! Combat rules loader.

use std::path::Path;

use combat_core::CombatRules;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat rules from TOML files.
pub struct RulesLoader;

impl RulesLoader {
    /// Parse rules from TOML text. Missing keys keep their defaults.
    pub fn parse(source: &str) -> LoadResult<CombatRules> {
        let rules: CombatRules = toml::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;
        if rules.initial_sp > rules.max_sp {
            anyhow::bail!(
                "initial_sp ({}) exceeds max_sp ({})",
                rules.initial_sp,
                rules.max_sp
            );
        }
        Ok(rules)
    }

    /// Load rules from a TOML file.
    pub fn load(path: &Path) -> LoadResult<CombatRules> {
        Self::parse(&read_file(path)?)
    }
}
