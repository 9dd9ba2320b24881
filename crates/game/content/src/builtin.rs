//! Tables compiled into the binary from `data/`.

use combat_core::{Catalog, CombatRules, DamageType};

use crate::loaders::{CatalogTables, LoadResult, RulesLoader, TableLoader};

const EFFECTS: &str = include_str!("../data/effects.ron");
const SKILLS: &str = include_str!("../data/skills.ron");
const ULTIMATES: &str = include_str!("../data/ultimates.ron");
const ITEMS: &str = include_str!("../data/items.ron");
const MONSTERS: &str = include_str!("../data/monsters.ron");
const RULES: &str = include_str!("../data/rules.toml");

/// The bundled catalog, parsed and validated.
pub fn builtin_catalog() -> LoadResult<Catalog> {
    CatalogTables {
        effects: TableLoader::parse_effects(EFFECTS)?,
        skills: TableLoader::parse_skills(SKILLS)?,
        ultimates: TableLoader::parse_ultimates(ULTIMATES)?,
        items: TableLoader::parse_items(ITEMS)?,
        monsters: TableLoader::parse_monsters(MONSTERS)?,
    }
    .into_catalog()
}

/// The bundled `rules.toml`.
pub fn builtin_rules() -> LoadResult<CombatRules> {
    RulesLoader::parse(RULES)
}

/// Damage types with at least one monster weak to them.
pub fn covered_weaknesses(catalog: &Catalog) -> Vec<DamageType> {
    let mut types: Vec<_> = catalog.monsters().map(|m| m.weakness).collect();
    types.sort();
    types.dedup();
    types
}
