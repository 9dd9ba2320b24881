//! Immutable lookup tables shared by every encounter.
//!
//! A [`Catalog`] is assembled once through [`CatalogBuilder`], validated as a
//! whole, and then shared read-only (typically behind an `Arc`). Lookups
//! return [`CatalogMiss`] instead of `Option` so the resolver can propagate
//! holes with `?`.
mod effects;
mod error;
mod ids;
mod items;
mod monsters;
mod skills;

use std::collections::BTreeMap;

pub use effects::{EffectCategory, EffectDefinition, EffectKind, Reapply, StatKind};
pub use error::{CatalogError, CatalogMiss};
pub use ids::{ClassTag, EffectId, ItemId, MonsterId, PlayerId, SkillId};
pub use items::{ConsumableEffect, ItemDefinition, ItemKind};
pub use monsters::{MonsterSkill, MonsterTemplate};
pub use skills::{DamageType, EffectChance, SkillDefinition, UltimateDefinition};

/// Validated, read-only game tables.
///
/// Tables are ordered maps so that every enumeration (legal actions, loot
/// rolls) happens in a stable order and stays reproducible under a seed.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    monsters: BTreeMap<MonsterId, MonsterTemplate>,
    skills: BTreeMap<SkillId, SkillDefinition>,
    effects: BTreeMap<EffectId, EffectDefinition>,
    ultimates: BTreeMap<ClassTag, UltimateDefinition>,
    items: BTreeMap<ItemId, ItemDefinition>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn get_monster(&self, id: &str) -> Result<&MonsterTemplate, CatalogMiss> {
        self.monsters
            .get(id)
            .ok_or_else(|| CatalogMiss::Monster(MonsterId::from(id)))
    }

    pub fn get_skill(&self, id: &str) -> Result<&SkillDefinition, CatalogMiss> {
        self.skills
            .get(id)
            .ok_or_else(|| CatalogMiss::Skill(SkillId::from(id)))
    }

    pub fn get_effect(&self, id: &str) -> Result<&EffectDefinition, CatalogMiss> {
        self.effects
            .get(id)
            .ok_or_else(|| CatalogMiss::Effect(EffectId::from(id)))
    }

    pub fn get_ultimate(&self, class: &str) -> Result<&UltimateDefinition, CatalogMiss> {
        self.ultimates
            .get(class)
            .ok_or_else(|| CatalogMiss::Ultimate(ClassTag::from(class)))
    }

    pub fn get_item(&self, id: &str) -> Result<&ItemDefinition, CatalogMiss> {
        self.items
            .get(id)
            .ok_or_else(|| CatalogMiss::Item(ItemId::from(id)))
    }

    /// Skills whose allow-list contains `class`, in id order.
    pub fn list_skills_for_class<'a>(
        &'a self,
        class: &'a ClassTag,
    ) -> impl Iterator<Item = &'a SkillDefinition> + 'a {
        self.skills.values().filter(move |skill| skill.allows(class))
    }

    pub fn monsters(&self) -> impl Iterator<Item = &MonsterTemplate> {
        self.monsters.values()
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.values()
    }

    pub fn effects(&self) -> impl Iterator<Item = &EffectDefinition> {
        self.effects.values()
    }

    pub fn ultimates(&self) -> impl Iterator<Item = &UltimateDefinition> {
        self.ultimates.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }
}

/// Collects catalog rows and validates cross references on [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    monsters: Vec<MonsterTemplate>,
    skills: Vec<SkillDefinition>,
    effects: Vec<EffectDefinition>,
    ultimates: Vec<UltimateDefinition>,
    items: Vec<ItemDefinition>,
}

impl CatalogBuilder {
    pub fn monster(mut self, monster: MonsterTemplate) -> Self {
        self.monsters.push(monster);
        self
    }

    pub fn monsters(mut self, monsters: impl IntoIterator<Item = MonsterTemplate>) -> Self {
        self.monsters.extend(monsters);
        self
    }

    pub fn skill(mut self, skill: SkillDefinition) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn skills(mut self, skills: impl IntoIterator<Item = SkillDefinition>) -> Self {
        self.skills.extend(skills);
        self
    }

    pub fn effect(mut self, effect: EffectDefinition) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn effects(mut self, effects: impl IntoIterator<Item = EffectDefinition>) -> Self {
        self.effects.extend(effects);
        self
    }

    pub fn ultimate(mut self, ultimate: UltimateDefinition) -> Self {
        self.ultimates.push(ultimate);
        self
    }

    pub fn ultimates(mut self, ultimates: impl IntoIterator<Item = UltimateDefinition>) -> Self {
        self.ultimates.extend(ultimates);
        self
    }

    pub fn item(mut self, item: ItemDefinition) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = ItemDefinition>) -> Self {
        self.items.extend(items);
        self
    }

    /// Indexes every table and checks all cross references.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found: duplicate ids, dangling
    /// effect or item references, probabilities outside `[0, 1]`, or effect
    /// payloads that do not match their kind.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let catalog = Catalog {
            monsters: index("monster", self.monsters, |m| m.id.clone())?,
            skills: index("skill", self.skills, |s| s.id.clone())?,
            effects: index("effect", self.effects, |e| e.id.clone())?,
            ultimates: index("ultimate", self.ultimates, |u| u.class.clone())?,
            items: index("item", self.items, |i| i.id.clone())?,
        };

        for effect in catalog.effects.values() {
            validate_effect(&catalog, effect)?;
        }
        for skill in catalog.skills.values() {
            let owner = format!("skill '{}'", skill.id);
            validate_chances(&catalog, &owner, &skill.target_effects)?;
            validate_chances(&catalog, &owner, &skill.self_effects)?;
            if let Some(ratio) = skill.armor_penetration {
                check_probability(&owner, "armor_penetration", ratio)?;
            }
            for (item, count) in &skill.requires {
                if *count == 0 {
                    return Err(CatalogError::EmptyRequirement {
                        skill: skill.id.clone(),
                        item: item.clone(),
                    });
                }
                check_item(&catalog, &owner, item)?;
            }
        }
        for ultimate in catalog.ultimates.values() {
            let owner = format!("ultimate '{}'", ultimate.name);
            validate_chances(&catalog, &owner, &ultimate.target_effects)?;
            validate_chances(&catalog, &owner, &ultimate.self_effects)?;
        }
        for monster in catalog.monsters.values() {
            if monster.hp == 0 {
                return Err(CatalogError::ZeroHp(monster.id.clone()));
            }
            let owner = format!("monster '{}'", monster.id);
            for (item, chance) in &monster.loot {
                check_probability(&owner, item.as_str(), *chance)?;
                check_item(&catalog, &owner, item)?;
            }
            for skill in &monster.skills {
                validate_chances(&catalog, &owner, &skill.effects)?;
            }
        }
        for item in catalog.items.values() {
            for payload in item.consumable_effects().unwrap_or_default() {
                if let ConsumableEffect::ApplyEffect(effect) = payload {
                    check_effect(&catalog, &format!("item '{}'", item.id), effect)?;
                }
            }
        }

        Ok(catalog)
    }
}

fn index<K: Ord + ToString, V>(
    table: &'static str,
    rows: Vec<V>,
    key: impl Fn(&V) -> K,
) -> Result<BTreeMap<K, V>, CatalogError> {
    let mut map = BTreeMap::new();
    for row in rows {
        let id = key(&row);
        if map.contains_key(&id) {
            return Err(CatalogError::DuplicateId {
                table,
                id: id.to_string(),
            });
        }
        map.insert(id, row);
    }
    Ok(map)
}

fn validate_effect(catalog: &Catalog, effect: &EffectDefinition) -> Result<(), CatalogError> {
    if effect.duration == 0 {
        return Err(CatalogError::ZeroDuration(effect.id.clone()));
    }
    match &effect.kind {
        EffectKind::DamageOverTime { percent } | EffectKind::HealOverTime { percent } => {
            if *percent == 0 {
                return Err(CatalogError::InvalidMagnitude(effect.id.clone()));
            }
        }
        EffectKind::StatModifier { percent, .. } => {
            if *percent == 0 {
                return Err(CatalogError::InvalidMagnitude(effect.id.clone()));
            }
        }
        EffectKind::SkipTurn => {}
        EffectKind::Stacking {
            max_stacks,
            trigger,
        } => {
            if *max_stacks == 0 {
                return Err(CatalogError::InvalidStacking(effect.id.clone()));
            }
            let target = check_effect(catalog, &format!("effect '{}'", effect.id), trigger)?;
            if matches!(target.kind, EffectKind::Stacking { .. }) {
                return Err(CatalogError::InvalidStacking(effect.id.clone()));
            }
        }
    }
    Ok(())
}

fn validate_chances(
    catalog: &Catalog,
    owner: &str,
    chances: &[EffectChance],
) -> Result<(), CatalogError> {
    for entry in chances {
        check_effect(catalog, owner, &entry.effect)?;
        check_probability(owner, entry.effect.as_str(), entry.chance)?;
    }
    Ok(())
}

fn check_effect<'a>(
    catalog: &'a Catalog,
    owner: &str,
    effect: &EffectId,
) -> Result<&'a EffectDefinition, CatalogError> {
    catalog
        .effects
        .get(effect)
        .ok_or_else(|| CatalogError::UnknownEffect {
            owner: owner.to_owned(),
            effect: effect.clone(),
        })
}

fn check_item(catalog: &Catalog, owner: &str, item: &ItemId) -> Result<(), CatalogError> {
    if catalog.items.contains_key(item) {
        Ok(())
    } else {
        Err(CatalogError::UnknownItem {
            owner: owner.to_owned(),
            item: item.clone(),
        })
    }
}

fn check_probability(owner: &str, target: &str, value: f64) -> Result<(), CatalogError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CatalogError::ProbabilityOutOfRange {
            owner: owner.to_owned(),
            target: target.to_owned(),
            value,
        })
    }
}
