//! Registry of stat templates.
//!
//! The repository is an ordinary owned value: construct one, seed it, and
//! hand a reference to whatever builds entity stat collections. Lookups
//! never fail; mutations report rejections through [`RepositoryError`].

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use crate::config::StatConfig;
use crate::error::{RepositoryError, Result};
use crate::id::StatCategory::{Primary, Secondary, Tertiary};
use crate::id::{StatCategory, StatId};
use crate::stat::Stat;

/// One row of the built-in template table.
struct DefaultTemplate {
    id: StatId,
    name: &'static str,
    base: f32,
    min: f32,
    max: f32,
    category: StatCategory,
    description: &'static str,
}

const fn row(
    id: StatId,
    name: &'static str,
    base: f32,
    min: f32,
    max: f32,
    category: StatCategory,
    description: &'static str,
) -> DefaultTemplate {
    DefaultTemplate {
        id,
        name,
        base,
        min,
        max,
        category,
        description,
    }
}

/// Built-in templates registered on initialization.
#[rustfmt::skip]
const DEFAULT_TEMPLATES: [DefaultTemplate; 21] = [
    // Core resources
    row(StatId::Health, "Health", 100.0, 0.0, 999.0, Primary, "The entity's life force and physical durability."),
    row(StatId::Mana, "Mana", 100.0, 0.0, 999.0, Primary, "The entity's magical energy used for spellcasting."),
    row(StatId::Stamina, "Stamina", 100.0, 0.0, 999.0, Primary, "The entity's physical endurance for actions and movement."),
    // Attributes
    row(StatId::Strength, "Strength", 10.0, 1.0, 999.0, Secondary, "Physical power affecting damage and carrying capacity."),
    row(StatId::Agility, "Agility", 10.0, 1.0, 999.0, Secondary, "Speed and dexterity affecting movement and accuracy."),
    row(StatId::Intelligence, "Intelligence", 10.0, 1.0, 999.0, Secondary, "Mental acuity affecting mana and magical abilities."),
    row(StatId::Charisma, "Charisma", 10.0, 1.0, 999.0, Secondary, "Social influence and leadership capabilities."),
    // Combat
    row(StatId::Attack, "Attack Power", 10.0, 0.0, 9999.0, Secondary, "Base physical damage dealt with attacks."),
    row(StatId::Defense, "Defense", 5.0, 0.0, 9999.0, Secondary, "Physical damage reduction and armor effectiveness."),
    row(StatId::MagicPower, "Magic Power", 10.0, 0.0, 9999.0, Secondary, "Base magical damage and spell effectiveness."),
    row(StatId::MagicDefense, "Magic Defense", 5.0, 0.0, 9999.0, Secondary, "Magical damage reduction and spell resistance."),
    row(StatId::Speed, "Speed", 10.0, 0.0, 999.0, Secondary, "Movement speed and action priority in combat."),
    row(StatId::CriticalHitChance, "Critical Hit Chance", 5.0, 0.0, 100.0, Secondary, "Percentage chance to deal critical damage."),
    row(StatId::CriticalHitDamage, "Critical Hit Damage", 150.0, 100.0, 999.0, Secondary, "Damage multiplier for critical hits (as percentage)."),
    row(StatId::Luck, "Luck", 10.0, 0.0, 999.0, Secondary, "Affects random outcomes and rare item discovery."),
    // Progression
    row(StatId::Level, "Level", 1.0, 1.0, 999.0, Tertiary, "The entity's current experience level."),
    row(StatId::Experience, "Experience", 0.0, 0.0, 999_999.0, Tertiary, "Accumulated experience points toward next level."),
    // Survival
    row(StatId::Hunger, "Hunger", 100.0, 0.0, 100.0, Primary, "The entity's hunger level affecting health and performance."),
    row(StatId::Thirst, "Thirst", 100.0, 0.0, 100.0, Primary, "The entity's thirst level affecting health and performance."),
    row(StatId::Energy, "Energy", 100.0, 0.0, 100.0, Primary, "The entity's energy level affecting actions and abilities."),
    row(StatId::Rest, "Rest", 100.0, 0.0, 100.0, Primary, "The entity's rest level affecting stamina and health regeneration."),
];

impl DefaultTemplate {
    fn to_stat(&self) -> Stat {
        Stat::new(self.id, self.name, self.base, self.min, self.max)
            .with_category(self.category)
            .with_description(self.description)
    }
}

/// The built-in template table, in table order.
pub fn default_templates() -> impl Iterator<Item = Stat> {
    DEFAULT_TEMPLATES.iter().map(DefaultTemplate::to_stat)
}

/// The built-in table keyed by id, built once per process.
fn seeded_table() -> &'static BTreeMap<StatId, Stat> {
    static TABLE: OnceLock<BTreeMap<StatId, Stat>> = OnceLock::new();
    TABLE.get_or_init(|| default_templates().map(|stat| (stat.id, stat)).collect())
}

/// Source of truth for stat templates.
#[derive(Clone, Debug)]
pub struct StatRepository {
    config: StatConfig,
    templates: BTreeMap<StatId, Stat>,
    /// Lower-cased template name → id.
    name_index: HashMap<String, StatId>,
    initialized: bool,
}

impl StatRepository {
    /// Repository seeded with the built-in table.
    pub fn new() -> Self {
        Self::with_config(StatConfig::default())
    }

    pub fn with_config(config: StatConfig) -> Self {
        let mut repository = Self {
            config,
            templates: BTreeMap::new(),
            name_index: HashMap::new(),
            initialized: false,
        };
        repository.initialize();
        repository
    }

    pub fn config(&self) -> &StatConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Drops every template and re-registers the built-in table
    /// (unless the config disables seeding).
    pub fn initialize(&mut self) {
        self.templates.clear();
        self.name_index.clear();

        if self.config.seed_defaults {
            for template in default_templates() {
                self.insert(template.id, template);
            }
        }
        self.initialized = true;

        tracing::debug!(
            "StatRepository initialized with {} stat templates",
            self.templates.len()
        );
    }

    /// Re-initializes after [`StatRepository::clear`]. Every mutating
    /// operation calls this first.
    pub fn ensure_initialized(&mut self) {
        if !self.initialized {
            self.initialize();
        }
    }

    /// Wipes all templates and marks the repository uninitialized.
    ///
    /// Until the next mutation re-seeds it, reads on a cleared repository
    /// see the table that re-seeding will install: the built-in templates,
    /// or nothing when the config disables seeding.
    pub fn clear(&mut self) {
        self.templates.clear();
        self.name_index.clear();
        self.initialized = false;
    }

    // ===== CRUD =====

    /// Registers a new template under its own id.
    pub fn register(&mut self, template: Stat) -> Result<()> {
        self.ensure_initialized();

        let id = template.id;
        if self.templates.contains_key(&id) {
            tracing::warn!(
                "Stat with ID {} already registered. Use update to modify.",
                id
            );
            return Err(RepositoryError::Duplicate { id });
        }
        self.check_range(&template)?;

        self.insert(id, template);
        Ok(())
    }

    /// Template for `id`, or [`Stat::fallback`] when nothing is registered.
    pub fn get(&self, id: StatId) -> Stat {
        match self.table().get(&id) {
            Some(template) => template.clone(),
            None => {
                tracing::warn!("Stat with ID {} not found. Returning default stat.", id);
                Stat::fallback(id)
            }
        }
    }

    /// Borrowing lookup without fallback.
    pub fn template(&self, id: StatId) -> Option<&Stat> {
        self.table().get(&id)
    }

    /// Case-insensitive lookup by display name.
    pub fn get_by_name(&self, name: &str) -> Option<Stat> {
        if name.is_empty() {
            return None;
        }
        let name = name.to_lowercase();
        if !self.initialized {
            return self
                .table()
                .values()
                .find(|stat| stat.name.to_lowercase() == name)
                .cloned();
        }
        let id = self.name_index.get(&name)?;
        self.templates.get(id).cloned()
    }

    /// Replaces the template stored under `id`. Renames are allowed.
    ///
    /// The stored template always carries `id`, whatever `template.id` says.
    pub fn update(&mut self, id: StatId, mut template: Stat) -> Result<()> {
        self.ensure_initialized();

        let Some(old_name) = self.templates.get(&id).map(|old| old.name.to_lowercase()) else {
            tracing::warn!("Cannot update non-existent stat {}.", id);
            return Err(RepositoryError::NotFound { id });
        };
        template.id = id;
        self.check_range(&template)?;

        if self.name_index.get(&old_name) == Some(&id) {
            self.name_index.remove(&old_name);
        }
        self.insert(id, template);
        Ok(())
    }

    /// Removes and returns the template for `id`.
    pub fn remove(&mut self, id: StatId) -> Result<Stat> {
        self.ensure_initialized();

        let Some(template) = self.templates.remove(&id) else {
            tracing::debug!("Cannot remove non-existent stat {}.", id);
            return Err(RepositoryError::NotFound { id });
        };
        let name = template.name.to_lowercase();
        if self.name_index.get(&name) == Some(&id) {
            self.name_index.remove(&name);
        }
        Ok(template)
    }

    pub fn contains(&self, id: StatId) -> bool {
        self.table().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    /// All templates in id order.
    pub fn templates(&self) -> impl Iterator<Item = &Stat> {
        self.table().values()
    }

    // ===== queries =====

    pub fn by_category(&self, category: StatCategory) -> impl Iterator<Item = &Stat> {
        self.table()
            .values()
            .filter(move |stat| stat.category == category)
    }

    pub fn primary(&self) -> impl Iterator<Item = &Stat> {
        self.by_category(StatCategory::Primary)
    }

    pub fn secondary(&self) -> impl Iterator<Item = &Stat> {
        self.by_category(StatCategory::Secondary)
    }

    pub fn tertiary(&self) -> impl Iterator<Item = &Stat> {
        self.by_category(StatCategory::Tertiary)
    }

    /// Templates whose name contains `pattern`, ignoring case. An empty
    /// pattern matches nothing.
    pub fn search_by_name(&self, pattern: &str) -> impl Iterator<Item = &Stat> {
        let pattern = pattern.to_lowercase();
        self.table().values().filter(move |stat| {
            !pattern.is_empty() && stat.name.to_lowercase().contains(&pattern)
        })
    }

    /// Templates whose **base** value lies in `[min, max]`.
    pub fn in_range(&self, min: f32, max: f32) -> impl Iterator<Item = &Stat> {
        self.table()
            .values()
            .filter(move |stat| stat.base_value >= min && stat.base_value <= max)
    }

    // ===== factories =====

    /// Fresh stat built from the template for `id`, with optional overrides.
    /// Current starts at the resulting base.
    pub fn create_instance(
        &self,
        id: StatId,
        base: Option<f32>,
        min: Option<f32>,
        max: Option<f32>,
    ) -> Stat {
        let template = self.get(id);
        Stat::new(
            id,
            template.name,
            base.unwrap_or(template.base_value),
            min.unwrap_or(template.min_value),
            max.unwrap_or(template.max_value),
        )
        .with_category(template.category)
        .with_description(template.description)
    }

    /// Default stat set for a new entity of the given level.
    ///
    /// Scaling:
    /// - Health/Mana/Stamina: `100 × (1 + (level-1) × 0.1)`
    /// - Strength/Agility/Intelligence/Charisma: `10 + (level-1) × 2`
    /// - Attack/MagicPower: `10 + level × 3`
    /// - Defense/MagicDefense: `5 + level × 2`
    /// - Speed: `10 + level`
    /// - Crit chance/damage and Luck: template defaults
    /// - Level: `level`, Experience: 0
    /// - Hunger/Thirst/Energy/Rest: 100 when `include_survival`
    pub fn create_entity_stat_set(
        &self,
        level: i32,
        include_survival: bool,
    ) -> BTreeMap<StatId, Stat> {
        let level_f = level as f32;
        let resource_multiplier =
            1.0 + (level_f - 1.0) * StatConfig::RESOURCE_GROWTH_PER_LEVEL;
        let attribute_base = 10.0 + (level_f - 1.0) * StatConfig::ATTRIBUTE_GROWTH_PER_LEVEL;

        let mut bases: Vec<(StatId, f32)> = vec![
            (StatId::Health, 100.0 * resource_multiplier),
            (StatId::Mana, 100.0 * resource_multiplier),
            (StatId::Stamina, 100.0 * resource_multiplier),
            (StatId::Strength, attribute_base),
            (StatId::Agility, attribute_base),
            (StatId::Intelligence, attribute_base),
            (StatId::Charisma, attribute_base),
            (StatId::Attack, 10.0 + level_f * 3.0),
            (StatId::Defense, 5.0 + level_f * 2.0),
            (StatId::MagicPower, 10.0 + level_f * 3.0),
            (StatId::MagicDefense, 5.0 + level_f * 2.0),
            (StatId::Speed, 10.0 + level_f),
            (StatId::CriticalHitChance, 5.0),
            (StatId::CriticalHitDamage, 150.0),
            (StatId::Luck, 10.0),
            (StatId::Level, level_f),
            (StatId::Experience, 0.0),
        ];
        if include_survival {
            bases.extend(StatId::SURVIVAL.map(|id| (id, StatConfig::SURVIVAL_START)));
        }

        bases
            .into_iter()
            .map(|(id, base)| (id, self.create_instance(id, Some(base), None, None)))
            .collect()
    }

    /// Template counts per category.
    pub fn summary(&self) -> String {
        format!(
            "StatRepository Stats:\nTotal Stats: {}\nPrimary: {}\nSecondary: {}\nTertiary: {}",
            self.len(),
            self.primary().count(),
            self.secondary().count(),
            self.tertiary().count()
        )
    }

    // ===== internals =====

    /// Templates as reads see them.
    fn table(&self) -> &BTreeMap<StatId, Stat> {
        if !self.initialized && self.config.seed_defaults {
            seeded_table()
        } else {
            &self.templates
        }
    }

    fn insert(&mut self, id: StatId, template: Stat) {
        self.name_index.insert(template.name.to_lowercase(), id);
        self.templates.insert(id, template);
    }

    fn check_range(&self, template: &Stat) -> Result<()> {
        if self.config.enforce_ranges && template.min_value > template.max_value {
            tracing::warn!(
                "Rejecting stat {}: min {} exceeds max {}",
                template.id,
                template.min_value,
                template.max_value
            );
            return Err(RepositoryError::InvalidRange {
                id: template.id,
                min: template.min_value,
                max: template.max_value,
            });
        }
        Ok(())
    }
}

impl Default for StatRepository {
    fn default() -> Self {
        Self::new()
    }
}
