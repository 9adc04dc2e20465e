//! Per-entity stat storage with temporary and permanent modifier layers.
//!
//! Storage holds the unmodified stats. Modifiers are a read-time lens:
//! every read recombines both layers and reapplies them to the stored base,
//! so removing a modifier leaves no trace.
//!
//! ```text
//! combined      = temporary[id] ⊕ permanent[id]        (missing → neutral)
//! modified_base = combined.apply_to(stored.base)
//! current       = clamp(modified_base × stored.current / stored.base)
//! ```

use std::collections::BTreeMap;

use crate::config::StatConfig;
use crate::id::{StatCategory, StatId};
use crate::modifiers::StatModifiers;
use crate::repository::StatRepository;
use crate::stat::Stat;

/// A problem found by [`StatCollection::validate_integrity`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("{id}: Current value ({current}) below minimum ({min})")]
    CurrentBelowMin { id: StatId, current: f32, min: f32 },

    #[error("{id}: Current value ({current}) above maximum ({max})")]
    CurrentAboveMax { id: StatId, current: f32, max: f32 },

    #[error("{id}: Minimum value ({min}) greater than maximum ({max})")]
    MinAboveMax { id: StatId, min: f32, max: f32 },

    #[error("{id}: Missing stat name")]
    MissingName { id: StatId },
}

impl ValidationIssue {
    pub const fn id(&self) -> StatId {
        match self {
            Self::CurrentBelowMin { id, .. }
            | Self::CurrentAboveMax { id, .. }
            | Self::MinAboveMax { id, .. }
            | Self::MissingName { id } => *id,
        }
    }
}

/// The stats owned by one entity.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatCollection {
    stats: BTreeMap<StatId, Stat>,
    /// Buffs and debuffs; their expiry is tracked by the caller.
    temporary_modifiers: BTreeMap<StatId, StatModifiers>,
    /// Equipment and talents; never cleared implicitly.
    permanent_modifiers: BTreeMap<StatId, StatModifiers>,
}

impl StatCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stats(stats: impl IntoIterator<Item = (StatId, Stat)>) -> Self {
        Self {
            stats: stats.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Default collection for an entity, see
    /// [`StatRepository::create_entity_stat_set`].
    pub fn from_repository(repository: &StatRepository, level: i32, include_survival: bool) -> Self {
        Self::from_stats(repository.create_entity_stat_set(level, include_survival))
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Stored (unmodified) stats in id order.
    pub fn iter(&self) -> impl Iterator<Item = (StatId, &Stat)> {
        self.stats.iter().map(|(id, stat)| (*id, stat))
    }

    /// Stored (unmodified) stat.
    pub fn stored(&self, id: StatId) -> Option<&Stat> {
        self.stats.get(&id)
    }

    // ===== reads =====

    /// Stat with both modifier layers applied, if stored here.
    pub fn get(&self, id: StatId) -> Option<Stat> {
        self.stats.get(&id).map(|stat| self.apply_modifiers(stat, id))
    }

    /// Like [`StatCollection::get`], falling back to the repository template
    /// (without modifiers) for stats this entity does not own.
    pub fn get_stat(&self, id: StatId, repository: &StatRepository) -> Stat {
        self.get(id).unwrap_or_else(|| repository.get(id))
    }

    pub fn stat_value(&self, id: StatId, repository: &StatRepository) -> f32 {
        self.get_stat(id, repository).current_value
    }

    /// Stored base value, ignoring modifiers. 0 when the stat is missing.
    pub fn stat_base_value(&self, id: StatId) -> f32 {
        self.stats.get(&id).map_or(0.0, |stat| stat.base_value)
    }

    pub fn stat_percentage(&self, id: StatId, repository: &StatRepository) -> f32 {
        self.get_stat(id, repository).percentage()
    }

    // ===== storage =====

    /// Inserts or overwrites.
    pub fn set_stat(&mut self, id: StatId, stat: Stat) {
        self.stats.insert(id, stat);
    }

    /// Inserts only when absent. Returns whether the stat was added.
    pub fn add_stat(&mut self, id: StatId, stat: Stat) -> bool {
        if self.stats.contains_key(&id) {
            return false;
        }
        self.stats.insert(id, stat);
        true
    }

    /// Removes a stat together with its modifiers in both layers.
    pub fn remove_stat(&mut self, id: StatId) -> Option<Stat> {
        let removed = self.stats.remove(&id)?;
        self.temporary_modifiers.remove(&id);
        self.permanent_modifiers.remove(&id);
        Some(removed)
    }

    pub fn contains(&self, id: StatId) -> bool {
        self.stats.contains_key(&id)
    }

    // ===== stored value changes =====
    //
    // These operate on the stored stat and never see modifiers. Each returns
    // false when the stat is not stored.

    pub fn modify_stat_value(&mut self, id: StatId, amount: f32) -> bool {
        self.update_stored(id, |stat| stat.modified(amount))
    }

    pub fn set_stat_value(&mut self, id: StatId, value: f32) -> bool {
        self.update_stored(id, |stat| stat.with_current_value(value))
    }

    pub fn restore_stat_to_max(&mut self, id: StatId) -> bool {
        self.update_stored(id, Stat::restored_to_max)
    }

    pub fn restore_all_stats_to_max(&mut self) {
        let ids: Vec<StatId> = self.stats.keys().copied().collect();
        for id in ids {
            self.restore_stat_to_max(id);
        }
    }

    fn update_stored(&mut self, id: StatId, update: impl FnOnce(Stat) -> Stat) -> bool {
        match self.stats.remove(&id) {
            Some(stat) => {
                self.stats.insert(id, update(stat));
                true
            }
            None => false,
        }
    }

    // ===== modifiers =====

    /// Stacks `modifier` onto the temporary layer for `id`.
    pub fn add_temporary_modifier(&mut self, id: StatId, modifier: StatModifiers) {
        tracing::debug!("Temporary modifier on {}: {}", id, modifier);
        stack(&mut self.temporary_modifiers, id, modifier);
    }

    /// Stacks `modifier` onto the permanent layer for `id`.
    pub fn add_permanent_modifier(&mut self, id: StatId, modifier: StatModifiers) {
        tracing::debug!("Permanent modifier on {}: {}", id, modifier);
        stack(&mut self.permanent_modifiers, id, modifier);
    }

    pub fn clear_temporary_modifiers(&mut self, id: StatId) {
        if self.temporary_modifiers.remove(&id).is_some() {
            tracing::debug!("Cleared temporary modifiers on {}", id);
        }
    }

    pub fn clear_all_temporary_modifiers(&mut self) {
        tracing::debug!(
            "Clearing temporary modifiers on {} stats",
            self.temporary_modifiers.len()
        );
        self.temporary_modifiers.clear();
    }

    pub fn temporary_modifier(&self, id: StatId) -> Option<&StatModifiers> {
        self.temporary_modifiers.get(&id)
    }

    pub fn permanent_modifier(&self, id: StatId) -> Option<&StatModifiers> {
        self.permanent_modifiers.get(&id)
    }

    /// Temporary and permanent layers combined; missing layers are neutral.
    pub fn combined_modifiers(&self, id: StatId) -> StatModifiers {
        let temporary = self.temporary_modifiers.get(&id).copied().unwrap_or_default();
        let permanent = self.permanent_modifiers.get(&id).copied().unwrap_or_default();
        temporary.combine_with(&permanent)
    }

    fn apply_modifiers(&self, stored: &Stat, id: StatId) -> Stat {
        let modifiers = self.combined_modifiers(id);
        let modified_base = modifiers.apply_to(stored.base_value);

        // Current keeps its proportion of base.
        let current_ratio = if stored.base_value > 0.0 {
            stored.current_value / stored.base_value
        } else {
            1.0
        };

        stored
            .clone()
            .with_base_value(modified_base, false)
            .with_current_value(modified_base * current_ratio)
    }

    // ===== queries =====
    //
    // Results carry modifiers applied, keyed by id.

    pub fn by_category(&self, category: StatCategory) -> BTreeMap<StatId, Stat> {
        self.select(|stat| stat.category == category)
    }

    pub fn primary(&self) -> BTreeMap<StatId, Stat> {
        self.by_category(StatCategory::Primary)
    }

    pub fn secondary(&self) -> BTreeMap<StatId, Stat> {
        self.by_category(StatCategory::Secondary)
    }

    /// Stats whose modified percentage is strictly below `threshold`.
    pub fn below(&self, threshold: f32) -> BTreeMap<StatId, Stat> {
        self.select_modified(|stat| stat.percentage() < threshold)
    }

    /// Stats below 25% of their maximum.
    pub fn critical(&self) -> BTreeMap<StatId, Stat> {
        self.below(StatConfig::DEFAULT_CRITICAL_THRESHOLD)
    }

    /// Stats below the configured critical threshold.
    pub fn critical_with(&self, config: &StatConfig) -> BTreeMap<StatId, Stat> {
        self.below(config.critical_threshold)
    }

    /// Stats whose modified current value sits at the minimum.
    pub fn empty(&self) -> BTreeMap<StatId, Stat> {
        self.select_modified(Stat::is_empty)
    }

    /// Filters on stored stats, returns modified ones.
    fn select(&self, keep: impl Fn(&Stat) -> bool) -> BTreeMap<StatId, Stat> {
        self.stats
            .iter()
            .filter(|&(_, stat)| keep(stat))
            .map(|(id, stat)| (*id, self.apply_modifiers(stat, *id)))
            .collect()
    }

    /// Filters on modified stats.
    fn select_modified(&self, keep: impl Fn(&Stat) -> bool) -> BTreeMap<StatId, Stat> {
        self.stats
            .iter()
            .map(|(id, stat)| (*id, self.apply_modifiers(stat, *id)))
            .filter(|(_, stat)| keep(stat))
            .collect()
    }

    // ===== bulk =====

    /// Merges the stored stats of `other` into this collection.
    ///
    /// Without `overwrite`, existing stats are kept and modifiers are not
    /// copied. With `overwrite`, incoming stats replace existing ones and
    /// both modifier layers are copied entry by entry.
    pub fn copy_from(&mut self, other: &StatCollection, overwrite: bool) {
        for (id, stat) in &other.stats {
            if overwrite || !self.stats.contains_key(id) {
                self.stats.insert(*id, stat.clone());
            }
        }

        if overwrite {
            self.temporary_modifiers.extend(&other.temporary_modifiers);
            self.permanent_modifiers.extend(&other.permanent_modifiers);
        }
    }

    /// Multi-line report grouped by category.
    pub fn summary(&self, include_modifiers: bool) -> String {
        if self.stats.is_empty() {
            return "No stats in collection.".to_string();
        }

        let mut lines = vec![format!("Stat Collection ({} stats):", self.stats.len())];

        for category in <StatCategory as strum::IntoEnumIterator>::iter() {
            let mut group = self
                .stats
                .iter()
                .filter(|(_, stat)| stat.category == category)
                .peekable();
            if group.peek().is_none() {
                continue;
            }

            lines.push(String::new());
            lines.push(format!("{} Stats:", category));
            for (id, stat) in group {
                let modified = self.apply_modifiers(stat, *id);
                lines.push(format!("  {}", modified.display_string(false)));

                if include_modifiers {
                    let modifiers = self.combined_modifiers(*id);
                    if !modifiers.is_neutral() {
                        lines.push(format!("    Modifiers: {}", modifiers));
                    }
                }
            }
        }

        lines.push(String::new());
        lines.join("\n")
    }

    /// Reports range and naming problems in stored stats. Never repairs.
    pub fn validate_integrity(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for (&id, stat) in &self.stats {
            if stat.current_value < stat.min_value {
                issues.push(ValidationIssue::CurrentBelowMin {
                    id,
                    current: stat.current_value,
                    min: stat.min_value,
                });
            }
            if stat.current_value > stat.max_value {
                issues.push(ValidationIssue::CurrentAboveMax {
                    id,
                    current: stat.current_value,
                    max: stat.max_value,
                });
            }
            if stat.min_value > stat.max_value {
                issues.push(ValidationIssue::MinAboveMax {
                    id,
                    min: stat.min_value,
                    max: stat.max_value,
                });
            }
            if stat.name.is_empty() {
                issues.push(ValidationIssue::MissingName { id });
            }
        }

        issues
    }
}

#[cfg(feature = "serde")]
impl StatCollection {
    /// Compact binary save data: stored stats and both modifier layers.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

fn stack(layer: &mut BTreeMap<StatId, StatModifiers>, id: StatId, modifier: StatModifiers) {
    layer
        .entry(id)
        .and_modify(|existing| *existing = existing.combine_with(&modifier))
        .or_insert(modifier);
}
