/// Stat system configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatConfig {
    /// Fraction of max below which a stat counts as critical.
    pub critical_threshold: f32,
    /// Reject templates whose min exceeds their max at registration time.
    pub enforce_ranges: bool,
    /// Register the built-in template table when the repository initializes.
    pub seed_defaults: bool,
}

impl StatConfig {
    // ===== fixed rules =====
    /// Per-level growth of Health/Mana/Stamina in entity stat sets.
    pub const RESOURCE_GROWTH_PER_LEVEL: f32 = 0.1;
    /// Per-level growth of the four core attributes.
    pub const ATTRIBUTE_GROWTH_PER_LEVEL: f32 = 2.0;
    /// Value given to every survival meter in a fresh entity set.
    pub const SURVIVAL_START: f32 = 100.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CRITICAL_THRESHOLD: f32 = 0.25;

    pub fn new() -> Self {
        Self {
            critical_threshold: Self::DEFAULT_CRITICAL_THRESHOLD,
            enforce_ranges: true,
            seed_defaults: true,
        }
    }

    pub fn with_critical_threshold(mut self, critical_threshold: f32) -> Self {
        self.critical_threshold = critical_threshold;
        self
    }

    /// Accept templates with `min > max`; such stats are then only reported
    /// by [`crate::StatCollection::validate_integrity`].
    pub fn permissive(mut self) -> Self {
        self.enforce_ranges = false;
        self
    }

    /// Start from an empty registry instead of the built-in table.
    pub fn without_defaults(mut self) -> Self {
        self.seed_defaults = false;
        self
    }
}

impl Default for StatConfig {
    fn default() -> Self {
        Self::new()
    }
}
