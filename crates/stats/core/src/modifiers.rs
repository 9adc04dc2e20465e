//! Composable stat modifier bundles.
//!
//! A bundle carries three components applied in a fixed order:
//! `Flat → %Bonus → Multiplier`
//!
//! Formula: `result = (value + flat_bonus) × (1 + percentage_bonus) × multiplier`

use core::fmt;

/// An additive / percentage / multiplicative modifier bundle.
///
/// Bundles are value objects. Combining two bundles sums the flat and
/// percentage parts and multiplies the multipliers, so combination is
/// order-independent.
///
/// # Example
/// ```
/// # use stat_core::StatModifiers;
/// let sword = StatModifiers::flat(5.0);
/// let rage = StatModifiers::percentage(0.2).combine_with(&StatModifiers::multiplier(1.5));
///
/// let total = sword.combine_with(&rage);
/// // = (10 + 5) × 1.2 × 1.5
/// assert!((total.apply_to(10.0) - 27.0).abs() < 1e-4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifiers {
    /// Added to the value before any scaling.
    pub flat_bonus: f32,
    /// Fractional increase (0.2 = +20%), summed across bundles.
    pub percentage_bonus: f32,
    /// Final factor, multiplied across bundles.
    pub multiplier: f32,
}

impl StatModifiers {
    /// The neutral bundle: `apply_to` is the identity.
    pub const NEUTRAL: Self = Self {
        flat_bonus: 0.0,
        percentage_bonus: 0.0,
        multiplier: 1.0,
    };

    pub const fn new(flat_bonus: f32, percentage_bonus: f32, multiplier: f32) -> Self {
        Self {
            flat_bonus,
            percentage_bonus,
            multiplier,
        }
    }

    /// Flat-only bundle.
    pub const fn flat(amount: f32) -> Self {
        Self::new(amount, 0.0, 1.0)
    }

    /// Percentage-only bundle (0.2 = +20%).
    pub const fn percentage(fraction: f32) -> Self {
        Self::new(0.0, fraction, 1.0)
    }

    /// Multiplier-only bundle.
    pub const fn multiplier(factor: f32) -> Self {
        Self::new(0.0, 0.0, factor)
    }

    /// Applies the bundle to a value.
    #[inline]
    pub fn apply_to(&self, value: f32) -> f32 {
        (value + self.flat_bonus) * (1.0 + self.percentage_bonus) * self.multiplier
    }

    /// Returns a new bundle equivalent to stacking `self` and `other`.
    #[must_use]
    pub fn combine_with(&self, other: &StatModifiers) -> StatModifiers {
        Self {
            flat_bonus: self.flat_bonus + other.flat_bonus,
            percentage_bonus: self.percentage_bonus + other.percentage_bonus,
            multiplier: self.multiplier * other.multiplier,
        }
    }

    /// True when applying the bundle changes nothing.
    pub fn is_neutral(&self) -> bool {
        self.flat_bonus == 0.0 && self.percentage_bonus == 0.0 && self.multiplier == 1.0
    }
}

impl Default for StatModifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl fmt::Display for StatModifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "+{:.1} flat, +{:.1}% bonus, x{:.2} multiplier",
            self.flat_bonus,
            self.percentage_bonus * 100.0,
            self.multiplier
        )
    }
}
