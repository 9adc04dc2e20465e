//! The [`Stat`] value type.
//!
//! A stat is plain data: identity, display metadata and four numbers
//! (base, current, min, max). Operations that change a stat consume it and
//! return the updated value; owners store the result back in place of the
//! old one.
//!
//! Every setter re-clamps `current_value` into `[min_value, max_value]`.
//! [`Stat::restored_to_base`] is the single exception and copies the base
//! value through unclamped.

use core::fmt;

use crate::id::{StatCategory, StatId};
use crate::modifiers::StatModifiers;

/// A single stat instance such as Health or Attack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stat {
    pub id: StatId,
    pub name: String,
    pub description: String,
    pub category: StatCategory,
    /// Value before modifiers.
    pub base_value: f32,
    pub current_value: f32,
    pub min_value: f32,
    pub max_value: f32,
}

impl Stat {
    /// Creates a stat whose current value starts at `base`.
    ///
    /// Category defaults to [`StatCategory::Primary`] and the description is empty.
    pub fn new(id: StatId, name: impl Into<String>, base: f32, min: f32, max: f32) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category: StatCategory::Primary,
            base_value: base,
            current_value: base,
            min_value: min,
            max_value: max,
        }
    }

    /// The stat returned for ids nobody registered: named after the id,
    /// base 0, range `[0, 100]`.
    pub fn fallback(id: StatId) -> Self {
        Self::new(id, id.to_string(), 0.0, 0.0, 100.0)
    }

    #[must_use]
    pub fn with_category(mut self, category: StatCategory) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    // ===== queries =====

    /// `current / max`, or 0 when max is not positive. Not clamped to `[0, 1]`.
    pub fn percentage(&self) -> f32 {
        if self.max_value > 0.0 {
            self.current_value / self.max_value
        } else {
            0.0
        }
    }

    pub fn is_at_max(&self) -> bool {
        approximately(self.current_value, self.max_value)
    }

    pub fn is_at_min(&self) -> bool {
        approximately(self.current_value, self.min_value)
    }

    /// Depleted, i.e. at the minimum.
    pub fn is_empty(&self) -> bool {
        self.is_at_min()
    }

    /// At capacity, i.e. at the maximum.
    pub fn is_full(&self) -> bool {
        self.is_at_max()
    }

    pub fn missing_amount(&self) -> f32 {
        self.max_value - self.current_value
    }

    /// What `modifiers` would make of the base value. Does not change the stat.
    pub fn calculate_modified_value(&self, modifiers: &StatModifiers) -> f32 {
        modifiers.apply_to(self.base_value)
    }

    // ===== value-returning updates =====

    /// Adds `amount` (may be negative) to the current value, clamped.
    #[must_use]
    pub fn modified(self, amount: f32) -> Self {
        let value = self.current_value + amount;
        self.with_current_value(value)
    }

    /// Replaces the current value, clamped.
    #[must_use]
    pub fn with_current_value(mut self, value: f32) -> Self {
        self.current_value = clamp(value, self.min_value, self.max_value);
        self
    }

    /// Replaces the base value; with `update_current` the current value
    /// follows it (clamped).
    #[must_use]
    pub fn with_base_value(mut self, value: f32, update_current: bool) -> Self {
        self.base_value = value;
        if update_current {
            self = self.with_current_value(value);
        }
        self
    }

    #[must_use]
    pub fn restored_to_max(mut self) -> Self {
        self.current_value = self.max_value;
        self
    }

    /// Sets current to base without clamping.
    #[must_use]
    pub fn restored_to_base(mut self) -> Self {
        self.current_value = self.base_value;
        self
    }

    /// Applies `modifiers` to the current value once and keeps the result.
    ///
    /// Unlike the modifier layers of [`crate::StatCollection`], the effect is
    /// permanent: nothing remembers that it was applied.
    #[must_use]
    pub fn with_modifiers_applied(self, modifiers: &StatModifiers) -> Self {
        let value = modifiers.apply_to(self.current_value);
        self.with_current_value(value)
    }

    /// Fresh copy under another name. Current resets to base.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self::new(self.id, name, self.base_value, self.min_value, self.max_value)
            .with_category(self.category)
            .with_description(self.description.clone())
    }

    /// Fresh copy with another range. Current resets to base.
    #[must_use]
    pub fn with_range(&self, min: f32, max: f32) -> Self {
        Self::new(self.id, self.name.clone(), self.base_value, min, max)
            .with_category(self.category)
            .with_description(self.description.clone())
    }

    // ===== formatting =====

    /// Percentage of max, e.g. `"75.5%"`.
    pub fn percentage_string(&self, decimal_places: usize) -> String {
        format!("{:.*}%", decimal_places, self.percentage() * 100.0)
    }

    /// `"Health: 75/100"`, or `"Health: 75.0%"` with `show_percentage`.
    pub fn display_string(&self, show_percentage: bool) -> String {
        if show_percentage {
            format!("{}: {}", self.name, self.percentage_string(1))
        } else {
            format!(
                "{}: {:.0}/{:.0}",
                self.name, self.current_value, self.max_value
            )
        }
    }

    /// All values on one line.
    pub fn detailed_string(&self) -> String {
        format!(
            "{} ({}): Current={:.1}, Base={:.1}, Range=[{:.1}, {:.1}], {}",
            self.name,
            self.category,
            self.current_value,
            self.base_value,
            self.min_value,
            self.max_value,
            self.percentage_string(1)
        )
    }

    // ===== factories =====

    pub fn health(max: f32) -> Self {
        Self::new(StatId::Health, "Health", max, 0.0, max)
            .with_description("The entity's life force and durability.")
    }

    pub fn mana(max: f32) -> Self {
        Self::new(StatId::Mana, "Mana", max, 0.0, max)
            .with_description("The entity's magical energy and spellcasting ability.")
    }

    pub fn stamina(max: f32) -> Self {
        Self::new(StatId::Stamina, "Stamina", max, 0.0, max)
            .with_description("The entity's physical endurance and action capacity.")
    }

    /// Secondary attribute in `[0, 999]`.
    pub fn attribute(id: StatId, name: &str, base: f32) -> Self {
        let description = format!("The entity's {} attribute.", name.to_lowercase());
        Self::new(id, name, base, 0.0, 999.0)
            .with_category(StatCategory::Secondary)
            .with_description(description)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string(false))
    }
}

/// Clamps without panicking when `min > max`: the lower bound wins.
#[inline]
fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Float equality with a tolerance relative to the operands' magnitude.
#[inline]
pub(crate) fn approximately(a: f32, b: f32) -> bool {
    (b - a).abs() < f32::max(1e-6 * a.abs().max(b.abs()), f32::MIN_POSITIVE * 8.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health(current: f32) -> Stat {
        Stat::new(StatId::Health, "Health", 100.0, 0.0, 100.0).with_current_value(current)
    }

    #[test]
    fn new_starts_current_at_base() {
        let stat = Stat::new(StatId::Luck, "Luck", 10.0, 0.0, 999.0);
        assert_eq!(stat.current_value, 10.0);
        assert_eq!(stat.category, StatCategory::Primary);
        assert!(stat.description.is_empty());
    }

    #[test]
    fn modify_clamps_to_range() {
        let stat = health(50.0);
        assert_eq!(stat.clone().modified(-80.0).current_value, 0.0);
        assert_eq!(stat.clone().modified(80.0).current_value, 100.0);
        assert_eq!(stat.modified(-20.0).current_value, 30.0);
    }

    #[test]
    fn clamping_holds_over_mixed_sequences() {
        let amounts = [35.0, -500.0, 12.5, 999.0, -0.5, -42.0, 7.0];
        let mut stat = health(50.0);
        for (i, amount) in amounts.iter().enumerate() {
            stat = if i % 2 == 0 {
                stat.modified(*amount)
            } else {
                stat.with_current_value(*amount)
            };
            assert!(stat.current_value >= stat.min_value);
            assert!(stat.current_value <= stat.max_value);
        }
    }

    #[test]
    fn inverted_range_does_not_panic() {
        let stat = Stat::new(StatId::Speed, "Speed", 5.0, 10.0, 1.0).with_current_value(50.0);
        assert_eq!(stat.current_value, 1.0);
        let stat = stat.with_current_value(-5.0);
        assert_eq!(stat.current_value, 10.0);
    }

    #[test]
    fn base_update_optionally_moves_current() {
        let stat = health(40.0);
        let untouched = stat.clone().with_base_value(80.0, false);
        assert_eq!(untouched.base_value, 80.0);
        assert_eq!(untouched.current_value, 40.0);

        let followed = stat.with_base_value(150.0, true);
        assert_eq!(followed.base_value, 150.0);
        assert_eq!(followed.current_value, 100.0);
    }

    #[test]
    fn restore_to_base_is_unclamped() {
        let stat = health(10.0).with_base_value(250.0, false).restored_to_base();
        assert_eq!(stat.current_value, 250.0);
        assert!(stat.percentage() > 1.0);
    }

    #[test]
    fn restore_to_max_and_limits() {
        let stat = health(10.0).restored_to_max();
        assert!(stat.is_full());
        assert!(stat.is_at_max());
        assert_eq!(stat.missing_amount(), 0.0);

        let stat = stat.with_current_value(0.0);
        assert!(stat.is_empty());
        assert_eq!(stat.missing_amount(), 100.0);
    }

    #[test]
    fn percentage_with_zero_max() {
        let stat = Stat::new(StatId::Experience, "Experience", 0.0, 0.0, 0.0);
        assert_eq!(stat.percentage(), 0.0);
        assert_eq!(health(25.0).percentage(), 0.25);
    }

    #[test]
    fn calculate_modified_value_does_not_mutate() {
        let stat = health(60.0);
        let mods = StatModifiers::new(10.0, 0.0, 2.0);
        assert_eq!(stat.calculate_modified_value(&mods), 220.0);
        assert_eq!(stat.base_value, 100.0);
        assert_eq!(stat.current_value, 60.0);
    }

    #[test]
    fn applying_modifiers_changes_current_permanently() {
        let stat = health(40.0).with_modifiers_applied(&StatModifiers::flat(10.0));
        assert_eq!(stat.current_value, 50.0);
        assert_eq!(stat.base_value, 100.0);

        let stat = stat.with_modifiers_applied(&StatModifiers::multiplier(3.0));
        assert_eq!(stat.current_value, 100.0);
    }

    #[test]
    fn copies_reset_current() {
        let stat = health(10.0).with_description("hp");
        let renamed = stat.with_name("Vitality");
        assert_eq!(renamed.name, "Vitality");
        assert_eq!(renamed.current_value, 100.0);
        assert_eq!(renamed.description, "hp");

        let ranged = stat.with_range(0.0, 500.0);
        assert_eq!(ranged.max_value, 500.0);
        assert_eq!(ranged.name, "Health");
    }

    #[test]
    fn display_helpers() {
        let stat = health(75.0);
        assert_eq!(stat.display_string(false), "Health: 75/100");
        assert_eq!(stat.display_string(true), "Health: 75.0%");
        assert_eq!(stat.percentage_string(2), "75.00%");
        assert_eq!(stat.to_string(), "Health: 75/100");
        assert_eq!(
            stat.detailed_string(),
            "Health (Primary): Current=75.0, Base=100.0, Range=[0.0, 100.0], 75.0%"
        );
    }

    #[test]
    fn factories_fill_metadata() {
        let hp = Stat::health(250.0);
        assert_eq!(hp.id, StatId::Health);
        assert_eq!(hp.max_value, 250.0);
        assert_eq!(hp.current_value, 250.0);

        let str_stat = Stat::attribute(StatId::Strength, "Strength", 12.0);
        assert_eq!(str_stat.category, StatCategory::Secondary);
        assert_eq!(str_stat.description, "The entity's strength attribute.");
        assert_eq!(str_stat.max_value, 999.0);
    }

    #[test]
    fn fallback_is_named_after_id() {
        let stat = Stat::fallback(StatId::Thirst);
        assert_eq!(stat.name, "Thirst");
        assert_eq!(stat.base_value, 0.0);
        assert_eq!(stat.min_value, 0.0);
        assert_eq!(stat.max_value, 100.0);
    }
}
