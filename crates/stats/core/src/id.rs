//! Stat identities and categories.
//!
//! [`StatId`] is the key type used by every map in this crate. Discriminants
//! are stable and may be persisted.

/// Identifies a kind of stat.
///
/// The `Display` form is the variant symbol (`"Health"`, `"CriticalHitChance"`),
/// which is also the name given to fallback stats for unregistered ids.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum StatId {
    Health = 0,
    Mana = 1,
    Stamina = 2,
    Strength = 3,
    Agility = 4,
    Intelligence = 5,
    Defense = 6,
    Speed = 7,
    CriticalHitChance = 8,
    CriticalHitDamage = 9,
    Attack = 10,
    MagicPower = 11,
    MagicDefense = 12,
    Experience = 13,
    Level = 14,
    Luck = 15,
    Charisma = 16,
    // Survival needs
    Hunger = 17,
    Thirst = 18,
    Energy = 19,
    Rest = 20,
}

impl StatId {
    /// Stable numeric value of this id.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Iterates all ids in discriminant order.
    pub fn all() -> impl Iterator<Item = StatId> {
        <Self as strum::IntoEnumIterator>::iter()
    }

    /// The survival meters added by `include_survival` entity sets.
    pub const SURVIVAL: [StatId; 4] = [
        StatId::Hunger,
        StatId::Thirst,
        StatId::Energy,
        StatId::Rest,
    ];
}

impl TryFrom<u8> for StatId {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::all().find(|id| id.as_u8() == value).ok_or(value)
    }
}

/// Classification of a stat. Only used for filtering.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum StatCategory {
    /// Core resources: Health, Mana, Stamina, survival meters.
    #[default]
    Primary,
    /// Attributes and combat stats.
    Secondary,
    /// Progression and miscellaneous: Level, Experience.
    Tertiary,
}
