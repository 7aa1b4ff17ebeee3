//! Equipment and potion definitions.

use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::env::Dice;

/// Equipment slot kinds. An inventory equips at most one item per kind.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentKind {
    #[strum(to_string = "Longsword")]
    Sword,
    #[strum(to_string = "Dagger")]
    Dagger,
    #[strum(to_string = "Mana Staff")]
    Staff,
    #[strum(to_string = "Iron Helmet")]
    Helmet,
    #[strum(to_string = "Armored Chestplate")]
    Chestplate,
    #[strum(to_string = "Wooden Shield")]
    Shield,
    #[strum(to_string = "Leather Gloves")]
    Gloves,
    #[strum(to_string = "Swift Boots")]
    Boots,
}

impl EquipmentKind {
    /// Base value; shop prices are `value × 20`.
    pub const fn value(self) -> u32 {
        match self {
            Self::Sword => 15,
            Self::Dagger => 8,
            Self::Staff => 12,
            Self::Helmet => 10,
            Self::Chestplate => 25,
            Self::Shield => 15,
            Self::Gloves => 5,
            Self::Boots => 3,
        }
    }

    pub const fn price(self) -> u32 {
        self.value() * 20
    }

    pub const fn lore(self) -> &'static str {
        match self {
            Self::Sword => "A legendary blade passed down through generations of warriors.",
            Self::Dagger => "A swift and deadly dagger, perfect for precision strikes.",
            Self::Staff => "An ancient staff crackling with arcane energy.",
            Self::Helmet => "A sturdy helmet that has seen many battles.",
            Self::Chestplate => "Heavy armor forged by master blacksmiths.",
            Self::Shield => "A reliable shield that never fails to protect.",
            Self::Gloves => "Supple leather gloves for better grip and dexterity.",
            Self::Boots => "Enchanted boots allowing swift movement.",
        }
    }

    pub fn random(dice: &dyn Dice) -> Self {
        Self::iter()
            .nth(dice.pick(Self::COUNT))
            .unwrap_or(Self::Sword)
    }
}

/// A concrete piece of equipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub kind: EquipmentKind,
    pub level: u32,
}

impl Equipment {
    pub const fn new(kind: EquipmentKind, level: u32) -> Self {
        Self { kind, level }
    }
}

impl core::fmt::Display for Equipment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (Level {}) - {}", self.kind, self.level, self.kind.lore())
    }
}

/// Potion kinds. Potions stack by kind inside an inventory.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PotionKind {
    #[strum(to_string = "Health Potion")]
    Health,
    #[strum(to_string = "Mana Potion")]
    Mana,
    #[strum(to_string = "Vigor Potion")]
    Vigor,
}

/// What drinking a potion restores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PotionEffect {
    Health(u32),
    Mana(u32),
}

impl PotionKind {
    pub const fn effect(self) -> PotionEffect {
        match self {
            Self::Health => PotionEffect::Health(50),
            Self::Mana => PotionEffect::Mana(50),
            Self::Vigor => PotionEffect::Health(75),
        }
    }

    pub fn random(dice: &dyn Dice) -> Self {
        Self::iter()
            .nth(dice.pick(Self::COUNT))
            .unwrap_or(Self::Health)
    }
}
