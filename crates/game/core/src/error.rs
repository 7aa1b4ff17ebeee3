//! Common error infrastructure for game-core.
//!
//! Most party rules never fail: running out of mana or gold degrades an action
//! and is reported as narration. The errors defined here cover the few places
//! where a caller asked for something that cannot happen (a missing bag slot,
//! a full inventory) and must decide how to narrate it.

use crate::state::{EquipmentKind, PotionKind};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later (e.g. after freeing space)
/// - **Validation**: the request referenced something that does not exist
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry after the state changes.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all game-core errors.
///
/// Callers use the severity to choose between a "try again later" and a
/// "that does not exist" narration line.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Errors raised by [`crate::state::Inventory`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("inventory is full ({capacity} items)")]
    Full { capacity: usize },

    #[error("no item in bag slot {index}")]
    NoSuchBagSlot { index: usize },

    #[error("nothing equipped in the {0} slot")]
    NothingEquipped(EquipmentKind),

    #[error("no {0} left")]
    NoPotion(PotionKind),
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Full { .. } => ErrorSeverity::Recoverable,
            Self::NoSuchBagSlot { .. } | Self::NothingEquipped(_) | Self::NoPotion(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Full { .. } => "inventory_full",
            Self::NoSuchBagSlot { .. } => "no_such_bag_slot",
            Self::NothingEquipped(_) => "nothing_equipped",
            Self::NoPotion(_) => "no_potion",
        }
    }
}
