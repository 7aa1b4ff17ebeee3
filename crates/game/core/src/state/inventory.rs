//! Inventory system for actors.
//!
//! Separates equipped items (one per [`EquipmentKind`]) from the bag, which
//! may hold duplicates. Potions stack by kind. Every held item counts toward
//! the fixed capacity: bag entries, equipped items, and potion stacks.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::error::InventoryError;

use super::items::{Equipment, EquipmentKind, PotionKind};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    equipped: BTreeMap<EquipmentKind, Equipment>,
    bag: Vec<Equipment>,
    potions: BTreeMap<PotionKind, u32>,
    capacity: usize,
}

impl Inventory {
    pub fn new() -> Self {
        Self::with_capacity(GameConfig::INVENTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            equipped: BTreeMap::new(),
            bag: Vec::new(),
            potions: BTreeMap::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Items currently counted against capacity.
    pub fn len(&self) -> usize {
        self.bag.len() + self.equipped.len() + self.potions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_space(&self) -> bool {
        self.len() < self.capacity
    }

    fn ensure_space(&self) -> Result<(), InventoryError> {
        if self.has_space() {
            Ok(())
        } else {
            Err(InventoryError::Full {
                capacity: self.capacity,
            })
        }
    }

    /// Adds equipment to the bag without equipping it.
    pub fn add_equipment(&mut self, item: Equipment) -> Result<(), InventoryError> {
        self.ensure_space()?;
        self.bag.push(item);
        Ok(())
    }

    /// Adds potions, stacking onto an existing stack of the same kind.
    ///
    /// Topping up an existing stack never needs free capacity.
    pub fn add_potion(&mut self, kind: PotionKind, quantity: u32) -> Result<(), InventoryError> {
        if let Some(stack) = self.potions.get_mut(&kind) {
            *stack += quantity;
            return Ok(());
        }
        self.ensure_space()?;
        self.potions.insert(kind, quantity);
        Ok(())
    }

    /// Equips the bag item at `index`.
    ///
    /// Returns the previously equipped item of the same kind, if any. That
    /// item is no longer held; the caller decides whether to re-bag it.
    pub fn equip(&mut self, index: usize) -> Result<Option<Equipment>, InventoryError> {
        if index >= self.bag.len() {
            return Err(InventoryError::NoSuchBagSlot { index });
        }
        let item = self.bag.remove(index);
        Ok(self.equipped.insert(item.kind, item))
    }

    /// Removes the equipped item of `kind` and hands it to the caller.
    pub fn unequip(&mut self, kind: EquipmentKind) -> Result<Equipment, InventoryError> {
        self.equipped
            .remove(&kind)
            .ok_or(InventoryError::NothingEquipped(kind))
    }

    /// Removes the bag item at `index` (drop or transfer).
    pub fn remove_from_bag(&mut self, index: usize) -> Result<Equipment, InventoryError> {
        if index >= self.bag.len() {
            return Err(InventoryError::NoSuchBagSlot { index });
        }
        Ok(self.bag.remove(index))
    }

    /// Consumes one potion of `kind`. An emptied stack frees its slot.
    pub fn use_potion(&mut self, kind: PotionKind) -> Result<PotionKind, InventoryError> {
        let stack = self
            .potions
            .get_mut(&kind)
            .filter(|quantity| **quantity > 0)
            .ok_or(InventoryError::NoPotion(kind))?;
        *stack -= 1;
        if *stack == 0 {
            self.potions.remove(&kind);
        }
        Ok(kind)
    }

    pub fn equipped(&self, kind: EquipmentKind) -> Option<&Equipment> {
        self.equipped.get(&kind)
    }

    pub fn all_equipped(&self) -> impl Iterator<Item = &Equipment> {
        self.equipped.values()
    }

    pub fn bag(&self) -> &[Equipment] {
        &self.bag
    }

    pub fn potion_count(&self, kind: PotionKind) -> u32 {
        self.potions.get(&kind).copied().unwrap_or(0)
    }

    pub fn potions(&self) -> impl Iterator<Item = (PotionKind, u32)> + '_ {
        self.potions.iter().map(|(kind, quantity)| (*kind, *quantity))
    }

    pub fn clear(&mut self) {
        self.equipped.clear();
        self.bag.clear();
        self.potions.clear();
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword(level: u32) -> Equipment {
        Equipment::new(EquipmentKind::Sword, level)
    }

    #[test]
    fn equip_returns_previous_item() {
        let mut inventory = Inventory::new();
        inventory.add_equipment(sword(1)).unwrap();
        inventory.add_equipment(sword(2)).unwrap();

        assert_eq!(inventory.equip(0).unwrap(), None);
        assert_eq!(inventory.equipped(EquipmentKind::Sword), Some(&sword(1)));

        // The level-2 sword is now at index 0.
        let previous = inventory.equip(0).unwrap();
        assert_eq!(previous, Some(sword(1)));
        assert_eq!(inventory.equipped(EquipmentKind::Sword), Some(&sword(2)));
        assert!(inventory.bag().is_empty());

        inventory.add_equipment(previous.unwrap()).unwrap();
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut inventory = Inventory::with_capacity(2);
        inventory.add_equipment(sword(1)).unwrap();
        inventory.add_potion(PotionKind::Health, 1).unwrap();

        assert_eq!(
            inventory.add_equipment(sword(2)),
            Err(InventoryError::Full { capacity: 2 })
        );
        assert!(inventory.add_potion(PotionKind::Mana, 1).is_err());
        // Stacking onto an existing stack still works when full.
        inventory.add_potion(PotionKind::Health, 2).unwrap();
        assert_eq!(inventory.potion_count(PotionKind::Health), 3);
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn equipping_keeps_count_stable() {
        let mut inventory = Inventory::with_capacity(1);
        inventory.add_equipment(sword(1)).unwrap();
        inventory.equip(0).unwrap();
        assert_eq!(inventory.len(), 1);
        assert!(!inventory.has_space());
    }

    #[test]
    fn potion_stack_empties() {
        let mut inventory = Inventory::new();
        inventory.add_potion(PotionKind::Vigor, 1).unwrap();
        assert_eq!(inventory.use_potion(PotionKind::Vigor), Ok(PotionKind::Vigor));
        assert_eq!(
            inventory.use_potion(PotionKind::Vigor),
            Err(InventoryError::NoPotion(PotionKind::Vigor))
        );
        assert!(inventory.is_empty());
    }

    #[test]
    fn bad_indices_are_rejected() {
        let mut inventory = Inventory::new();
        assert_eq!(
            inventory.equip(3),
            Err(InventoryError::NoSuchBagSlot { index: 3 })
        );
        assert_eq!(
            inventory.unequip(EquipmentKind::Boots),
            Err(InventoryError::NothingEquipped(EquipmentKind::Boots))
        );
    }
}
