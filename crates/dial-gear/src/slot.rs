//! Equipment slots and equipped state

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::GearError;
use crate::item::{Inventory, ItemCatalog};

/// Fixed equipment attachment point
///
/// Declaration order is the aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    Radio,
    Head,
    Hands,
    Accessory1,
    Accessory2,
}

impl Slot {
    /// All slots in aggregation order
    pub const ALL: [Slot; 5] = [
        Self::Radio,
        Self::Head,
        Self::Hands,
        Self::Accessory1,
        Self::Accessory2,
    ];

    /// Slots whose items are aggregated on top of the radio base table
    pub const NON_RADIO: [Slot; 4] = [Self::Head, Self::Hands, Self::Accessory1, Self::Accessory2];

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Radio => "Radio",
            Self::Head => "Head",
            Self::Hands => "Hands",
            Self::Accessory1 => "Accessory 1",
            Self::Accessory2 => "Accessory 2",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Slot {
    type Err = GearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "radio" => Ok(Self::Radio),
            "head" => Ok(Self::Head),
            "hands" => Ok(Self::Hands),
            "accessory1" | "acc1" => Ok(Self::Accessory1),
            "accessory2" | "acc2" => Ok(Self::Accessory2),
            _ => Err(GearError::UnknownName(s.to_string())),
        }
    }
}

/// Outcome of a successful equip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipOutcome {
    /// Slot that now holds the item
    pub slot: Slot,
    /// Item that was equipped
    pub item: String,
    /// Previous occupant of the slot, now unequipped
    pub displaced: Option<String>,
    /// False when the item was already in this slot
    pub changed: bool,
}

/// Which item sits in which slot
///
/// Each slot holds at most one item and an item appears in at most one
/// slot. Mutation goes through [`EquippedState::equip`] and
/// [`EquippedState::unequip`] only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquippedState {
    slots: BTreeMap<Slot, String>,
}

impl EquippedState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Item in a slot
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    /// Slot holding an item
    pub fn slot_of(&self, item_id: &str) -> Option<Slot> {
        self.slots
            .iter()
            .find(|(_, id)| id.as_str() == item_id)
            .map(|(slot, _)| *slot)
    }

    /// Whether an item is equipped anywhere
    pub fn is_equipped(&self, item_id: &str) -> bool {
        self.slot_of(item_id).is_some()
    }

    /// Occupied slots in aggregation order
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> {
        self.slots.iter().map(|(slot, id)| (*slot, id.as_str()))
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing is equipped
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Equip an item into a slot
    ///
    /// Checks, in order: ownership, equippability, slot validity, and that
    /// the item is not already held by another slot. An occupied slot is
    /// cleared first and its item reported as displaced. On error nothing
    /// changes.
    pub fn equip(
        &mut self,
        item_id: &str,
        slot: Slot,
        catalog: &ItemCatalog,
        inventory: &impl Inventory,
    ) -> Result<EquipOutcome, GearError> {
        if let Err(e) = self.check_equip(item_id, slot, catalog, inventory) {
            warn!("Rejected equip of {} into {}: {}", item_id, slot, e);
            return Err(e);
        }

        if self.get(slot) == Some(item_id) {
            return Ok(EquipOutcome {
                slot,
                item: item_id.to_string(),
                displaced: None,
                changed: false,
            });
        }

        let displaced = self.slots.insert(slot, item_id.to_string());
        if let Some(old) = &displaced {
            info!("Unequipped {} from slot {}", old, slot);
        }
        info!("Equipped {} to slot {}", item_id, slot);

        Ok(EquipOutcome {
            slot,
            item: item_id.to_string(),
            displaced,
            changed: true,
        })
    }

    fn check_equip(
        &self,
        item_id: &str,
        slot: Slot,
        catalog: &ItemCatalog,
        inventory: &impl Inventory,
    ) -> Result<(), GearError> {
        if !inventory.owns(item_id) {
            return Err(GearError::ItemNotOwned(item_id.to_string()));
        }

        let item = catalog
            .get(item_id)
            .filter(|item| item.equippable)
            .ok_or_else(|| GearError::ItemNotEquippable(item_id.to_string()))?;

        if !item.fits(slot) {
            return Err(GearError::InvalidSlotForItem {
                item: item_id.to_string(),
                slot,
            });
        }

        match self.slot_of(item_id) {
            Some(current) if current != slot => Err(GearError::AlreadyEquipped {
                item: item_id.to_string(),
                slot: current,
            }),
            _ => Ok(()),
        }
    }

    /// Clear a slot, returning the item that was in it
    pub fn unequip(&mut self, slot: Slot) -> Result<String, GearError> {
        let item = self.slots.remove(&slot).ok_or(GearError::SlotEmpty(slot))?;
        info!("Unequipped {} from slot {}", item, slot);
        Ok(item)
    }

    /// Clear whichever slot holds an item
    pub fn unequip_item(&mut self, item_id: &str) -> Option<Slot> {
        let slot = self.slot_of(item_id)?;
        self.slots.remove(&slot);
        info!("Unequipped {} from slot {}", item_id, slot);
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn owned(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_slot_order() {
        let mut slots = Slot::ALL.to_vec();
        slots.reverse();
        slots.sort();
        assert_eq!(slots, Slot::ALL.to_vec());
    }

    #[test]
    fn test_slot_parse() {
        assert_eq!("Radio".parse::<Slot>().unwrap(), Slot::Radio);
        assert_eq!("acc2".parse::<Slot>().unwrap(), Slot::Accessory2);
        assert!("body".parse::<Slot>().is_err());
    }

    #[test]
    fn test_equip_and_unequip() {
        let catalog = ItemCatalog::builtin();
        let inventory = owned(&["radio_basic"]);
        let mut state = EquippedState::new();

        let outcome = state
            .equip("radio_basic", Slot::Radio, &catalog, &inventory)
            .unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.displaced, None);
        assert_eq!(state.get(Slot::Radio), Some("radio_basic"));
        assert!(state.is_equipped("radio_basic"));

        assert_eq!(state.unequip(Slot::Radio).unwrap(), "radio_basic");
        assert!(state.is_empty());
    }

    #[test]
    fn test_equip_rejects_unowned() {
        let catalog = ItemCatalog::builtin();
        let mut state = EquippedState::new();
        let result = state.equip("radio_basic", Slot::Radio, &catalog, &owned(&[]));
        assert_eq!(result, Err(GearError::ItemNotOwned("radio_basic".into())));
        assert!(state.is_empty());
    }

    #[test]
    fn test_equip_rejects_non_equippable() {
        let catalog = ItemCatalog::builtin();
        let mut state = EquippedState::new();
        let inventory = owned(&["radio_part", "mystery"]);

        assert_eq!(
            state.equip("radio_part", Slot::Radio, &catalog, &inventory),
            Err(GearError::ItemNotEquippable("radio_part".into()))
        );
        assert_eq!(
            state.equip("mystery", Slot::Radio, &catalog, &inventory),
            Err(GearError::ItemNotEquippable("mystery".into()))
        );
    }

    #[test]
    fn test_equip_rejects_wrong_slot() {
        let catalog = ItemCatalog::builtin();
        let mut state = EquippedState::new();
        let result = state.equip("compass", Slot::Head, &catalog, &owned(&["compass"]));
        assert_eq!(
            result,
            Err(GearError::InvalidSlotForItem {
                item: "compass".into(),
                slot: Slot::Head
            })
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_equip_displaces_occupant() {
        let catalog = ItemCatalog::builtin();
        let inventory = owned(&["radio_basic", "radio_advanced"]);
        let mut state = EquippedState::new();

        state
            .equip("radio_basic", Slot::Radio, &catalog, &inventory)
            .unwrap();
        let outcome = state
            .equip("radio_advanced", Slot::Radio, &catalog, &inventory)
            .unwrap();
        assert_eq!(outcome.displaced.as_deref(), Some("radio_basic"));
        assert_eq!(state.get(Slot::Radio), Some("radio_advanced"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_equip_same_slot_is_noop() {
        let catalog = ItemCatalog::builtin();
        let inventory = owned(&["compass"]);
        let mut state = EquippedState::new();

        state
            .equip("compass", Slot::Accessory1, &catalog, &inventory)
            .unwrap();
        let outcome = state
            .equip("compass", Slot::Accessory1, &catalog, &inventory)
            .unwrap();
        assert!(!outcome.changed);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_equip_rejects_duplicate_across_slots() {
        let catalog = ItemCatalog::builtin();
        let inventory = owned(&["signal_booster"]);
        let mut state = EquippedState::new();

        state
            .equip("signal_booster", Slot::Accessory1, &catalog, &inventory)
            .unwrap();
        let result = state.equip("signal_booster", Slot::Accessory2, &catalog, &inventory);
        assert_eq!(
            result,
            Err(GearError::AlreadyEquipped {
                item: "signal_booster".into(),
                slot: Slot::Accessory1
            })
        );
        assert_eq!(state.get(Slot::Accessory2), None);
    }

    #[test]
    fn test_unequip_empty_slot() {
        let mut state = EquippedState::new();
        assert_eq!(state.unequip(Slot::Head), Err(GearError::SlotEmpty(Slot::Head)));
    }

    #[test]
    fn test_unequip_item_by_id() {
        let catalog = ItemCatalog::builtin();
        let inventory = owned(&["compass"]);
        let mut state = EquippedState::new();
        state
            .equip("compass", Slot::Accessory2, &catalog, &inventory)
            .unwrap();

        assert_eq!(state.unequip_item("compass"), Some(Slot::Accessory2));
        assert_eq!(state.unequip_item("compass"), None);
    }

    #[test]
    fn test_serializes_as_slot_map() {
        let catalog = ItemCatalog::builtin();
        let inventory = owned(&["radio_basic", "compass"]);
        let mut state = EquippedState::new();
        state
            .equip("compass", Slot::Accessory1, &catalog, &inventory)
            .unwrap();
        state
            .equip("radio_basic", Slot::Radio, &catalog, &inventory)
            .unwrap();

        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"Radio":"radio_basic","Accessory1":"compass"}"#);
    }
}
