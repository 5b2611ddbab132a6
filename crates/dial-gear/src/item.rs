//! Equipment items and the item catalog

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::effect::{EffectName, EffectTable};
use crate::error::GearError;
use crate::slot::Slot;

/// Ownership lookup provided by the inventory layer
pub trait Inventory {
    /// Whether the player holds the item
    fn owns(&self, item_id: &str) -> bool;
}

impl Inventory for BTreeSet<String> {
    fn owns(&self, item_id: &str) -> bool {
        self.contains(item_id)
    }
}

impl Inventory for HashSet<String> {
    fn owns(&self, item_id: &str) -> bool {
        self.contains(item_id)
    }
}

impl Inventory for Vec<String> {
    fn owns(&self, item_id: &str) -> bool {
        self.iter().any(|id| id == item_id)
    }
}

/// Catalog entry for an item that may be equipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    /// Item identifier shared with the inventory layer
    pub id: String,
    /// Crafting parts and similar items are listed but cannot be equipped
    #[serde(default = "default_true")]
    pub equippable: bool,
    /// Slots the item may occupy
    #[serde(default)]
    pub valid_slots: BTreeSet<Slot>,
    /// Effects contributed while equipped
    #[serde(default)]
    pub effects: EffectTable,
}

fn default_true() -> bool {
    true
}

impl EquipmentItem {
    /// Create an equippable item with no effects
    pub fn new(id: impl Into<String>, slots: impl IntoIterator<Item = Slot>) -> Self {
        Self {
            id: id.into(),
            equippable: true,
            valid_slots: slots.into_iter().collect(),
            effects: EffectTable::new(),
        }
    }

    /// Create an item that can never be equipped
    pub fn part(id: impl Into<String>) -> Self {
        Self {
            equippable: false,
            ..Self::new(id, [])
        }
    }

    /// Builder-style effect insert
    pub fn with_effect(mut self, name: EffectName, value: f64) -> Self {
        self.effects.set(name, value);
        self
    }

    /// Whether the item may go into `slot`
    pub fn fits(&self, slot: Slot) -> bool {
        self.equippable && self.valid_slots.contains(&slot)
    }
}

/// Validated set of equipment items keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCatalog {
    items: BTreeMap<String, EquipmentItem>,
}

impl ItemCatalog {
    /// Build a catalog, rejecting duplicate ids and invalid effect values
    ///
    /// Items that fit the Radio slot must not carry effects of their own,
    /// since the pipeline reads radio effects from the radio tables only.
    pub fn new(items: impl IntoIterator<Item = EquipmentItem>) -> Result<Self, GearError> {
        let mut map = BTreeMap::new();
        for item in items {
            item.effects.validate()?;
            if item.valid_slots.contains(&Slot::Radio) && !item.effects.is_empty() {
                return Err(GearError::RadioItemEffects(item.id));
            }
            if map.contains_key(&item.id) {
                return Err(GearError::DuplicateItem(item.id));
            }
            map.insert(item.id.clone(), item);
        }
        Ok(Self { items: map })
    }

    /// The built-in equipment
    pub fn builtin() -> Self {
        Self {
            items: builtin_items()
                .into_iter()
                .map(|item| (item.id.clone(), item))
                .collect(),
        }
    }

    /// Look up an item
    pub fn get(&self, item_id: &str) -> Option<&EquipmentItem> {
        self.items.get(item_id)
    }

    /// Iterate over items ordered by id
    pub fn iter(&self) -> impl Iterator<Item = &EquipmentItem> {
        self.items.values()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Item produced by assembling the custom radio
pub const CUSTOM_RADIO: &str = "radio_custom";

/// Parts consumed when assembling the custom radio
pub const CUSTOM_RADIO_PARTS: [&str; 2] = ["radio_broken", "radio_part"];

/// Equipment shipped with the game
pub fn builtin_items() -> Vec<EquipmentItem> {
    use EffectName::*;

    let accessory = [Slot::Accessory1, Slot::Accessory2];

    vec![
        EquipmentItem::new("headphones_basic", [Slot::Head])
            .with_effect(SignalClarity, 1.2)
            .with_effect(AudioQuality, 1.1),
        EquipmentItem::new("headphones_advanced", [Slot::Head])
            .with_effect(SignalClarity, 1.5)
            .with_effect(AudioQuality, 1.3)
            .with_effect(NoiseReduction, 1.2),
        // Radio effects live in the radio tables
        EquipmentItem::new("radio_basic", [Slot::Radio]),
        EquipmentItem::new("radio_advanced", [Slot::Radio]),
        EquipmentItem::new("radio_military", [Slot::Radio]),
        EquipmentItem::new(CUSTOM_RADIO, [Slot::Radio]),
        EquipmentItem::new("signal_analyzer", [Slot::Hands])
            .with_effect(SignalAnalysis, 1.0)
            .with_effect(DetectHiddenSignals, 1.0)
            .with_effect(DecodeSpeed, 1.2),
        EquipmentItem::new("signal_booster", accessory)
            .with_effect(SignalBoost, 1.3)
            .with_effect(SignalRange, 1.2),
        EquipmentItem::new("compass", accessory)
            .with_effect(NavigationAccuracy, 1.5)
            .with_effect(SignalDirection, 1.0),
        EquipmentItem::new("strange_crystal", accessory)
            .with_effect(SignalBoost, 1.5)
            .with_effect(DetectHiddenSignals, 1.0)
            .with_effect(StrangeEffects, 1.0),
        EquipmentItem::part(CUSTOM_RADIO_PARTS[0]),
        EquipmentItem::part(CUSTOM_RADIO_PARTS[1]),
    ]
}
