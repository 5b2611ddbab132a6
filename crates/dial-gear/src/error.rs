//! Error types for equipment and component upgrades

use thiserror::Error;

use crate::effect::EffectName;
use crate::slot::Slot;
use crate::upgrade::ComponentKind;

/// Errors raised by equip, unequip and upgrade operations or by catalog
/// construction
///
/// None of these are fatal. A rejected operation leaves all state unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GearError {
    /// Item cannot go into the requested slot
    #[error("slot {slot} is not valid for item {item}")]
    InvalidSlotForItem { item: String, slot: Slot },

    /// Item is unknown to the equipment catalog or flagged non-equippable
    #[error("item {0} is not equippable")]
    ItemNotEquippable(String),

    /// Item is not in the inventory
    #[error("item {0} is not in the inventory")]
    ItemNotOwned(String),

    /// Item already occupies another slot
    #[error("item {item} is already equipped in slot {slot}")]
    AlreadyEquipped { item: String, slot: Slot },

    /// Component cannot be upgraded further
    #[error("{component} is already at max level {max}")]
    AtMaxLevel { component: ComponentKind, max: u8 },

    /// Nothing to unequip
    #[error("slot {0} is empty")]
    SlotEmpty(Slot),

    /// Restored component level is above the component maximum
    #[error("{component} level {level} exceeds max level {max}")]
    LevelOutOfRange {
        component: ComponentKind,
        level: u8,
        max: u8,
    },

    /// Effect value is not finite or not allowed for the effect
    #[error("invalid value {value} for effect {effect}")]
    InvalidEffectValue { effect: EffectName, value: f64 },

    /// Radio item defines effects that the radio tables would shadow
    #[error("radio item {0} must not define effects, use the radio tables")]
    RadioItemEffects(String),

    /// Assembly part is not in the inventory
    #[error("missing part {0}")]
    MissingPart(String),

    /// Two catalog entries share an identifier
    #[error("duplicate item: {0}")]
    DuplicateItem(String),

    /// Unrecognized slot, component or effect name
    #[error("unknown name: {0}")]
    UnknownName(String),
}
