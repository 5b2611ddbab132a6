//! Equipment effects for the dial receiver
//!
//! Items equipped into fixed [`Slot`]s carry [`EffectTable`]s keyed by a
//! closed [`EffectName`] vocabulary. The [`RadioEffectsPipeline`] picks a base
//! table for the equipped radio (a fixed model table, or one composed from
//! [`ComponentLevels`] for the custom radio), multiplies in every other
//! equipped item through the [`EffectAggregator`], and produces the
//! [`EffectiveParameters`](dial_signal::EffectiveParameters) used by the
//! signal resolver.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use dial_gear::{ComponentLevels, EquippedState, ItemCatalog, RadioEffectsPipeline, Slot};
//!
//! let items = ItemCatalog::builtin();
//! let owned: BTreeSet<String> = ["radio_military".to_string()].into_iter().collect();
//!
//! let mut equipped = EquippedState::new();
//! equipped.equip("radio_military", Slot::Radio, &items, &owned).unwrap();
//!
//! let params = RadioEffectsPipeline::builtin()
//!     .recompute(&equipped, &ComponentLevels::default(), &items);
//! assert!(params.decode_encrypted);
//! ```

pub mod aggregate;
pub mod effect;
pub mod error;
pub mod item;
pub mod pipeline;
pub mod radio;
pub mod slot;
pub mod upgrade;

pub use aggregate::EffectAggregator;
pub use effect::{capability_enabled, EffectName, EffectTable, CAPABILITY_THRESHOLD};
pub use error::GearError;
pub use item::{builtin_items, EquipmentItem, Inventory, ItemCatalog, CUSTOM_RADIO, CUSTOM_RADIO_PARTS};
pub use pipeline::{parameters_from, RadioEffectsPipeline};
pub use radio::{RadioEffectCatalog, RadioModel, RadioSpec, RadioType};
pub use slot::{EquipOutcome, EquippedState, Slot};
pub use upgrade::{component_effects, composable_effects, ComponentKind, ComponentLevels, ComponentUpgradeTracker};
