//! Receiver events
//!
//! Every state change the receiver makes is queued as a [`ReceiverEvent`].
//! Callers drain the queue after each operation and decide what to notify.

use dial_gear::{ComponentKind, RadioType, Slot};
use dial_signal::EffectiveParameters;

/// Something observable changed on the receiver
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiverEvent {
    /// An item went into a slot
    ItemEquipped {
        /// Slot now holding the item
        slot: Slot,
        /// Item id
        item: String,
    },

    /// An item left a slot
    ItemUnequipped {
        /// Slot that held the item
        slot: Slot,
        /// Item id
        item: String,
    },

    /// The Radio slot changed
    RadioChanged {
        /// Radio item id, `None` when the slot was cleared
        radio: Option<String>,
        /// Model category if the radio has an effect table
        radio_type: Option<RadioType>,
    },

    /// Parts were assembled into a new radio
    CustomRadioAssembled {
        /// Item id added to the inventory
        item: String,
    },

    /// A component gained a level
    ComponentUpgraded {
        component: ComponentKind,
        level: u8,
    },

    /// Effective parameters differ from the previous computation
    EffectsUpdated(EffectiveParameters),

    /// The radio was switched on or off
    PowerChanged(bool),

    /// A signal came into reach
    SignalAcquired {
        /// Signal id
        id: String,
        /// Dial position in MHz
        frequency: f64,
        /// Strength at acquisition
        strength: f64,
    },

    /// The previously received signal went out of reach
    SignalLost {
        /// Signal id
        id: String,
    },

    /// A signal was received for the first time
    SignalDiscovered {
        /// Signal id
        id: String,
    },
}
