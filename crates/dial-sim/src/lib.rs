//! Dial Receiver Simulation
//!
//! Ties signal resolution to equipment state:
//!
//! - **Receiver**: owns the band, catalogs, equipped items, component levels
//!   and dial position, and queues [`ReceiverEvent`]s on every change
//! - **ReceiverConfig**: JSON-loadable description of all game data
//! - **SaveState**: the persistent slice of receiver state
//! - **run_receiver_task**: single-owner async task with a cloneable
//!   [`ReceiverHandle`]
//!
//! # Example
//!
//! ```rust
//! use dial_gear::Slot;
//! use dial_sim::Receiver;
//!
//! let mut rx = Receiver::builtin();
//! rx.add_item("radio_military");
//! rx.equip("radio_military", Slot::Radio).unwrap();
//!
//! let reception = rx.tune(95.7);
//! assert_eq!(reception.matched_id.as_deref(), Some("military_comms"));
//! assert!(reception.payload_unlocked(&rx.params()));
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod receiver;
pub mod receiver_task;
pub mod save;

pub use config::ReceiverConfig;
pub use error::SimError;
pub use events::ReceiverEvent;
pub use receiver::{Receiver, DEFAULT_TUNING_STEP};
pub use receiver_task::{run_receiver_task, ReceiverCommand, ReceiverHandle, ReceiverStatus};
pub use save::SaveState;
