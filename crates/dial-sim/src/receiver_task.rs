//! Receiver actor task
//!
//! Owns a [`Receiver`] inside an async task so that several front ends can
//! share it. Commands arrive on an mpsc channel and carry oneshot reply
//! channels. Events drained after each command fan out on a broadcast
//! channel.
//!
//! # Example
//!
//! ```rust,ignore
//! use dial_sim::{run_receiver_task, Receiver, ReceiverHandle};
//! use tokio::sync::{broadcast, mpsc};
//!
//! let (cmd_tx, cmd_rx) = mpsc::channel(32);
//! let (event_tx, mut event_rx) = broadcast::channel(64);
//! tokio::spawn(run_receiver_task(Receiver::builtin(), cmd_rx, event_tx));
//!
//! let handle = ReceiverHandle::new(cmd_tx);
//! let reception = handle.tune(91.5).await?;
//! ```

use std::collections::BTreeSet;

use dial_gear::{
    ComponentKind, ComponentLevels, EquipOutcome, EquippedState, GearError, RadioType, Slot,
};
use dial_signal::{EffectiveParameters, Reception};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info};

use crate::error::SimError;
use crate::events::ReceiverEvent;
use crate::receiver::Receiver;
use crate::save::SaveState;

/// Snapshot of the receiver for display
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiverStatus {
    /// Dial position in MHz
    pub frequency: f64,
    /// Radio on
    pub powered: bool,
    /// What is heard at the dial position
    pub reception: Reception,
    /// Effective parameters
    pub params: EffectiveParameters,
    /// Dial step after precision
    pub tuning_step: f64,
    /// Type of the equipped radio
    pub radio_type: Option<RadioType>,
    /// Slot contents
    pub equipped: EquippedState,
    /// Component levels
    pub levels: ComponentLevels,
    /// Owned items
    pub inventory: BTreeSet<String>,
    /// Signals received at least once
    pub discovered: BTreeSet<String>,
    /// Number of signals on the dial
    pub signal_count: usize,
    /// Custom radio parts are all held
    pub can_assemble: bool,
}

impl ReceiverStatus {
    /// Capture the receiver's current state
    pub fn from_receiver(receiver: &Receiver) -> Self {
        Self {
            frequency: receiver.frequency(),
            powered: receiver.is_powered(),
            reception: receiver.reception(),
            params: receiver.params(),
            tuning_step: receiver.tuning_step(),
            radio_type: receiver.radio_type(),
            equipped: receiver.equipped().clone(),
            levels: receiver.levels(),
            inventory: receiver.inventory().clone(),
            discovered: receiver.discovered().clone(),
            signal_count: receiver.signals().len(),
            can_assemble: receiver.can_assemble_custom_radio(),
        }
    }
}

/// Commands sent to the receiver task
#[derive(Debug)]
pub enum ReceiverCommand {
    /// Move the dial
    Tune {
        frequency: f64,
        response: oneshot::Sender<Reception>,
    },

    /// Move the dial by whole steps
    Nudge {
        steps: i32,
        response: oneshot::Sender<Reception>,
    },

    /// Switch the radio on or off
    SetPowered { powered: bool },

    /// Equip an item
    Equip {
        item: String,
        slot: Slot,
        response: oneshot::Sender<Result<EquipOutcome, GearError>>,
    },

    /// Clear a slot
    Unequip {
        slot: Slot,
        response: oneshot::Sender<Result<String, GearError>>,
    },

    /// Upgrade a component
    Upgrade {
        component: ComponentKind,
        response: oneshot::Sender<Result<u8, GearError>>,
    },

    /// Add an item to the inventory
    AddItem {
        item: String,
        response: oneshot::Sender<bool>,
    },

    /// Remove an item from the inventory
    RemoveItem {
        item: String,
        response: oneshot::Sender<bool>,
    },

    /// Assemble the custom radio from its parts
    AssembleCustomRadio {
        response: oneshot::Sender<Result<(), GearError>>,
    },

    /// Query a status snapshot
    Status {
        response: oneshot::Sender<ReceiverStatus>,
    },

    /// Snapshot the persistent state
    SaveState {
        response: oneshot::Sender<SaveState>,
    },

    /// Restore persisted state
    RestoreState {
        state: SaveState,
        response: oneshot::Sender<Result<(), GearError>>,
    },

    /// Stop the task
    Shutdown,
}

/// Run the receiver task until shutdown or until every command sender is
/// dropped
///
/// Returns the receiver so its final state can be saved.
pub async fn run_receiver_task(
    mut receiver: Receiver,
    mut cmd_rx: mpsc::Receiver<ReceiverCommand>,
    event_tx: broadcast::Sender<ReceiverEvent>,
) -> Receiver {
    info!("Receiver task started");

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            ReceiverCommand::Tune {
                frequency,
                response,
            } => {
                let _ = response.send(receiver.tune(frequency));
            }

            ReceiverCommand::Nudge { steps, response } => {
                let _ = response.send(receiver.nudge(steps));
            }

            ReceiverCommand::SetPowered { powered } => {
                receiver.set_powered(powered);
            }

            ReceiverCommand::Equip {
                item,
                slot,
                response,
            } => {
                let _ = response.send(receiver.equip(&item, slot));
            }

            ReceiverCommand::Unequip { slot, response } => {
                let _ = response.send(receiver.unequip(slot));
            }

            ReceiverCommand::Upgrade {
                component,
                response,
            } => {
                let _ = response.send(receiver.upgrade(component));
            }

            ReceiverCommand::AddItem { item, response } => {
                let _ = response.send(receiver.add_item(item));
            }

            ReceiverCommand::RemoveItem { item, response } => {
                let _ = response.send(receiver.remove_item(&item));
            }

            ReceiverCommand::AssembleCustomRadio { response } => {
                let _ = response.send(receiver.assemble_custom_radio());
            }

            ReceiverCommand::Status { response } => {
                let _ = response.send(ReceiverStatus::from_receiver(&receiver));
            }

            ReceiverCommand::SaveState { response } => {
                let _ = response.send(receiver.save_state());
            }

            ReceiverCommand::RestoreState { state, response } => {
                let _ = response.send(receiver.restore_state(&state));
            }

            ReceiverCommand::Shutdown => {
                debug!("Receiver task received shutdown");
                break;
            }
        }

        for event in receiver.drain_events() {
            // No subscribers is fine
            let _ = event_tx.send(event);
        }
    }

    info!("Receiver task stopped");
    receiver
}

/// Cloneable client for a running receiver task
#[derive(Debug, Clone)]
pub struct ReceiverHandle {
    cmd_tx: mpsc::Sender<ReceiverCommand>,
}

impl ReceiverHandle {
    /// Wrap a command sender
    pub fn new(cmd_tx: mpsc::Sender<ReceiverCommand>) -> Self {
        Self { cmd_tx }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> ReceiverCommand,
    ) -> Result<T, SimError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| SimError::TaskStopped)?;
        rx.await.map_err(|_| SimError::TaskStopped)
    }

    /// Move the dial
    pub async fn tune(&self, frequency: f64) -> Result<Reception, SimError> {
        self.request(|response| ReceiverCommand::Tune {
            frequency,
            response,
        })
        .await
    }

    /// Move the dial by whole steps
    pub async fn nudge(&self, steps: i32) -> Result<Reception, SimError> {
        self.request(|response| ReceiverCommand::Nudge { steps, response })
            .await
    }

    /// Switch the radio on or off
    pub async fn set_powered(&self, powered: bool) -> Result<(), SimError> {
        self.cmd_tx
            .send(ReceiverCommand::SetPowered { powered })
            .await
            .map_err(|_| SimError::TaskStopped)
    }

    /// Equip an item
    pub async fn equip(&self, item: impl Into<String>, slot: Slot) -> Result<EquipOutcome, SimError> {
        let item = item.into();
        Ok(self
            .request(|response| ReceiverCommand::Equip {
                item,
                slot,
                response,
            })
            .await??)
    }

    /// Clear a slot
    pub async fn unequip(&self, slot: Slot) -> Result<String, SimError> {
        Ok(self
            .request(|response| ReceiverCommand::Unequip { slot, response })
            .await??)
    }

    /// Upgrade a component
    pub async fn upgrade(&self, component: ComponentKind) -> Result<u8, SimError> {
        Ok(self
            .request(|response| ReceiverCommand::Upgrade {
                component,
                response,
            })
            .await??)
    }

    /// Add an item to the inventory
    pub async fn add_item(&self, item: impl Into<String>) -> Result<bool, SimError> {
        let item = item.into();
        self.request(|response| ReceiverCommand::AddItem { item, response })
            .await
    }

    /// Remove an item from the inventory
    pub async fn remove_item(&self, item: impl Into<String>) -> Result<bool, SimError> {
        let item = item.into();
        self.request(|response| ReceiverCommand::RemoveItem { item, response })
            .await
    }

    /// Assemble the custom radio from its parts
    pub async fn assemble_custom_radio(&self) -> Result<(), SimError> {
        Ok(self
            .request(|response| ReceiverCommand::AssembleCustomRadio { response })
            .await??)
    }

    /// Query a status snapshot
    pub async fn status(&self) -> Result<ReceiverStatus, SimError> {
        self.request(|response| ReceiverCommand::Status { response })
            .await
    }

    /// Snapshot the persistent state
    pub async fn save_state(&self) -> Result<SaveState, SimError> {
        self.request(|response| ReceiverCommand::SaveState { response })
            .await
    }

    /// Restore persisted state
    pub async fn restore_state(&self, state: SaveState) -> Result<(), SimError> {
        Ok(self
            .request(|response| ReceiverCommand::RestoreState { state, response })
            .await??)
    }

    /// Ask the task to stop
    pub async fn shutdown(&self) -> Result<(), SimError> {
        self.cmd_tx
            .send(ReceiverCommand::Shutdown)
            .await
            .map_err(|_| SimError::TaskStopped)
    }
}
