//! Error types for the receiver simulation

use dial_gear::GearError;
use dial_signal::SignalError;
use thiserror::Error;

/// Errors raised while loading configuration or talking to the receiver task
#[derive(Debug, Error)]
pub enum SimError {
    /// Band, signal or tuning configuration is invalid
    #[error("signal configuration error: {0}")]
    Signal(#[from] SignalError),

    /// Equipment data or operation was rejected
    #[error("equipment error: {0}")]
    Gear(#[from] GearError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The receiver task is no longer running
    #[error("receiver task stopped")]
    TaskStopped,
}
