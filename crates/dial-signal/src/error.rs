//! Error types for band and signal catalog construction

use thiserror::Error;

/// Configuration errors raised while building a band or a signal catalog
///
/// All of these are construction-time failures. Once a band and catalog
/// exist, resolution never fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignalError {
    /// Band edges are not finite or not strictly ordered
    #[error("invalid band: min {min} MHz must be below max {max} MHz")]
    InvalidBand { min: f64, max: f64 },

    /// Tolerance is zero, negative or not finite
    #[error("invalid tolerance: {0} MHz")]
    InvalidTolerance(f64),

    /// Dial step is zero, negative or not finite
    #[error("invalid tuning step: {0} MHz")]
    InvalidStep(f64),

    /// A signal was declared without an identifier
    #[error("signal id must not be empty")]
    EmptyId,

    /// Two signals share an identifier
    #[error("duplicate signal id: {0}")]
    DuplicateId(String),

    /// Two signals are bound to the same frequency
    #[error("signals {first} and {second} share frequency {frequency} MHz")]
    DuplicateFrequency {
        first: String,
        second: String,
        frequency: f64,
    },

    /// A signal lies outside the tunable band
    #[error("signal {id} at {frequency} MHz lies outside the band")]
    OutOfBand { id: String, frequency: f64 },
}
