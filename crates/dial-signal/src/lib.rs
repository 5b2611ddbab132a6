//! Analog Dial Signal Library
//!
//! This crate models what a listener hears while turning the dial of a
//! simulated analog radio:
//!
//! - **FrequencyBand**: the tunable range and its default reception tolerance
//! - **SignalCatalog**: broadcasts bound to target frequencies
//! - **SignalResolver**: picks the nearest broadcast in reach and computes
//!   signal strength and static intensity
//! - **StaticFloor**: the noise level of empty stretches of the dial
//!
//! Resolution is a pure function of the dial position, the catalog and the
//! [`EffectiveParameters`] produced by the equipment pipeline.
//!
//! # Example
//!
//! ```rust
//! use dial_signal::{EffectiveParameters, FrequencyBand, SignalCatalog, SignalEntry, SignalResolver};
//!
//! let band = FrequencyBand::new(88.0, 108.0, 0.3).unwrap();
//! let catalog = SignalCatalog::new(
//!     vec![SignalEntry::new("distress", 96.3, "msg_distress").masked()],
//!     &band,
//! )
//! .unwrap();
//!
//! let resolver = SignalResolver::new(band);
//! let rx = resolver.resolve(96.3, &EffectiveParameters::NEUTRAL, &catalog);
//!
//! assert_eq!(rx.matched_id.as_deref(), Some("distress"));
//! assert_eq!(rx.strength, 1.0);
//! assert_eq!(rx.static_intensity, 0.0);
//! ```

pub mod band;
pub mod catalog;
pub mod error;
pub mod params;
pub mod resolver;
pub mod static_floor;

pub use band::{BandSpec, FrequencyBand};
pub use catalog::{builtin_signals, MessageRef, SignalCatalog, SignalEntry};
pub use error::SignalError;
pub use params::{bounded_factor, EffectiveParameters};
pub use resolver::{Reception, SignalResolver};
pub use static_floor::{EdgeFalloff, SpectrumNoise, StaticFloor, StaticFloorConfig};
