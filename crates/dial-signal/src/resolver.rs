//! Signal resolution
//!
//! Turns a dial position into a reception: which signal (if any) is in
//! reach, how strong it is, and how much static sits on top of it.

use tracing::trace;

use crate::band::FrequencyBand;
use crate::catalog::{MessageRef, SignalCatalog, SignalEntry};
use crate::params::{bounded_factor, EffectiveParameters};
use crate::static_floor::{EdgeFalloff, StaticFloor};

/// Share of static left on a clear broadcast relative to a masked one
const CLEAR_STATIC_FACTOR: f64 = 0.5;

/// Result of resolving one dial position
#[derive(Debug, Clone, PartialEq)]
pub struct Reception {
    /// Dial position after clamping to the band
    pub frequency: f64,
    /// Matched signal
    pub matched_id: Option<String>,
    /// Payload of the matched signal
    pub message_ref: Option<MessageRef>,
    /// Reception quality in [0, 1]
    pub strength: f64,
    /// Noise level in [0, 1]
    pub static_intensity: f64,
    /// Matched payload is encrypted
    pub requires_decode: bool,
    /// Matched payload is hidden
    pub requires_hidden_detection: bool,
}

impl Reception {
    /// Reception of a switched-off radio
    pub fn silent(frequency: f64) -> Self {
        Self {
            frequency,
            matched_id: None,
            message_ref: None,
            strength: 0.0,
            static_intensity: 0.0,
            requires_decode: false,
            requires_hidden_detection: false,
        }
    }

    /// Whether a signal is in reach
    pub fn is_matched(&self) -> bool {
        self.matched_id.is_some()
    }

    /// Whether the payload may be handed to the narrative layer
    ///
    /// Capabilities never affect strength, only delivery.
    pub fn payload_unlocked(&self, params: &EffectiveParameters) -> bool {
        self.is_matched()
            && (!self.requires_decode || params.decode_encrypted)
            && (!self.requires_hidden_detection || params.detect_hidden_signals)
    }
}

/// Resolves dial positions against a signal catalog
#[derive(Debug)]
pub struct SignalResolver {
    band: FrequencyBand,
    floor: Box<dyn StaticFloor>,
}

impl SignalResolver {
    /// Create a resolver with the default edge-falloff static floor
    pub fn new(band: FrequencyBand) -> Self {
        Self::with_static_floor(band, Box::new(EdgeFalloff::default()))
    }

    /// Create a resolver with a custom static floor
    pub fn with_static_floor(band: FrequencyBand, floor: Box<dyn StaticFloor>) -> Self {
        Self { band, floor }
    }

    /// The band this resolver clamps to
    pub fn band(&self) -> &FrequencyBand {
        &self.band
    }

    /// Tolerance of `entry` once equipment range is applied
    ///
    /// The raw tolerance is divided by `signal_range`, which is first bounded
    /// to a positive finite factor. The result is finite and never negative;
    /// it can underflow to zero for extreme ranges.
    pub fn effective_tolerance(&self, entry: &SignalEntry, params: &EffectiveParameters) -> f64 {
        (entry.tolerance(&self.band) / bounded_factor(params.signal_range)).min(f64::MAX)
    }

    /// Resolve a dial position
    ///
    /// Only the nearest signal is considered; it matches when its distance
    /// is within its effective tolerance. Equally distant signals resolve to
    /// the one listed first.
    pub fn resolve(
        &self,
        frequency: f64,
        params: &EffectiveParameters,
        catalog: &SignalCatalog,
    ) -> Reception {
        let frequency = self.band.clamp(frequency);

        let nearest = catalog.iter().fold(None, |best: Option<(&SignalEntry, f64)>, entry| {
            let distance = (frequency - entry.frequency).abs();
            match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((entry, distance)),
            }
        });

        let matched = nearest.and_then(|(entry, distance)| {
            let tolerance = self.effective_tolerance(entry, params);
            (distance <= tolerance).then_some((entry, distance, tolerance))
        });

        let Some((entry, distance, tolerance)) = matched else {
            let static_intensity = self.floor.intensity(&self.band, frequency).clamp(0.0, 1.0);
            trace!(
                "No signal at {:.3} MHz, static {:.3}",
                frequency,
                static_intensity
            );
            return Reception {
                static_intensity,
                ..Reception::silent(frequency)
            };
        };

        // A zero tolerance only admits an exact hit
        let raw = if tolerance > 0.0 {
            (1.0 - distance / tolerance).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let strength = (raw * bounded_factor(params.signal_boost)).clamp(0.0, 1.0);
        let static_intensity = if entry.static_masked {
            1.0 - strength
        } else {
            (1.0 - strength) * CLEAR_STATIC_FACTOR
        };

        trace!(
            "Signal {} at {:.3} MHz: distance {:.3}, tolerance {:.3}, strength {:.3}, static {:.3}",
            entry.id,
            frequency,
            distance,
            tolerance,
            strength,
            static_intensity
        );

        Reception {
            frequency,
            matched_id: Some(entry.id.clone()),
            message_ref: Some(entry.message_ref.clone()),
            strength,
            static_intensity,
            requires_decode: entry.encrypted,
            requires_hidden_detection: entry.hidden,
        }
    }
}
