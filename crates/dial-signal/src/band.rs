//! Tunable frequency band

use serde::{Deserialize, Serialize};

use crate::error::SignalError;

/// Immutable description of the tunable range
///
/// Frequencies are in MHz. The default tolerance is the half-width of the
/// window around a signal inside which it can be received at all; signals
/// may override it individually.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BandSpec", into = "BandSpec")]
pub struct FrequencyBand {
    min: f64,
    max: f64,
    tolerance_default: f64,
}

/// Serialized form of a [`FrequencyBand`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSpec {
    /// Lower band edge in MHz
    pub min_mhz: f64,
    /// Upper band edge in MHz
    pub max_mhz: f64,
    /// Default reception tolerance in MHz
    pub tolerance_mhz: f64,
}

impl FrequencyBand {
    /// Create a validated band
    pub fn new(min: f64, max: f64, tolerance_default: f64) -> Result<Self, SignalError> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(SignalError::InvalidBand { min, max });
        }
        validate_tolerance(tolerance_default)?;

        Ok(Self {
            min,
            max,
            tolerance_default,
        })
    }

    /// Lower band edge in MHz
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper band edge in MHz
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Tolerance used by signals without an override
    pub fn tolerance_default(&self) -> f64 {
        self.tolerance_default
    }

    /// Band width in MHz (always positive)
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Whether a frequency lies on the dial
    pub fn contains(&self, frequency: f64) -> bool {
        frequency >= self.min && frequency <= self.max
    }

    /// Clamp a frequency onto the dial
    ///
    /// NaN maps to the lower edge so downstream arithmetic stays finite.
    pub fn clamp(&self, frequency: f64) -> f64 {
        if frequency.is_nan() {
            return self.min;
        }
        frequency.clamp(self.min, self.max)
    }

    /// Distance from the (clamped) frequency to the nearest band edge
    pub fn edge_distance(&self, frequency: f64) -> f64 {
        let f = self.clamp(frequency);
        (f - self.min).min(self.max - f)
    }

    /// Snap a frequency onto a grid of `step` MHz anchored at the lower edge
    pub fn snap(&self, frequency: f64, step: f64) -> f64 {
        let f = self.clamp(frequency);
        if !(step.is_finite() && step > 0.0) {
            return f;
        }
        let steps = ((f - self.min) / step).round();
        self.clamp(self.min + steps * step)
    }

    /// Format a frequency for display
    pub fn frequency_display(frequency: f64) -> String {
        format!("{:.1} MHz", frequency)
    }
}

impl Default for FrequencyBand {
    /// The FM broadcast band
    fn default() -> Self {
        Self {
            min: 88.0,
            max: 108.0,
            tolerance_default: 0.3,
        }
    }
}

impl TryFrom<BandSpec> for FrequencyBand {
    type Error = SignalError;

    fn try_from(spec: BandSpec) -> Result<Self, Self::Error> {
        Self::new(spec.min_mhz, spec.max_mhz, spec.tolerance_mhz)
    }
}

impl From<FrequencyBand> for BandSpec {
    fn from(band: FrequencyBand) -> Self {
        Self {
            min_mhz: band.min,
            max_mhz: band.max,
            tolerance_mhz: band.tolerance_default,
        }
    }
}

/// Check that a tolerance is usable as a divisor
pub(crate) fn validate_tolerance(tolerance: f64) -> Result<(), SignalError> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(())
    } else {
        Err(SignalError::InvalidTolerance(tolerance))
    }
}
