//! Effective reception parameters

/// Snapshot of the reception parameters produced by the equipment pipeline
///
/// Magnitudes are multiplicative factors where `1.0` is neutral. The two
/// capability flags are already resolved from their numeric encoding.
/// Values are recomputed whenever equipment or component levels change and
/// are never stored on their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveParameters {
    /// Divisor applied to signal tolerance
    pub signal_range: f64,
    /// Divisor applied to the dial step
    pub frequency_precision: f64,
    /// Clarity factor consumed by the audio layer
    pub signal_clarity: f64,
    /// Multiplier applied to signal strength (result is capped at 1.0)
    pub signal_boost: f64,
    /// Power drain factor
    pub battery_consumption: f64,
    /// Encrypted payloads may be delivered
    pub decode_encrypted: bool,
    /// Hidden payloads may be delivered
    pub detect_hidden_signals: bool,
}

impl EffectiveParameters {
    /// Parameters with no equipment influence
    pub const NEUTRAL: Self = Self {
        signal_range: 1.0,
        frequency_precision: 1.0,
        signal_clarity: 1.0,
        signal_boost: 1.0,
        battery_consumption: 1.0,
        decode_encrypted: false,
        detect_hidden_signals: false,
    };

    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        format!(
            "range x{:.2} precision x{:.2} clarity x{:.2} boost x{:.2} battery x{:.2}{}{}",
            self.signal_range,
            self.frequency_precision,
            self.signal_clarity,
            self.signal_boost,
            self.battery_consumption,
            if self.decode_encrypted { " [DECODE]" } else { "" },
            if self.detect_hidden_signals { " [HIDDEN]" } else { "" },
        )
    }
}

impl Default for EffectiveParameters {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Keep a multiplicative factor usable as a divisor
///
/// NaN reads as neutral. Anything else is clamped into the positive finite
/// range, so overflowed products saturate at `f64::MAX` and underflowed ones
/// at `f64::MIN_POSITIVE`.
pub fn bounded_factor(value: f64) -> f64 {
    if value.is_nan() {
        1.0
    } else {
        value.clamp(f64::MIN_POSITIVE, f64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_factor() {
        assert_eq!(bounded_factor(1.5), 1.5);
        assert_eq!(bounded_factor(f64::INFINITY), f64::MAX);
        assert_eq!(bounded_factor(1e200 * 1e200), f64::MAX);
        assert_eq!(bounded_factor(0.0), f64::MIN_POSITIVE);
        assert_eq!(bounded_factor(1e-200 * 1e-200), f64::MIN_POSITIVE);
        assert_eq!(bounded_factor(-2.0), f64::MIN_POSITIVE);
        assert_eq!(bounded_factor(f64::NAN), 1.0);
    }
}
