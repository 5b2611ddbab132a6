//! Effect vocabulary and effect tables
//!
//! Every effect an item or component can contribute is a variant of
//! [`EffectName`]. Tables are fixed-size arrays indexed by effect, and only
//! turn into string-keyed maps at the serialization boundary.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GearError;

/// Values strictly above this read as an enabled capability
pub const CAPABILITY_THRESHOLD: f64 = 0.5;

/// Convert a capability channel value into a flag
///
/// The comparison is strict: exactly `0.5` is disabled.
pub fn capability_enabled(value: f64) -> bool {
    value > CAPABILITY_THRESHOLD
}

/// Named effect contributed by equipment or radio components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectName {
    SignalRange,
    FrequencyPrecision,
    SignalClarity,
    SignalBoost,
    BatteryConsumption,
    TuningSpeed,
    DecodeEncrypted,
    DetectHiddenSignals,
    AudioQuality,
    NoiseReduction,
    SignalAnalysis,
    DecodeSpeed,
    NavigationAccuracy,
    SignalDirection,
    StrangeEffects,
}

impl EffectName {
    /// Number of effects
    pub const COUNT: usize = 15;

    /// All effects in declaration order
    pub const ALL: [EffectName; Self::COUNT] = [
        Self::SignalRange,
        Self::FrequencyPrecision,
        Self::SignalClarity,
        Self::SignalBoost,
        Self::BatteryConsumption,
        Self::TuningSpeed,
        Self::DecodeEncrypted,
        Self::DetectHiddenSignals,
        Self::AudioQuality,
        Self::NoiseReduction,
        Self::SignalAnalysis,
        Self::DecodeSpeed,
        Self::NavigationAccuracy,
        Self::SignalDirection,
        Self::StrangeEffects,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Configuration key for this effect
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SignalRange => "signal_range",
            Self::FrequencyPrecision => "frequency_precision",
            Self::SignalClarity => "signal_clarity",
            Self::SignalBoost => "signal_boost",
            Self::BatteryConsumption => "battery_consumption",
            Self::TuningSpeed => "tuning_speed",
            Self::DecodeEncrypted => "decode_encrypted",
            Self::DetectHiddenSignals => "detect_hidden_signals",
            Self::AudioQuality => "audio_quality",
            Self::NoiseReduction => "noise_reduction",
            Self::SignalAnalysis => "signal_analysis",
            Self::DecodeSpeed => "decode_speed",
            Self::NavigationAccuracy => "navigation_accuracy",
            Self::SignalDirection => "signal_direction",
            Self::StrangeEffects => "strange_effects",
        }
    }

    /// Capability effects encode a flag in the numeric channel
    pub fn is_capability(&self) -> bool {
        matches!(self, Self::DecodeEncrypted | Self::DetectHiddenSignals)
    }

    /// Check a value for this effect
    ///
    /// Magnitudes must be positive so they stay usable as divisors;
    /// capabilities only need to be non-negative.
    pub fn validate(&self, value: f64) -> Result<(), GearError> {
        let ok = value.is_finite() && if self.is_capability() { value >= 0.0 } else { value > 0.0 };
        if ok {
            Ok(())
        } else {
            Err(GearError::InvalidEffectValue {
                effect: *self,
                value,
            })
        }
    }
}

impl fmt::Display for EffectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectName {
    type Err = GearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| GearError::UnknownName(s.to_string()))
    }
}

/// Effect values keyed by [`EffectName`]
///
/// An absent entry means the source does not define the effect, which is
/// different from a defined neutral `1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<EffectName, f64>",
    into = "BTreeMap<EffectName, f64>"
)]
pub struct EffectTable {
    values: [Option<f64>; EffectName::COUNT],
}

impl EffectTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: EffectName, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Value of an effect, if defined
    pub fn get(&self, name: EffectName) -> Option<f64> {
        self.values[name.index()]
    }

    /// Define or overwrite an effect
    pub fn set(&mut self, name: EffectName, value: f64) {
        self.values[name.index()] = Some(value);
    }

    /// Remove an effect
    pub fn remove(&mut self, name: EffectName) -> Option<f64> {
        self.values[name.index()].take()
    }

    /// Whether an effect is defined
    pub fn contains(&self, name: EffectName) -> bool {
        self.get(name).is_some()
    }

    /// Multiply an effect in, defining it if absent
    ///
    /// Products saturate at `f64::MAX` instead of overflowing.
    pub fn multiply(&mut self, name: EffectName, factor: f64) {
        let slot = &mut self.values[name.index()];
        *slot = Some(slot.map_or(factor, |v| (v * factor).min(f64::MAX)));
    }

    /// Multiply every effect of `other` into this table
    pub fn combine(&mut self, other: &EffectTable) {
        for (name, value) in other.iter() {
            self.multiply(name, value);
        }
    }

    /// Copy every effect of `other` over this table, replacing existing ones
    pub fn overlay(&mut self, other: &EffectTable) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    /// Magnitude with absent effects read as neutral `1.0`
    pub fn magnitude(&self, name: EffectName) -> f64 {
        self.get(name).unwrap_or(1.0)
    }

    /// Capability flag with absent effects read as disabled
    pub fn capability(&self, name: EffectName) -> bool {
        self.get(name).is_some_and(capability_enabled)
    }

    /// Defined effects in [`EffectName`] order
    pub fn iter(&self) -> impl Iterator<Item = (EffectName, f64)> + '_ {
        EffectName::ALL
            .into_iter()
            .filter_map(|name| self.get(name).map(|value| (name, value)))
    }

    /// Number of defined effects
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Whether no effect is defined
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Check every defined value
    pub fn validate(&self) -> Result<(), GearError> {
        self.iter().try_for_each(|(name, value)| name.validate(value))
    }
}

impl FromIterator<(EffectName, f64)> for EffectTable {
    fn from_iter<I: IntoIterator<Item = (EffectName, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, value) in iter {
            table.set(name, value);
        }
        table
    }
}

impl TryFrom<BTreeMap<EffectName, f64>> for EffectTable {
    type Error = GearError;

    fn try_from(map: BTreeMap<EffectName, f64>) -> Result<Self, Self::Error> {
        let table: Self = map.into_iter().collect();
        table.validate()?;
        Ok(table)
    }
}

impl From<EffectTable> for BTreeMap<EffectName, f64> {
    fn from(table: EffectTable) -> Self {
        table.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_threshold_is_strict() {
        assert!(!capability_enabled(0.5));
        assert!(capability_enabled(0.50001));
        assert!(!capability_enabled(0.0));
        assert!(capability_enabled(1.0));
    }

    #[test]
    fn test_name_round_trip() {
        for name in EffectName::ALL {
            assert_eq!(name.as_str().parse::<EffectName>().unwrap(), name);
        }
        assert_eq!(
            "signal_rnage".parse::<EffectName>(),
            Err(GearError::UnknownName("signal_rnage".into()))
        );
    }

    #[test]
    fn test_all_is_indexed_in_order() {
        for (i, name) in EffectName::ALL.into_iter().enumerate() {
            assert_eq!(name.index(), i);
        }
    }

    #[test]
    fn test_absent_is_not_neutral() {
        let table = EffectTable::new().with(EffectName::SignalRange, 1.0);
        assert!(table.contains(EffectName::SignalRange));
        assert!(!table.contains(EffectName::SignalBoost));
        assert_eq!(table.magnitude(EffectName::SignalBoost), 1.0);
        assert!(!table.capability(EffectName::DecodeEncrypted));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_multiply_and_combine() {
        let mut table = EffectTable::new().with(EffectName::SignalBoost, 1.2);
        table.multiply(EffectName::SignalBoost, 1.5);
        table.multiply(EffectName::SignalRange, 2.0);
        assert!((table.get(EffectName::SignalBoost).unwrap() - 1.8).abs() < 1e-12);
        assert_eq!(table.get(EffectName::SignalRange), Some(2.0));

        let other = EffectTable::new()
            .with(EffectName::SignalRange, 0.5)
            .with(EffectName::AudioQuality, 1.1);
        table.combine(&other);
        assert_eq!(table.get(EffectName::SignalRange), Some(1.0));
        assert_eq!(table.get(EffectName::AudioQuality), Some(1.1));
    }

    #[test]
    fn test_overlay_replaces() {
        let mut table = EffectTable::new().with(EffectName::SignalBoost, 1.2);
        table.overlay(&EffectTable::new().with(EffectName::SignalBoost, 1.5));
        assert_eq!(table.get(EffectName::SignalBoost), Some(1.5));
    }

    #[test]
    fn test_validate_values() {
        assert!(EffectName::SignalRange.validate(0.0).is_err());
        assert!(EffectName::SignalRange.validate(-1.0).is_err());
        assert!(EffectName::SignalRange.validate(f64::NAN).is_err());
        assert!(EffectName::DecodeEncrypted.validate(0.0).is_ok());
        assert!(EffectName::DecodeEncrypted.validate(-0.5).is_err());
    }

    #[test]
    fn test_serde_uses_string_keys() {
        let table = EffectTable::new()
            .with(EffectName::SignalRange, 1.5)
            .with(EffectName::DecodeEncrypted, 1.0);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"signal_range":1.5,"decode_encrypted":1.0}"#);

        let back: EffectTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_serde_rejects_unknown_and_invalid() {
        assert!(serde_json::from_str::<EffectTable>(r#"{"signal_rnage":1.5}"#).is_err());
        assert!(serde_json::from_str::<EffectTable>(r#"{"signal_range":0.0}"#).is_err());
    }
}
