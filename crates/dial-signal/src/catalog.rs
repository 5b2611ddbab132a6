//! Signal catalog
//!
//! Signals are narrative broadcasts bound to a frequency. The catalog is
//! loaded once and never changes afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::band::{validate_tolerance, FrequencyBand};
use crate::error::SignalError;

/// Opaque reference to a message in the narrative layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageRef(pub String);

impl MessageRef {
    /// Get the raw reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A broadcast bound to a target frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEntry {
    /// Unique, non-empty identifier
    pub id: String,
    /// Target frequency in MHz
    pub frequency: f64,
    /// Static-masked broadcasts are buried in noise until tuned precisely
    #[serde(default)]
    pub static_masked: bool,
    /// Payload delivered to the narrative layer
    pub message_ref: MessageRef,
    /// Per-signal tolerance, replacing the band default
    #[serde(default)]
    pub tolerance_override: Option<f64>,
    /// Payload is encrypted and needs a decoder
    #[serde(default)]
    pub encrypted: bool,
    /// Payload is hidden and needs hidden-signal detection
    #[serde(default)]
    pub hidden: bool,
}

impl SignalEntry {
    /// Create a clear, unencrypted signal
    pub fn new(id: impl Into<String>, frequency: f64, message_ref: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            frequency,
            static_masked: false,
            message_ref: MessageRef(message_ref.into()),
            tolerance_override: None,
            encrypted: false,
            hidden: false,
        }
    }

    /// Mark the signal as static-masked
    pub fn masked(mut self) -> Self {
        self.static_masked = true;
        self
    }

    /// Override the band tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance_override = Some(tolerance);
        self
    }

    /// Mark the payload as encrypted
    pub fn encrypted(mut self) -> Self {
        self.encrypted = true;
        self
    }

    /// Mark the payload as hidden
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Raw tolerance for this signal before equipment scaling
    pub fn tolerance(&self, band: &FrequencyBand) -> f64 {
        self.tolerance_override
            .unwrap_or_else(|| band.tolerance_default())
    }
}

/// Validated, immutable set of signals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalCatalog {
    entries: Vec<SignalEntry>,
}

impl SignalCatalog {
    /// Build a catalog, validating every entry against the band
    ///
    /// Catalog order is preserved; it breaks ties when two signals are
    /// equally far from the dial.
    pub fn new(entries: Vec<SignalEntry>, band: &FrequencyBand) -> Result<Self, SignalError> {
        let mut ids = HashSet::new();

        for (index, entry) in entries.iter().enumerate() {
            if entry.id.is_empty() {
                return Err(SignalError::EmptyId);
            }
            if !ids.insert(entry.id.as_str()) {
                return Err(SignalError::DuplicateId(entry.id.clone()));
            }
            if !entry.frequency.is_finite() || !band.contains(entry.frequency) {
                return Err(SignalError::OutOfBand {
                    id: entry.id.clone(),
                    frequency: entry.frequency,
                });
            }
            if let Some(tolerance) = entry.tolerance_override {
                validate_tolerance(tolerance)?;
            }
            if let Some(first) = entries[..index]
                .iter()
                .find(|other| other.frequency == entry.frequency)
            {
                return Err(SignalError::DuplicateFrequency {
                    first: first.id.clone(),
                    second: entry.id.clone(),
                    frequency: entry.frequency,
                });
            }
        }

        Ok(Self { entries })
    }

    /// The built-in broadcasts on the default FM band
    pub fn builtin() -> Self {
        Self {
            entries: builtin_signals(),
        }
    }

    /// Look up a signal by identifier
    pub fn get(&self, id: &str) -> Option<&SignalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Iterate over signals in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &SignalEntry> {
        self.entries.iter()
    }

    /// Number of signals
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no signals
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Broadcasts shipped with the game
pub fn builtin_signals() -> Vec<SignalEntry> {
    vec![
        SignalEntry::new("emergency_broadcast", 91.5, "msg_001").masked(),
        SignalEntry::new("military_comms", 95.7, "msg_002")
            .with_tolerance(0.2)
            .encrypted(),
        SignalEntry::new("survivor_message", 103.2, "msg_003")
            .masked()
            .with_tolerance(0.4),
        SignalEntry::new("final_message", 106.2, "final_message")
            .with_tolerance(0.1)
            .hidden(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let band = FrequencyBand::default();
        let catalog = SignalCatalog::new(builtin_signals(), &band).unwrap();
        assert_eq!(catalog, SignalCatalog::builtin());
        assert_eq!(catalog.len(), 4);
        assert!(catalog.get("military_comms").unwrap().encrypted);
        assert!(catalog.get("final_message").unwrap().hidden);
    }

    #[test]
    fn test_tolerance_falls_back_to_band() {
        let band = FrequencyBand::default();
        let plain = SignalEntry::new("a", 96.3, "m");
        let narrow = SignalEntry::new("b", 97.0, "m").with_tolerance(0.1);
        assert_eq!(plain.tolerance(&band), 0.3);
        assert_eq!(narrow.tolerance(&band), 0.1);
    }

    #[test]
    fn test_rejects_empty_id() {
        let band = FrequencyBand::default();
        let result = SignalCatalog::new(vec![SignalEntry::new("", 96.3, "m")], &band);
        assert_eq!(result, Err(SignalError::EmptyId));
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let band = FrequencyBand::default();
        let result = SignalCatalog::new(
            vec![
                SignalEntry::new("a", 96.3, "m"),
                SignalEntry::new("a", 97.3, "m"),
            ],
            &band,
        );
        assert_eq!(result, Err(SignalError::DuplicateId("a".into())));
    }

    #[test]
    fn test_rejects_duplicate_frequency() {
        let band = FrequencyBand::default();
        let result = SignalCatalog::new(
            vec![
                SignalEntry::new("a", 96.3, "m"),
                SignalEntry::new("b", 96.3, "m"),
            ],
            &band,
        );
        assert!(matches!(
            result,
            Err(SignalError::DuplicateFrequency { ref first, ref second, .. })
                if first == "a" && second == "b"
        ));
    }

    #[test]
    fn test_rejects_out_of_band() {
        let band = FrequencyBand::default();
        let result = SignalCatalog::new(vec![SignalEntry::new("a", 120.0, "m")], &band);
        assert!(matches!(result, Err(SignalError::OutOfBand { .. })));
    }

    #[test]
    fn test_rejects_zero_tolerance_override() {
        let band = FrequencyBand::default();
        let result = SignalCatalog::new(
            vec![SignalEntry::new("a", 96.3, "m").with_tolerance(0.0)],
            &band,
        );
        assert_eq!(result, Err(SignalError::InvalidTolerance(0.0)));
    }

    #[test]
    fn test_entry_deserialize_defaults() {
        let json = r#"{"id":"a","frequency":96.3,"message_ref":"msg_a"}"#;
        let entry: SignalEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.static_masked);
        assert!(!entry.encrypted);
        assert!(!entry.hidden);
        assert_eq!(entry.tolerance_override, None);
        assert_eq!(entry.message_ref.as_str(), "msg_a");
    }
}
