//! Receiver configuration
//!
//! A [`ReceiverConfig`] describes the band, the signals, the equipment and
//! the radio models. The default reproduces the built-in game data; a JSON
//! file may replace any part of it.

use std::path::Path;

use dial_gear::{builtin_items, EquipmentItem, ItemCatalog, RadioEffectCatalog, RadioEffectsPipeline};
use dial_signal::{builtin_signals, FrequencyBand, SignalCatalog, SignalEntry, SignalResolver, StaticFloorConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SimError;
use crate::receiver::{Receiver, DEFAULT_TUNING_STEP};

/// Full description of a receiver
///
/// ```json
/// {
///   "band": {"min_mhz": 88.0, "max_mhz": 108.0, "tolerance_mhz": 0.3},
///   "tuning_step": 0.1,
///   "static_floor": {"kind": "spectrum_noise"},
///   "signals": [{"id": "beacon", "frequency": 99.9, "message_ref": "msg_beacon"}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Tunable band and default tolerance
    pub band: FrequencyBand,
    /// Base dial step in MHz
    pub tuning_step: f64,
    /// Noise floor away from signals
    pub static_floor: StaticFloorConfig,
    /// Signals on the dial
    pub signals: Vec<SignalEntry>,
    /// Equipment catalog
    pub items: Vec<EquipmentItem>,
    /// Radio base tables keyed by item id
    pub radios: RadioEffectCatalog,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            band: FrequencyBand::default(),
            tuning_step: DEFAULT_TUNING_STEP,
            static_floor: StaticFloorConfig::default(),
            signals: builtin_signals(),
            items: builtin_items(),
            radios: RadioEffectCatalog::builtin(),
        }
    }
}

impl ReceiverConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        info!(
            "Loaded receiver config from {} ({} signals, {} items)",
            path.display(),
            config.signals.len(),
            config.items.len()
        );
        Ok(config)
    }

    /// Validate everything and build a receiver
    pub fn build(&self) -> Result<Receiver, SimError> {
        let signals = SignalCatalog::new(self.signals.clone(), &self.band)?;
        let items = ItemCatalog::new(self.items.clone())?;
        let resolver = SignalResolver::with_static_floor(self.band, self.static_floor.build());
        let pipeline = RadioEffectsPipeline::new(self.radios.clone());
        Ok(Receiver::new(
            resolver,
            signals,
            items,
            pipeline,
            self.tuning_step,
        )?)
    }
}
