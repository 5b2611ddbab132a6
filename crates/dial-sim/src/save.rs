//! Persisted receiver state

use dial_gear::{ComponentLevels, EquippedState};
use serde::{Deserialize, Serialize};

/// Everything about the receiver that survives a restart
///
/// Effective parameters are never stored; they are recomputed on restore.
///
/// ```json
/// {
///   "equipped": {"Radio": "radio_custom", "Accessory1": "compass"},
///   "levels": {"Antenna": 2, "Tuner": 1, "Amplifier": 1, "Battery": 1, "Decoder": 0}
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    /// Slot to item id
    #[serde(default)]
    pub equipped: EquippedState,
    /// Component to level
    #[serde(default)]
    pub levels: ComponentLevels,
}

impl SaveState {
    /// Parse from JSON
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
