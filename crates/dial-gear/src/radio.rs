//! Radio models and their base effect tables

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::effect::{EffectName, EffectTable};
use crate::upgrade::{composable_effects, ComponentLevels};

/// Radio category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadioType {
    Basic,
    Advanced,
    Military,
    Custom,
}

impl fmt::Display for RadioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
            Self::Military => "military",
            Self::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Where a radio's base effects come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum RadioModel {
    /// Fixed table, component levels ignored
    Fixed { effects: EffectTable },
    /// Table derived from component levels
    Composable,
}

/// Catalog entry for a radio item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioSpec {
    pub radio_type: RadioType,
    #[serde(flatten)]
    pub model: RadioModel,
}

impl RadioSpec {
    /// Radio with a fixed base table
    pub fn fixed(radio_type: RadioType, effects: EffectTable) -> Self {
        Self {
            radio_type,
            model: RadioModel::Fixed { effects },
        }
    }

    /// Radio whose base table follows component levels
    pub fn composable(radio_type: RadioType) -> Self {
        Self {
            radio_type,
            model: RadioModel::Composable,
        }
    }

    /// Base effect table for the given component levels
    pub fn base_effects(&self, levels: &ComponentLevels) -> EffectTable {
        match &self.model {
            RadioModel::Fixed { effects } => *effects,
            RadioModel::Composable => composable_effects(levels),
        }
    }
}

/// Radio base tables keyed by item id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RadioEffectCatalog {
    radios: BTreeMap<String, RadioSpec>,
}

impl RadioEffectCatalog {
    /// Create from explicit entries; later entries replace earlier ones
    pub fn new(radios: impl IntoIterator<Item = (String, RadioSpec)>) -> Self {
        Self {
            radios: radios.into_iter().collect(),
        }
    }

    /// The built-in radio models
    pub fn builtin() -> Self {
        use EffectName::*;

        let basic = EffectTable::new()
            .with(SignalRange, 1.0)
            .with(FrequencyPrecision, 1.0)
            .with(SignalClarity, 1.0)
            .with(BatteryConsumption, 1.0)
            .with(TuningSpeed, 1.0);
        let advanced = EffectTable::new()
            .with(SignalRange, 1.5)
            .with(FrequencyPrecision, 1.2)
            .with(SignalClarity, 1.3)
            .with(BatteryConsumption, 0.8)
            .with(TuningSpeed, 1.2)
            .with(SignalBoost, 1.2);
        let military = EffectTable::new()
            .with(SignalRange, 2.0)
            .with(FrequencyPrecision, 1.5)
            .with(SignalClarity, 1.5)
            .with(BatteryConsumption, 0.6)
            .with(TuningSpeed, 1.5)
            .with(SignalBoost, 1.5)
            .with(DecodeEncrypted, 1.0);

        Self::new([
            ("radio_basic".to_string(), RadioSpec::fixed(RadioType::Basic, basic)),
            ("radio_advanced".to_string(), RadioSpec::fixed(RadioType::Advanced, advanced)),
            ("radio_military".to_string(), RadioSpec::fixed(RadioType::Military, military)),
            ("radio_custom".to_string(), RadioSpec::composable(RadioType::Custom)),
        ])
    }

    /// Look up a radio
    pub fn get(&self, radio_id: &str) -> Option<&RadioSpec> {
        self.radios.get(radio_id)
    }

    /// Iterate over radios ordered by id
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RadioSpec)> {
        self.radios.iter().map(|(id, spec)| (id.as_str(), spec))
    }

    /// Number of radios
    pub fn len(&self) -> usize {
        self.radios.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.radios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_ignores_levels() {
        let catalog = RadioEffectCatalog::builtin();
        let military = catalog.get("radio_military").unwrap();
        let a = military.base_effects(&ComponentLevels::zeroed());
        let b = military.base_effects(&ComponentLevels::STARTER);
        assert_eq!(a, b);
        assert_eq!(a.get(EffectName::SignalRange), Some(2.0));
    }

    #[test]
    fn test_custom_is_composable() {
        let catalog = RadioEffectCatalog::builtin();
        let custom = catalog.get("radio_custom").unwrap();
        assert_eq!(custom.radio_type, RadioType::Custom);
        assert_eq!(custom.model, RadioModel::Composable);
        let table = custom.base_effects(&ComponentLevels::zeroed());
        assert_eq!(table.get(EffectName::SignalRange), Some(1.0));
        assert!(!table.contains(EffectName::DecodeEncrypted));
    }

    #[test]
    fn test_catalog_json() {
        let json = r#"{
            "radio_scanner": {
                "radio_type": "advanced",
                "model": "fixed",
                "effects": {"signal_range": 1.25}
            },
            "radio_kit": {"radio_type": "custom", "model": "composable"}
        }"#;
        let catalog: RadioEffectCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        let scanner = catalog.get("radio_scanner").unwrap();
        assert_eq!(
            scanner.base_effects(&ComponentLevels::STARTER).get(EffectName::SignalRange),
            Some(1.25)
        );
        assert_eq!(catalog.get("radio_kit").unwrap().model, RadioModel::Composable);
    }
}
