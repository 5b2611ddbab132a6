//! Radio component upgrade levels
//!
//! Component levels only feed the effect tables of composable radios. Fixed
//! radio models ignore them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::effect::{EffectName, EffectTable};
use crate::error::GearError;

/// Upgradeable radio component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    Antenna,
    Tuner,
    Amplifier,
    Battery,
    Decoder,
}

impl ComponentKind {
    /// All components in overlay order
    pub const ALL: [ComponentKind; 5] = [
        Self::Antenna,
        Self::Tuner,
        Self::Amplifier,
        Self::Battery,
        Self::Decoder,
    ];

    /// Highest level the component can reach
    pub fn max_level(&self) -> u8 {
        match self {
            Self::Antenna | Self::Tuner | Self::Amplifier => 5,
            Self::Battery | Self::Decoder => 3,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Antenna => "Antenna",
            Self::Tuner => "Tuner",
            Self::Amplifier => "Amplifier",
            Self::Battery => "Battery",
            Self::Decoder => "Decoder",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentKind {
    type Err = GearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GearError::UnknownName(s.to_string()))
    }
}

/// Current level of every component
///
/// Serialized as a map from component name to level. Deserialization rejects
/// levels above the component maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<ComponentKind, u8>",
    into = "BTreeMap<ComponentKind, u8>"
)]
pub struct ComponentLevels {
    levels: [u8; 5],
}

impl ComponentLevels {
    /// Starter kit: every component at level 1 except the decoder
    pub const STARTER: Self = Self {
        levels: [1, 1, 1, 1, 0],
    };

    /// Create from explicit levels, validating each against its maximum
    pub fn new(levels: impl IntoIterator<Item = (ComponentKind, u8)>) -> Result<Self, GearError> {
        let mut out = Self::zeroed();
        for (component, level) in levels {
            let max = component.max_level();
            if level > max {
                return Err(GearError::LevelOutOfRange {
                    component,
                    level,
                    max,
                });
            }
            out.levels[component.index()] = level;
        }
        Ok(out)
    }

    /// Every component at level 0
    pub fn zeroed() -> Self {
        Self { levels: [0; 5] }
    }

    /// Level of one component
    pub fn get(&self, component: ComponentKind) -> u8 {
        self.levels[component.index()]
    }

    /// Components and levels in overlay order
    pub fn iter(&self) -> impl Iterator<Item = (ComponentKind, u8)> + '_ {
        ComponentKind::ALL
            .into_iter()
            .map(|component| (component, self.get(component)))
    }
}

impl Default for ComponentLevels {
    fn default() -> Self {
        Self::STARTER
    }
}

impl TryFrom<BTreeMap<ComponentKind, u8>> for ComponentLevels {
    type Error = GearError;

    fn try_from(map: BTreeMap<ComponentKind, u8>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl From<ComponentLevels> for BTreeMap<ComponentKind, u8> {
    fn from(levels: ComponentLevels) -> Self {
        levels.iter().collect()
    }
}

/// Effect table contributed by one component at one level
pub fn component_effects(component: ComponentKind, level: u8) -> EffectTable {
    let l = f64::from(level);
    match component {
        ComponentKind::Antenna => EffectTable::new().with(EffectName::SignalRange, 1.0 + 0.2 * l),
        ComponentKind::Tuner => EffectTable::new()
            .with(EffectName::FrequencyPrecision, 1.0 + 0.1 * l)
            .with(EffectName::TuningSpeed, 1.0 + 0.1 * l),
        ComponentKind::Amplifier => EffectTable::new()
            .with(EffectName::SignalClarity, 1.0 + 0.1 * l)
            .with(EffectName::SignalBoost, 1.0 + 0.1 * l),
        ComponentKind::Battery => {
            EffectTable::new().with(EffectName::BatteryConsumption, 1.0 - 0.1 * l)
        }
        ComponentKind::Decoder if level > 0 => {
            EffectTable::new().with(EffectName::DecodeEncrypted, 0.5 * l)
        }
        ComponentKind::Decoder => EffectTable::new(),
    }
}

/// Base effect table of a composable radio built from `levels`
///
/// Component tables are overlaid in [`ComponentKind::ALL`] order. No two
/// components define the same effect, so the order never changes a value.
pub fn composable_effects(levels: &ComponentLevels) -> EffectTable {
    let mut table = EffectTable::new();
    for (component, level) in levels.iter() {
        table.overlay(&component_effects(component, level));
    }
    table
}

/// Tracks component levels and applies upgrades
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentUpgradeTracker {
    levels: ComponentLevels,
}

impl ComponentUpgradeTracker {
    /// Create a tracker starting at the given levels
    pub fn new(levels: ComponentLevels) -> Self {
        Self { levels }
    }

    /// Raise a component by one level
    ///
    /// Returns the new level. At the maximum the tracker is left unchanged.
    pub fn upgrade(&mut self, component: ComponentKind) -> Result<u8, GearError> {
        let current = self.levels.get(component);
        let max = component.max_level();
        if current >= max {
            debug!("Upgrade of {} rejected at max level {}", component, max);
            return Err(GearError::AtMaxLevel { component, max });
        }
        let level = current + 1;
        self.levels.levels[component.index()] = level;
        info!("Upgraded {} to level {}", component, level);
        Ok(level)
    }

    /// Current level of a component
    pub fn level_of(&self, component: ComponentKind) -> u8 {
        self.levels.get(component)
    }

    /// Snapshot of every level
    pub fn levels(&self) -> ComponentLevels {
        self.levels
    }

    /// Replace every level, e.g. when restoring a save
    pub fn set_levels(&mut self, levels: ComponentLevels) {
        self.levels = levels;
    }

    /// Effects contributed by `component` at `level`
    pub fn effects_for(component: ComponentKind, level: u8) -> EffectTable {
        component_effects(component, level)
    }

    /// Effects of the current levels as a composable radio base table
    pub fn effects(&self) -> EffectTable {
        composable_effects(&self.levels)
    }
}
