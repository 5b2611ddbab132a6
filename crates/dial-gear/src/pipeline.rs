//! Radio effects pipeline
//!
//! Turns equipped items and component levels into the
//! [`EffectiveParameters`] consumed by the signal resolver. The pipeline is
//! a pure function of its inputs and is rerun after every equip, unequip,
//! upgrade or restore.

use dial_signal::{bounded_factor, EffectiveParameters};
use tracing::debug;

use crate::aggregate::EffectAggregator;
use crate::effect::{EffectName, EffectTable};
use crate::item::ItemCatalog;
use crate::radio::{RadioEffectCatalog, RadioType};
use crate::slot::{EquippedState, Slot};
use crate::upgrade::ComponentLevels;

/// Computes effective parameters from equipment state
#[derive(Debug, Clone, Default)]
pub struct RadioEffectsPipeline {
    radios: RadioEffectCatalog,
    aggregator: EffectAggregator,
}

impl RadioEffectsPipeline {
    /// Create a pipeline over the given radio tables
    pub fn new(radios: RadioEffectCatalog) -> Self {
        Self {
            radios,
            aggregator: EffectAggregator,
        }
    }

    /// Pipeline over the built-in radio tables
    pub fn builtin() -> Self {
        Self::new(RadioEffectCatalog::builtin())
    }

    /// Radio tables in use
    pub fn radios(&self) -> &RadioEffectCatalog {
        &self.radios
    }

    /// Type of the radio in the Radio slot, if it is a known radio
    pub fn radio_type(&self, equipped: &EquippedState) -> Option<RadioType> {
        equipped
            .get(Slot::Radio)
            .and_then(|id| self.radios.get(id))
            .map(|spec| spec.radio_type)
    }

    /// Base table of the equipped radio
    ///
    /// `None` when the Radio slot is empty. A radio id without a radio table
    /// yields an empty base.
    pub fn base_effects(
        &self,
        equipped: &EquippedState,
        levels: &ComponentLevels,
    ) -> Option<EffectTable> {
        let radio_id = equipped.get(Slot::Radio)?;
        Some(match self.radios.get(radio_id) {
            Some(spec) => spec.base_effects(levels),
            None => {
                debug!("Radio {} has no effect table, using empty base", radio_id);
                EffectTable::new()
            }
        })
    }

    /// Radio base multiplied with every non-radio item
    ///
    /// `None` when no radio is equipped, in which case the other slots are
    /// ignored.
    pub fn combined_effects(
        &self,
        equipped: &EquippedState,
        levels: &ComponentLevels,
        items: &ItemCatalog,
    ) -> Option<EffectTable> {
        let base = self.base_effects(equipped, levels)?;
        let accessories = self
            .aggregator
            .aggregate_slots(equipped, &Slot::NON_RADIO, items);
        Some(self.aggregator.combine(&base, &accessories))
    }

    /// Effective parameters for the given state
    pub fn recompute(
        &self,
        equipped: &EquippedState,
        levels: &ComponentLevels,
        items: &ItemCatalog,
    ) -> EffectiveParameters {
        let params = match self.combined_effects(equipped, levels, items) {
            Some(table) => parameters_from(&table),
            None => EffectiveParameters::NEUTRAL,
        };
        debug!("Effects recomputed: {}", params.summary());
        params
    }
}

/// Map a combined effect table to effective parameters
///
/// Magnitudes are bounded to positive finite factors, so a product that
/// overflowed or underflowed while combining never reaches the resolver as
/// infinity or zero.
pub fn parameters_from(table: &EffectTable) -> EffectiveParameters {
    let magnitude = |name| bounded_factor(table.magnitude(name));
    EffectiveParameters {
        signal_range: magnitude(EffectName::SignalRange),
        frequency_precision: magnitude(EffectName::FrequencyPrecision),
        signal_clarity: magnitude(EffectName::SignalClarity),
        signal_boost: magnitude(EffectName::SignalBoost),
        battery_consumption: magnitude(EffectName::BatteryConsumption),
        decode_encrypted: table.capability(EffectName::DecodeEncrypted),
        detect_hidden_signals: table.capability(EffectName::DetectHiddenSignals),
    }
}
