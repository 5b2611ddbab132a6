//! Receiver simulation root
//!
//! The [`Receiver`] owns the band, the catalogs, the equipped state, the
//! component levels and the dial position. Every mutation reruns the effects
//! pipeline when it can change the effective parameters and queues
//! [`ReceiverEvent`]s for the caller to drain.

use std::collections::BTreeSet;

use dial_gear::{
    ComponentKind, ComponentLevels, ComponentUpgradeTracker, EquipOutcome, EquippedState,
    GearError, ItemCatalog, RadioEffectsPipeline, RadioType, Slot, CUSTOM_RADIO,
    CUSTOM_RADIO_PARTS,
};
use dial_signal::{
    EffectiveParameters, FrequencyBand, Reception, SignalCatalog, SignalError, SignalResolver,
};
use tracing::{debug, info, warn};

use crate::events::ReceiverEvent;
use crate::save::SaveState;

/// Default dial step in MHz
pub const DEFAULT_TUNING_STEP: f64 = 0.1;

/// A simulated analog receiver and the equipment attached to it
#[derive(Debug)]
pub struct Receiver {
    resolver: SignalResolver,
    signals: SignalCatalog,
    items: ItemCatalog,
    pipeline: RadioEffectsPipeline,
    equipped: EquippedState,
    tracker: ComponentUpgradeTracker,
    inventory: BTreeSet<String>,
    params: EffectiveParameters,
    frequency: f64,
    tuning_step: f64,
    powered: bool,
    current_signal: Option<String>,
    discovered: BTreeSet<String>,
    event_buffer: Vec<ReceiverEvent>,
}

impl Receiver {
    /// Create a powered receiver tuned to the middle of the band
    ///
    /// Starts with nothing equipped, an empty inventory and starter
    /// component levels.
    pub fn new(
        resolver: SignalResolver,
        signals: SignalCatalog,
        items: ItemCatalog,
        pipeline: RadioEffectsPipeline,
        tuning_step: f64,
    ) -> Result<Self, SignalError> {
        if !(tuning_step.is_finite() && tuning_step > 0.0) {
            return Err(SignalError::InvalidStep(tuning_step));
        }
        Ok(Self::with_valid_step(
            resolver,
            signals,
            items,
            pipeline,
            tuning_step,
        ))
    }

    /// Receiver over the built-in band, signals, items and radios
    pub fn builtin() -> Self {
        const _: () = assert!(DEFAULT_TUNING_STEP > 0.0);
        Self::with_valid_step(
            SignalResolver::new(FrequencyBand::default()),
            SignalCatalog::builtin(),
            ItemCatalog::builtin(),
            RadioEffectsPipeline::builtin(),
            DEFAULT_TUNING_STEP,
        )
    }

    fn with_valid_step(
        resolver: SignalResolver,
        signals: SignalCatalog,
        items: ItemCatalog,
        pipeline: RadioEffectsPipeline,
        tuning_step: f64,
    ) -> Self {
        let band = *resolver.band();
        let equipped = EquippedState::new();
        let tracker = ComponentUpgradeTracker::default();
        let params = pipeline.recompute(&equipped, &tracker.levels(), &items);

        Self {
            resolver,
            signals,
            items,
            pipeline,
            equipped,
            tracker,
            inventory: BTreeSet::new(),
            params,
            frequency: band.clamp((band.min() + band.max()) / 2.0),
            tuning_step,
            powered: true,
            current_signal: None,
            discovered: BTreeSet::new(),
            event_buffer: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// The tunable band
    pub fn band(&self) -> &FrequencyBand {
        self.resolver.band()
    }

    /// Current dial position in MHz
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Effective parameters for the current equipment
    pub fn params(&self) -> EffectiveParameters {
        self.params
    }

    /// Signal catalog
    pub fn signals(&self) -> &SignalCatalog {
        &self.signals
    }

    /// Equipment catalog
    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    /// What is equipped where
    pub fn equipped(&self) -> &EquippedState {
        &self.equipped
    }

    /// Current component levels
    pub fn levels(&self) -> ComponentLevels {
        self.tracker.levels()
    }

    /// Items the player holds
    pub fn inventory(&self) -> &BTreeSet<String> {
        &self.inventory
    }

    /// Whether the radio is on
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Type of the equipped radio
    pub fn radio_type(&self) -> Option<RadioType> {
        self.pipeline.radio_type(&self.equipped)
    }

    /// Dial step after frequency precision is applied
    pub fn tuning_step(&self) -> f64 {
        self.tuning_step / self.params.frequency_precision
    }

    /// Signal currently in reach
    pub fn current_signal(&self) -> Option<&str> {
        self.current_signal.as_deref()
    }

    /// Signals received at least once
    pub fn discovered(&self) -> &BTreeSet<String> {
        &self.discovered
    }

    /// What the receiver hears at the current dial position
    pub fn reception(&self) -> Reception {
        if !self.powered {
            return Reception::silent(self.frequency);
        }
        self.resolver
            .resolve(self.frequency, &self.params, &self.signals)
    }

    // -------------------------------------------------------------------------
    // Tuning
    // -------------------------------------------------------------------------

    /// Move the dial, clamping to the band
    pub fn tune(&mut self, frequency: f64) -> Reception {
        self.frequency = self.band().clamp(frequency);
        self.refresh_reception()
    }

    /// Move the dial by whole tuning steps, snapping to the step grid
    pub fn nudge(&mut self, steps: i32) -> Reception {
        let step = self.tuning_step();
        let target = self.frequency + step * f64::from(steps);
        let snapped = self.band().snap(target, step);
        self.tune(snapped)
    }

    /// Switch the radio on or off
    ///
    /// While off the dial still moves but nothing is received.
    pub fn set_powered(&mut self, powered: bool) {
        if self.powered == powered {
            return;
        }
        self.powered = powered;
        info!("Radio powered {}", if powered { "on" } else { "off" });
        self.event_buffer.push(ReceiverEvent::PowerChanged(powered));
        self.refresh_reception();
    }

    // -------------------------------------------------------------------------
    // Equipment
    // -------------------------------------------------------------------------

    /// Equip an owned item into a slot
    pub fn equip(&mut self, item_id: &str, slot: Slot) -> Result<EquipOutcome, GearError> {
        let outcome = self
            .equipped
            .equip(item_id, slot, &self.items, &self.inventory)?;
        if !outcome.changed {
            return Ok(outcome);
        }

        if let Some(old) = &outcome.displaced {
            self.event_buffer.push(ReceiverEvent::ItemUnequipped {
                slot,
                item: old.clone(),
            });
        }
        self.event_buffer.push(ReceiverEvent::ItemEquipped {
            slot,
            item: outcome.item.clone(),
        });
        self.equipment_changed(slot);
        Ok(outcome)
    }

    /// Clear a slot, returning the item that was in it
    pub fn unequip(&mut self, slot: Slot) -> Result<String, GearError> {
        let item = self.equipped.unequip(slot).inspect_err(|e| {
            warn!("Rejected unequip: {}", e);
        })?;
        self.event_buffer.push(ReceiverEvent::ItemUnequipped {
            slot,
            item: item.clone(),
        });
        self.equipment_changed(slot);
        Ok(item)
    }

    /// Raise a radio component by one level
    pub fn upgrade(&mut self, component: ComponentKind) -> Result<u8, GearError> {
        let level = self.tracker.upgrade(component).inspect_err(|e| {
            warn!("Rejected upgrade: {}", e);
        })?;
        self.event_buffer
            .push(ReceiverEvent::ComponentUpgraded { component, level });
        self.refresh_params();
        Ok(level)
    }

    /// Add an item to the inventory
    ///
    /// Returns false if it was already held.
    pub fn add_item(&mut self, item_id: impl Into<String>) -> bool {
        let item_id = item_id.into();
        let added = self.inventory.insert(item_id.clone());
        if added {
            debug!("Added {} to inventory", item_id);
        }
        added
    }

    /// Remove an item from the inventory, unequipping it first
    ///
    /// Returns false if it was not held.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        if !self.inventory.remove(item_id) {
            return false;
        }
        info!("Removed {} from inventory", item_id);

        if let Some(slot) = self.equipped.unequip_item(item_id) {
            self.event_buffer.push(ReceiverEvent::ItemUnequipped {
                slot,
                item: item_id.to_string(),
            });
            self.equipment_changed(slot);
        }
        true
    }

    /// Whether every custom radio part is in the inventory
    pub fn can_assemble_custom_radio(&self) -> bool {
        CUSTOM_RADIO_PARTS
            .into_iter()
            .all(|part| self.inventory.contains(part))
    }

    /// Build the custom radio from its parts
    ///
    /// Consumes both parts and adds the custom radio to the inventory. When a
    /// part is missing nothing changes.
    pub fn assemble_custom_radio(&mut self) -> Result<(), GearError> {
        if let Some(missing) = CUSTOM_RADIO_PARTS
            .into_iter()
            .find(|part| !self.inventory.contains(*part))
        {
            let err = GearError::MissingPart(missing.to_string());
            warn!("Rejected custom radio assembly: {}", err);
            return Err(err);
        }

        for part in CUSTOM_RADIO_PARTS {
            self.remove_item(part);
        }
        self.add_item(CUSTOM_RADIO);
        info!("Assembled {}", CUSTOM_RADIO);
        self.event_buffer.push(ReceiverEvent::CustomRadioAssembled {
            item: CUSTOM_RADIO.to_string(),
        });
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Snapshot of the persistent state
    pub fn save_state(&self) -> SaveState {
        SaveState {
            equipped: self.equipped.clone(),
            levels: self.tracker.levels(),
        }
    }

    /// Restore persisted state
    ///
    /// Every saved slot is re-validated against the catalog and the current
    /// inventory. On error the receiver is left unchanged.
    pub fn restore_state(&mut self, state: &SaveState) -> Result<(), GearError> {
        let mut equipped = EquippedState::new();
        for (slot, item) in state.equipped.iter() {
            equipped.equip(item, slot, &self.items, &self.inventory)?;
        }

        let radio_changed = equipped.get(Slot::Radio) != self.equipped.get(Slot::Radio);
        self.equipped = equipped;
        self.tracker.set_levels(state.levels);
        info!(
            "Restored {} equipped items and component levels",
            self.equipped.len()
        );

        if radio_changed {
            self.push_radio_changed();
        }
        self.refresh_params();
        Ok(())
    }

    /// Drain pending events
    pub fn drain_events(&mut self) -> Vec<ReceiverEvent> {
        std::mem::take(&mut self.event_buffer)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn equipment_changed(&mut self, slot: Slot) {
        if slot == Slot::Radio {
            self.push_radio_changed();
        }
        self.refresh_params();
    }

    fn push_radio_changed(&mut self) {
        let radio = self.equipped.get(Slot::Radio).map(str::to_string);
        let radio_type = self.radio_type();
        info!(
            "Radio changed to {}",
            radio.as_deref().unwrap_or("nothing")
        );
        self.event_buffer
            .push(ReceiverEvent::RadioChanged { radio, radio_type });
    }

    fn refresh_params(&mut self) {
        let params = self
            .pipeline
            .recompute(&self.equipped, &self.tracker.levels(), &self.items);
        if params == self.params {
            return;
        }
        self.params = params;
        info!("Effects updated: {}", params.summary());
        self.event_buffer.push(ReceiverEvent::EffectsUpdated(params));
        self.refresh_reception();
    }

    /// Resolve the current position and track signal acquisition
    fn refresh_reception(&mut self) -> Reception {
        let reception = self.reception();
        if reception.matched_id == self.current_signal {
            return reception;
        }

        if let Some(lost) = self.current_signal.take() {
            debug!("Lost signal {}", lost);
            self.event_buffer.push(ReceiverEvent::SignalLost { id: lost });
        }

        if let Some(id) = &reception.matched_id {
            info!(
                "Acquired signal {} at {}",
                id,
                FrequencyBand::frequency_display(reception.frequency)
            );
            self.event_buffer.push(ReceiverEvent::SignalAcquired {
                id: id.clone(),
                frequency: reception.frequency,
                strength: reception.strength,
            });
            if self.discovered.insert(id.clone()) {
                self.event_buffer
                    .push(ReceiverEvent::SignalDiscovered { id: id.clone() });
            }
            self.current_signal = Some(id.clone());
        }

        reception
    }
}

impl Default for Receiver {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn receiver_with(items: &[&str]) -> Receiver {
        let mut rx = Receiver::builtin();
        for item in items {
            rx.add_item(*item);
        }
        rx
    }

    #[test]
    fn test_starts_mid_band_and_neutral() {
        let rx = Receiver::builtin();
        assert_eq!(rx.frequency(), 98.0);
        assert_eq!(rx.params(), EffectiveParameters::NEUTRAL);
        assert!(rx.is_powered());
        assert_eq!(rx.levels(), ComponentLevels::STARTER);
    }

    #[test]
    fn test_new_rejects_bad_step() {
        let band = FrequencyBand::default();
        let result = Receiver::new(
            SignalResolver::new(band),
            SignalCatalog::builtin(),
            ItemCatalog::builtin(),
            RadioEffectsPipeline::builtin(),
            0.0,
        );
        assert!(matches!(result, Err(SignalError::InvalidStep(_))));
    }

    #[test]
    fn test_tune_acquires_and_discovers() {
        let mut rx = Receiver::builtin();
        let reception = rx.tune(91.5);
        assert_eq!(reception.matched_id.as_deref(), Some("emergency_broadcast"));
        assert_eq!(reception.strength, 1.0);

        let events = rx.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], ReceiverEvent::SignalAcquired { id, .. } if id == "emergency_broadcast"));
        assert!(matches!(&events[1], ReceiverEvent::SignalDiscovered { id } if id == "emergency_broadcast"));

        rx.tune(98.0);
        assert_eq!(
            rx.drain_events(),
            vec![ReceiverEvent::SignalLost {
                id: "emergency_broadcast".into()
            }]
        );

        // Second acquisition is not a discovery
        rx.tune(91.5);
        let events = rx.drain_events();
        assert_eq!(events.len(), 1);
        assert!(rx.discovered().contains("emergency_broadcast"));
    }

    #[test]
    fn test_tune_clamps() {
        let mut rx = Receiver::builtin();
        let reception = rx.tune(150.0);
        assert_eq!(reception.frequency, 108.0);
        assert_eq!(rx.frequency(), 108.0);
    }

    #[test]
    fn test_power_off_is_silent() {
        let mut rx = Receiver::builtin();
        rx.tune(91.5);
        rx.drain_events();

        rx.set_powered(false);
        let reception = rx.reception();
        assert!(!reception.is_matched());
        assert_eq!(reception.static_intensity, 0.0);
        assert_eq!(
            rx.drain_events(),
            vec![
                ReceiverEvent::PowerChanged(false),
                ReceiverEvent::SignalLost {
                    id: "emergency_broadcast".into()
                },
            ]
        );

        // Dial still moves while off
        rx.tune(95.7);
        assert_eq!(rx.frequency(), 95.7);
        assert!(rx.drain_events().is_empty());

        rx.set_powered(true);
        assert_eq!(rx.current_signal(), Some("military_comms"));
    }

    #[test]
    fn test_equip_requires_ownership() {
        let mut rx = Receiver::builtin();
        assert_eq!(
            rx.equip("radio_military", Slot::Radio),
            Err(GearError::ItemNotOwned("radio_military".into()))
        );
        assert!(rx.drain_events().is_empty());
    }

    #[test]
    fn test_equip_radio_updates_params() {
        let mut rx = receiver_with(&["radio_military"]);
        rx.equip("radio_military", Slot::Radio).unwrap();

        assert!(rx.params().decode_encrypted);
        assert_eq!(rx.radio_type(), Some(RadioType::Military));

        let events = rx.drain_events();
        assert_eq!(
            events[0],
            ReceiverEvent::ItemEquipped {
                slot: Slot::Radio,
                item: "radio_military".into()
            }
        );
        assert_eq!(
            events[1],
            ReceiverEvent::RadioChanged {
                radio: Some("radio_military".into()),
                radio_type: Some(RadioType::Military),
            }
        );
        assert!(matches!(events[2], ReceiverEvent::EffectsUpdated(p) if p.signal_range == 2.0));
    }

    #[test]
    fn test_equip_same_slot_twice_is_noop() {
        let mut rx = receiver_with(&["compass"]);
        rx.equip("compass", Slot::Accessory1).unwrap();
        rx.drain_events();

        let outcome = rx.equip("compass", Slot::Accessory1).unwrap();
        assert!(!outcome.changed);
        assert!(rx.drain_events().is_empty());
    }

    #[test]
    fn test_equip_displaces_occupant() {
        let mut rx = receiver_with(&["radio_basic", "radio_advanced"]);
        rx.equip("radio_basic", Slot::Radio).unwrap();
        rx.drain_events();

        let outcome = rx.equip("radio_advanced", Slot::Radio).unwrap();
        assert_eq!(outcome.displaced.as_deref(), Some("radio_basic"));

        let events = rx.drain_events();
        assert_eq!(
            events[0],
            ReceiverEvent::ItemUnequipped {
                slot: Slot::Radio,
                item: "radio_basic".into()
            }
        );
        assert_eq!(
            events[1],
            ReceiverEvent::ItemEquipped {
                slot: Slot::Radio,
                item: "radio_advanced".into()
            }
        );
    }

    #[test]
    fn test_unequip_empty_slot() {
        let mut rx = Receiver::builtin();
        assert_eq!(rx.unequip(Slot::Head), Err(GearError::SlotEmpty(Slot::Head)));
    }

    #[test]
    fn test_remove_item_unequips() {
        let mut rx = receiver_with(&["radio_advanced"]);
        rx.equip("radio_advanced", Slot::Radio).unwrap();
        rx.drain_events();

        assert!(rx.remove_item("radio_advanced"));
        assert!(rx.equipped().is_empty());
        assert_eq!(rx.params(), EffectiveParameters::NEUTRAL);

        let events = rx.drain_events();
        assert_eq!(
            events[0],
            ReceiverEvent::ItemUnequipped {
                slot: Slot::Radio,
                item: "radio_advanced".into()
            }
        );
        assert_eq!(
            events[1],
            ReceiverEvent::RadioChanged {
                radio: None,
                radio_type: None
            }
        );

        assert!(!rx.remove_item("radio_advanced"));
    }

    #[test]
    fn test_upgrade_custom_radio() {
        let mut rx = receiver_with(&["radio_custom"]);
        rx.equip("radio_custom", Slot::Radio).unwrap();
        assert!((rx.params().signal_range - 1.2).abs() < EPS);

        assert_eq!(rx.upgrade(ComponentKind::Antenna), Ok(2));
        assert!((rx.params().signal_range - 1.4).abs() < EPS);
    }

    #[test]
    fn test_upgrade_with_fixed_radio_keeps_params() {
        let mut rx = receiver_with(&["radio_basic"]);
        rx.equip("radio_basic", Slot::Radio).unwrap();
        rx.drain_events();

        rx.upgrade(ComponentKind::Antenna).unwrap();
        assert_eq!(
            rx.drain_events(),
            vec![ReceiverEvent::ComponentUpgraded {
                component: ComponentKind::Antenna,
                level: 2
            }]
        );
    }

    #[test]
    fn test_precision_shrinks_step() {
        let mut rx = receiver_with(&["radio_military"]);
        assert!((rx.tuning_step() - 0.1).abs() < EPS);
        rx.equip("radio_military", Slot::Radio).unwrap();
        assert!((rx.tuning_step() - 0.1 / 1.5).abs() < EPS);
    }

    #[test]
    fn test_nudge_moves_by_steps() {
        let mut rx = Receiver::builtin();
        rx.tune(91.0);
        let reception = rx.nudge(5);
        assert!((reception.frequency - 91.5).abs() < EPS);
        assert_eq!(reception.matched_id.as_deref(), Some("emergency_broadcast"));

        rx.nudge(-3);
        assert!((rx.frequency() - 91.2).abs() < EPS);
    }

    #[test]
    fn test_save_and_restore() {
        let mut rx = receiver_with(&["radio_custom", "compass"]);
        rx.equip("radio_custom", Slot::Radio).unwrap();
        rx.equip("compass", Slot::Accessory2).unwrap();
        rx.upgrade(ComponentKind::Decoder).unwrap();
        rx.upgrade(ComponentKind::Decoder).unwrap();
        let saved = rx.save_state();
        let params = rx.params();

        let mut other = receiver_with(&["radio_custom", "compass"]);
        other.restore_state(&saved).unwrap();
        assert_eq!(other.params(), params);
        assert_eq!(other.equipped(), rx.equipped());
        assert_eq!(other.levels().get(ComponentKind::Decoder), 2);
    }

    #[test]
    fn test_restore_rejects_unowned() {
        let mut rx = receiver_with(&["radio_custom"]);
        rx.equip("radio_custom", Slot::Radio).unwrap();
        let saved = rx.save_state();

        let mut other = Receiver::builtin();
        let result = other.restore_state(&saved);
        assert_eq!(result, Err(GearError::ItemNotOwned("radio_custom".into())));
        assert!(other.equipped().is_empty());
    }

    #[test]
    fn test_builtin_matches_new() {
        let built = Receiver::new(
            SignalResolver::new(FrequencyBand::default()),
            SignalCatalog::builtin(),
            ItemCatalog::builtin(),
            RadioEffectsPipeline::builtin(),
            DEFAULT_TUNING_STEP,
        )
        .unwrap();
        let builtin = Receiver::builtin();

        assert_eq!(builtin.frequency(), built.frequency());
        assert_eq!(builtin.params(), built.params());
        assert_eq!(builtin.tuning_step(), built.tuning_step());
        assert_eq!(builtin.levels(), built.levels());
        assert_eq!(builtin.signals(), built.signals());
        assert_eq!(builtin.items(), built.items());
    }

    #[test]
    fn test_assemble_custom_radio() {
        let mut rx = receiver_with(&["radio_broken", "radio_part", "compass"]);
        assert!(rx.can_assemble_custom_radio());

        rx.assemble_custom_radio().unwrap();
        assert!(!rx.can_assemble_custom_radio());
        assert!(!rx.inventory().contains("radio_broken"));
        assert!(!rx.inventory().contains("radio_part"));
        assert!(rx.inventory().contains("radio_custom"));
        assert!(rx.inventory().contains("compass"));
        assert_eq!(
            rx.drain_events(),
            vec![ReceiverEvent::CustomRadioAssembled {
                item: "radio_custom".into()
            }]
        );

        rx.equip("radio_custom", Slot::Radio).unwrap();
        assert_eq!(rx.radio_type(), Some(RadioType::Custom));
        assert!((rx.params().signal_range - 1.2).abs() < EPS);
    }

    #[test]
    fn test_assemble_without_parts_changes_nothing() {
        let mut rx = receiver_with(&["radio_broken"]);
        assert!(!rx.can_assemble_custom_radio());
        assert_eq!(
            rx.assemble_custom_radio(),
            Err(GearError::MissingPart("radio_part".into()))
        );
        assert_eq!(rx.inventory().len(), 1);
        assert!(rx.inventory().contains("radio_broken"));
        assert!(rx.drain_events().is_empty());

        let mut empty = Receiver::builtin();
        assert_eq!(
            empty.assemble_custom_radio(),
            Err(GearError::MissingPart("radio_broken".into()))
        );
        assert!(empty.inventory().is_empty());
    }
}
