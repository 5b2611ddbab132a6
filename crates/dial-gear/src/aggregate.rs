//! Multiplicative effect aggregation across equipped items

use crate::effect::EffectTable;
use crate::item::{EquipmentItem, ItemCatalog};
use crate::slot::{EquippedState, Slot};

/// Combines item effect tables
///
/// Each effect is the product of the values defined by the contributing
/// items. Items that do not define an effect leave it untouched, so an effect
/// no item defines stays absent. Multiplication commutes, so the result does
/// not depend on slot order.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectAggregator;

impl EffectAggregator {
    /// Aggregate the effect tables of the given items
    pub fn aggregate<'a>(&self, items: impl IntoIterator<Item = &'a EquipmentItem>) -> EffectTable {
        self.aggregate_tables(items.into_iter().map(|item| &item.effects))
    }

    /// Aggregate raw effect tables
    pub fn aggregate_tables<'a>(
        &self,
        tables: impl IntoIterator<Item = &'a EffectTable>,
    ) -> EffectTable {
        let mut out = EffectTable::new();
        for table in tables {
            out.combine(table);
        }
        out
    }

    /// Multiply `other` into a copy of `base`
    pub fn combine(&self, base: &EffectTable, other: &EffectTable) -> EffectTable {
        let mut out = *base;
        out.combine(other);
        out
    }

    /// Aggregate what is equipped in `slots`
    ///
    /// Ids missing from the catalog contribute nothing.
    pub fn aggregate_slots(
        &self,
        equipped: &EquippedState,
        slots: &[Slot],
        catalog: &ItemCatalog,
    ) -> EffectTable {
        self.aggregate(
            slots
                .iter()
                .filter_map(|slot| equipped.get(*slot))
                .filter_map(|id| catalog.get(id)),
        )
    }
}
