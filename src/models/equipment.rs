//! Grouped equipment of a single category.

use serde::{Deserialize, Serialize};

use super::{CatalogueEntry, EquipmentCategory, EquipmentItem, ItemId};

/// Equipment items of one category, kept ascending by unit mass.
///
/// Lighter alternatives come first so that downstream consumers that scan in
/// order prefer them. Items of equal mass keep their insertion order.
///
/// # Examples
///
/// ```
/// use u_hike::models::{CatalogueEntry, EquipmentCategory, EquipmentItem, GroupEquipment, ItemId};
///
/// let mut group = GroupEquipment::new(EquipmentCategory::Rest);
/// group.insert(EquipmentItem::new(ItemId::new(1), "Tent", EquipmentCategory::Rest, 2400, 2));
/// group.insert(EquipmentItem::new(ItemId::new(2), "Tarp", EquipmentCategory::Rest, 600, 1));
/// assert_eq!(group.items()[0].unit_mass_g(), 600);
/// assert_eq!(group.coverage(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEquipment {
    category: EquipmentCategory,
    items: Vec<EquipmentItem>,
}

impl GroupEquipment {
    /// Creates an empty group for the given category.
    pub fn new(category: EquipmentCategory) -> Self {
        Self {
            category,
            items: Vec::new(),
        }
    }

    pub fn category(&self) -> EquipmentCategory {
        self.category
    }

    /// Items in ascending unit-mass order.
    pub fn items(&self) -> &[EquipmentItem] {
        &self.items
    }

    /// Inserts an item after every item of lower or equal unit mass.
    pub fn insert(&mut self, item: EquipmentItem) {
        let mass = item.unit_mass_g();
        let pos = self.items.partition_point(|i| i.unit_mass_g() <= mass);
        self.items.insert(pos, item);
    }

    /// Removes the most recently inserted item with the given id.
    pub fn remove(&mut self, id: ItemId) -> Option<EquipmentItem> {
        let pos = self.items.iter().rposition(|i| i.id() == id)?;
        Some(self.items.remove(pos))
    }

    /// Sum of batch counts, i.e. how many participants the group covers.
    pub fn coverage(&self) -> u32 {
        self.items.iter().map(|i| i.batch_count()).sum()
    }

    /// Sum of batch weights in grams.
    pub fn total_mass_g(&self) -> u64 {
        self.items.iter().map(|i| i.batch_weight_g()).sum()
    }

    /// Carryable water volume in liters across all items.
    pub fn water_capacity_liters(&self) -> f64 {
        self.items.iter().map(|i| i.water_capacity_liters()).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
