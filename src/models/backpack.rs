//! Backpack capacity model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    CatalogueEntry, EquipmentCategory, FoodProduct, GroupEquipment, Item, ItemId, ParticipantId,
};

/// A participant's personal backpack.
///
/// Capacity equals the owner's maximum carry in grams. The total mass is
/// recomputed from the contents on every call; nothing is cached across
/// mutations.
///
/// During a search the load may transiently exceed capacity; callers that
/// commit a state must check [`Backpack::is_overloaded`].
///
/// # Examples
///
/// ```
/// use u_hike::models::{Backpack, FoodProduct, ItemId, ParticipantId};
///
/// let mut bp = Backpack::new(ParticipantId::new(1), 10_000);
/// bp.pack(FoodProduct::new(ItemId::new(1), "Pasta", 500, 2, 1800.0).into());
/// assert_eq!(bp.total_mass_g(), 1000);
/// assert_eq!(bp.remaining_g(), 9000);
///
/// bp.clear();
/// assert_eq!(bp.remaining_g(), 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backpack {
    owner: ParticipantId,
    capacity_g: u64,
    foods: Vec<FoodProduct>,
    equipment: BTreeMap<EquipmentCategory, GroupEquipment>,
}

impl Backpack {
    /// Creates an empty backpack for the given owner.
    pub fn new(owner: ParticipantId, capacity_g: u64) -> Self {
        Self {
            owner,
            capacity_g,
            foods: Vec::new(),
            equipment: BTreeMap::new(),
        }
    }

    /// Participant owning this backpack.
    pub fn owner(&self) -> ParticipantId {
        self.owner
    }

    /// Maximum load in grams.
    pub fn capacity_g(&self) -> u64 {
        self.capacity_g
    }

    /// Food batches packed in this backpack.
    pub fn foods(&self) -> &[FoodProduct] {
        &self.foods
    }

    /// Packed equipment, grouped by category.
    pub fn equipment(&self) -> &BTreeMap<EquipmentCategory, GroupEquipment> {
        &self.equipment
    }

    /// Sum of all packed batch weights in grams.
    pub fn total_mass_g(&self) -> u64 {
        let food: u64 = self.foods.iter().map(|f| f.batch_weight_g()).sum();
        let gear: u64 = self.equipment.values().map(|g| g.total_mass_g()).sum();
        food + gear
    }

    /// Free space in grams (zero when overloaded).
    pub fn remaining_g(&self) -> u64 {
        self.capacity_g.saturating_sub(self.total_mass_g())
    }

    /// Returns `true` if a batch of the given weight fits in the free space.
    pub fn fits(&self, batch_g: u64) -> bool {
        self.remaining_g() >= batch_g
    }

    /// Returns `true` if the packed mass exceeds capacity.
    pub fn is_overloaded(&self) -> bool {
        self.total_mass_g() > self.capacity_g
    }

    /// Number of packed batches.
    pub fn item_count(&self) -> usize {
        self.foods.len() + self.equipment.values().map(|g| g.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Adds a batch without checking capacity.
    pub fn pack(&mut self, item: Item) {
        match item {
            Item::Food(food) => self.foods.push(food),
            Item::Equipment(gear) => self
                .equipment
                .entry(gear.category())
                .or_insert_with(|| GroupEquipment::new(gear.category()))
                .insert(gear),
        }
    }

    /// Removes the most recently packed batch matching `item`'s kind and id.
    ///
    /// Empty category groups are dropped so that an unpacked backpack
    /// compares equal to a fresh one.
    pub fn unpack(&mut self, item: &Item) -> Option<Item> {
        match item {
            Item::Food(food) => self.remove_food(food.id()).map(Item::Food),
            Item::Equipment(gear) => self
                .remove_equipment(gear.category(), gear.id())
                .map(Item::Equipment),
        }
    }

    fn remove_food(&mut self, id: ItemId) -> Option<FoodProduct> {
        let pos = self.foods.iter().rposition(|f| f.id() == id)?;
        Some(self.foods.remove(pos))
    }

    fn remove_equipment(
        &mut self,
        category: EquipmentCategory,
        id: ItemId,
    ) -> Option<super::EquipmentItem> {
        let group = self.equipment.get_mut(&category)?;
        let removed = group.remove(id);
        if group.is_empty() {
            self.equipment.remove(&category);
        }
        removed
    }

    /// Empties the backpack.
    pub fn clear(&mut self) {
        self.foods.clear();
        self.equipment.clear();
    }
}
