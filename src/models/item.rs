//! Catalogue item types: food products and equipment.

use serde::{Deserialize, Serialize};

use super::ItemId;

/// Common contract of everything that can be packed into a backpack.
///
/// A batch is `batch_count` units that must travel together in one backpack.
pub trait CatalogueEntry {
    /// Item identifier.
    fn id(&self) -> ItemId;

    /// Display name.
    fn name(&self) -> &str;

    /// Mass of a single unit in grams.
    fn unit_mass_g(&self) -> u32;

    /// Number of units that must move together.
    fn batch_count(&self) -> u32;

    /// Mass of the whole batch in grams.
    fn batch_weight_g(&self) -> u64 {
        u64::from(self.unit_mass_g()) * u64::from(self.batch_count())
    }
}

/// Equipment category tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    Medical,
    Progression,
    Water,
    Rest,
    Clothing,
    Other,
}

impl EquipmentCategory {
    /// All categories in declaration order.
    pub const ALL: [EquipmentCategory; 6] = [
        EquipmentCategory::Medical,
        EquipmentCategory::Progression,
        EquipmentCategory::Water,
        EquipmentCategory::Rest,
        EquipmentCategory::Clothing,
        EquipmentCategory::Other,
    ];

    /// Categories that must cover every participant on a hike of the given length.
    ///
    /// `Other` is never mandatory; `Rest` is skipped for single-day hikes.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_hike::models::EquipmentCategory;
    ///
    /// let day_trip = EquipmentCategory::mandatory(1);
    /// assert!(!day_trip.contains(&EquipmentCategory::Rest));
    /// assert!(EquipmentCategory::mandatory(2).contains(&EquipmentCategory::Rest));
    /// ```
    pub fn mandatory(duration_days: u8) -> Vec<EquipmentCategory> {
        Self::ALL
            .iter()
            .copied()
            .filter(|c| match c {
                EquipmentCategory::Other => false,
                EquipmentCategory::Rest => duration_days > 1,
                _ => true,
            })
            .collect()
    }

    /// Returns `true` for categories whose items are pinned to an owner.
    pub fn is_owner_pinned(&self) -> bool {
        matches!(self, EquipmentCategory::Clothing | EquipmentCategory::Rest)
    }
}

impl std::fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EquipmentCategory::Medical => "medical",
            EquipmentCategory::Progression => "progression",
            EquipmentCategory::Water => "water",
            EquipmentCategory::Rest => "rest",
            EquipmentCategory::Clothing => "clothing",
            EquipmentCategory::Other => "other",
        };
        f.write_str(s)
    }
}

/// A food product from the shared catalogue.
///
/// # Examples
///
/// ```
/// use u_hike::models::{CatalogueEntry, FoodProduct, ItemId};
///
/// let oats = FoodProduct::new(ItemId::new(1), "Oat bar", 50, 4, 200.0)
///     .with_common_name("oat bar");
/// assert_eq!(oats.batch_weight_g(), 200);
/// assert!((oats.caloric_density() - 4.0).abs() < 1e-10);
/// assert!((oats.total_kcal() - 800.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodProduct {
    id: ItemId,
    name: String,
    unit_mass_g: u32,
    batch_count: u32,
    kcal_per_unit: f64,
    packaging: String,
    price: f64,
    common_name: String,
}

impl FoodProduct {
    /// Creates a food product. The common name defaults to the display name.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        unit_mass_g: u32,
        batch_count: u32,
        kcal_per_unit: f64,
    ) -> Self {
        let name = name.into();
        Self {
            id,
            common_name: name.clone(),
            name,
            unit_mass_g,
            batch_count,
            kcal_per_unit,
            packaging: String::new(),
            price: 0.0,
        }
    }

    /// Sets the common name used for duplicate-type detection.
    pub fn with_common_name(mut self, common_name: impl Into<String>) -> Self {
        self.common_name = common_name.into();
        self
    }

    /// Sets the packaging descriptor.
    pub fn with_packaging(mut self, packaging: impl Into<String>) -> Self {
        self.packaging = packaging.into();
        self
    }

    /// Sets the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Calories per unit.
    pub fn kcal_per_unit(&self) -> f64 {
        self.kcal_per_unit
    }

    /// Calories of the whole batch.
    pub fn total_kcal(&self) -> f64 {
        self.kcal_per_unit * f64::from(self.batch_count)
    }

    /// Calories per gram; zero for massless entries.
    pub fn caloric_density(&self) -> f64 {
        if self.unit_mass_g == 0 {
            0.0
        } else {
            self.kcal_per_unit / f64::from(self.unit_mass_g)
        }
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn common_name(&self) -> &str {
        &self.common_name
    }

    /// Normalized common name: trimmed and lowercased.
    pub fn common_key(&self) -> String {
        self.common_name.trim().to_lowercase()
    }
}

impl CatalogueEntry for FoodProduct {
    fn id(&self) -> ItemId {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn unit_mass_g(&self) -> u32 {
        self.unit_mass_g
    }
    fn batch_count(&self) -> u32 {
        self.batch_count
    }
}

/// A piece of equipment from the shared catalogue.
///
/// For equipment, the batch count doubles as the number of participants the
/// entry covers (a 3-person tent has batch count 3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    id: ItemId,
    name: String,
    unit_mass_g: u32,
    batch_count: u32,
    category: EquipmentCategory,
    tare_mass_g: Option<u32>,
}

impl EquipmentItem {
    /// Creates an equipment item.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        category: EquipmentCategory,
        unit_mass_g: u32,
        batch_count: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_mass_g,
            batch_count,
            category,
            tare_mass_g: None,
        }
    }

    /// Sets the empty mass of a water container.
    pub fn with_tare_mass(mut self, tare_mass_g: u32) -> Self {
        self.tare_mass_g = Some(tare_mass_g);
        self
    }

    pub fn category(&self) -> EquipmentCategory {
        self.category
    }

    /// Empty mass of a water container, if recorded.
    pub fn tare_mass_g(&self) -> Option<u32> {
        self.tare_mass_g
    }

    /// Carryable water volume of the whole batch in liters.
    ///
    /// Zero for non-water items and for containers without a tare mass.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_hike::models::{EquipmentCategory, EquipmentItem, ItemId};
    ///
    /// let bottle = EquipmentItem::new(ItemId::new(7), "Bottle", EquipmentCategory::Water, 1100, 2)
    ///     .with_tare_mass(100);
    /// assert!((bottle.water_capacity_liters() - 2.0).abs() < 1e-10);
    /// ```
    pub fn water_capacity_liters(&self) -> f64 {
        if self.category != EquipmentCategory::Water {
            return 0.0;
        }
        match self.tare_mass_g {
            Some(tare) => {
                let net = f64::from(self.unit_mass_g.saturating_sub(tare));
                net / 1000.0 * f64::from(self.batch_count)
            }
            None => 0.0,
        }
    }
}

impl CatalogueEntry for EquipmentItem {
    fn id(&self) -> ItemId {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn unit_mass_g(&self) -> u32 {
        self.unit_mass_g
    }
    fn batch_count(&self) -> u32 {
        self.batch_count
    }
}

/// A packable item: either a food product or a piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    Food(FoodProduct),
    Equipment(EquipmentItem),
}

impl Item {
    /// Equipment category, or `None` for food.
    pub fn category(&self) -> Option<EquipmentCategory> {
        match self {
            Item::Food(_) => None,
            Item::Equipment(e) => Some(e.category()),
        }
    }

    fn entry(&self) -> &dyn CatalogueEntry {
        match self {
            Item::Food(f) => f,
            Item::Equipment(e) => e,
        }
    }
}

impl CatalogueEntry for Item {
    fn id(&self) -> ItemId {
        self.entry().id()
    }
    fn name(&self) -> &str {
        self.entry().name()
    }
    fn unit_mass_g(&self) -> u32 {
        self.entry().unit_mass_g()
    }
    fn batch_count(&self) -> u32 {
        self.entry().batch_count()
    }
}

impl From<FoodProduct> for Item {
    fn from(food: FoodProduct) -> Self {
        Item::Food(food)
    }
}

impl From<EquipmentItem> for Item {
    fn from(equipment: EquipmentItem) -> Self {
        Item::Equipment(equipment)
    }
}
