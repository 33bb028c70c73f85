//! Hike planning pipeline.
//!
//! [`HikePlanner`] exposes the individual stages (validation, catalogue
//! selection, distribution) and runs them in order on a hike:
//!
//! ```text
//! validate ──▶ select equipment + food ──▶ distribute into backpacks
//! ```
//!
//! A failed stage aborts the pipeline; nothing later runs. [`HikeStore`] is
//! the persistence boundary for [`HikePlanner::optimize_stored`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::PlannerConfig;
use crate::error::PlanningError;
use crate::evaluation::HikeValidator;
use crate::models::{
    Backpack, EquipmentItem, FoodProduct, Hike, HikeId, Item, OwnershipLookup,
    OwnershipRegistry, ParticipantId,
};
use crate::packing::{BatchDistributor, DistributionStats};
use crate::selection::{select_equipment, select_food};

/// Summary of one packed backpack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackpackLoad {
    pub owner: ParticipantId,
    pub capacity_g: u64,
    pub total_mass_g: u64,
    pub item_count: usize,
}

impl BackpackLoad {
    fn of(backpack: &Backpack) -> Self {
        Self {
            owner: backpack.owner(),
            capacity_g: backpack.capacity_g(),
            total_mass_g: backpack.total_mass_g(),
            item_count: backpack.item_count(),
        }
    }
}

/// Outcome of a successful [`HikePlanner::optimize`] run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingPlan {
    pub hike: HikeId,
    pub loads: Vec<BackpackLoad>,
    pub stats: DistributionStats,
}

impl PackingPlan {
    /// Mass packed across all backpacks.
    pub fn total_mass_g(&self) -> u64 {
        self.loads.iter().map(|l| l.total_mass_g).sum()
    }
}

/// Loads and saves hike graphs.
pub trait HikeStore {
    /// Reads the full object graph of a hike.
    fn load(&self, id: HikeId) -> Result<Hike, PlanningError>;

    /// Writes back a hike, including its backpack contents.
    fn save(&mut self, hike: &Hike) -> Result<(), PlanningError>;
}

/// [`HikeStore`] backed by a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHikeStore {
    hikes: HashMap<HikeId, Hike>,
}

impl InMemoryHikeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `hike`, returning the previous version.
    pub fn insert(&mut self, hike: Hike) -> Option<Hike> {
        self.hikes.insert(hike.id(), hike)
    }

    pub fn get(&self, id: HikeId) -> Option<&Hike> {
        self.hikes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.hikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hikes.is_empty()
    }
}

impl HikeStore for InMemoryHikeStore {
    fn load(&self, id: HikeId) -> Result<Hike, PlanningError> {
        self.hikes
            .get(&id)
            .cloned()
            .ok_or(PlanningError::HikeNotFound { id: id.get() })
    }

    fn save(&mut self, hike: &Hike) -> Result<(), PlanningError> {
        self.hikes.insert(hike.id(), hike.clone());
        Ok(())
    }
}

/// Runs validation, selection, and distribution for hikes.
///
/// # Examples
///
/// ```
/// use u_hike::config::PlannerConfig;
/// use u_hike::models::{Backpack, FoodProduct, Item, ItemId, OwnershipRegistry, ParticipantId};
/// use u_hike::planner::HikePlanner;
///
/// let planner = HikePlanner::new(PlannerConfig::default(), OwnershipRegistry::new());
/// let mut a = Backpack::new(ParticipantId::new(1), 5_000);
/// let mut b = Backpack::new(ParticipantId::new(2), 5_000);
/// let items: Vec<Item> = vec![FoodProduct::new(ItemId::new(1), "Stew", 6_000, 1, 3000.0).into()];
///
/// let err = planner
///     .distribute_batches_to_backpacks(&items, &mut [&mut a, &mut b], None)
///     .unwrap_err();
/// assert!(err.to_string().contains("no single backpack"));
/// ```
#[derive(Debug, Clone)]
pub struct HikePlanner<O: OwnershipLookup = OwnershipRegistry> {
    config: PlannerConfig,
    ownership: O,
}

impl<O: OwnershipLookup> HikePlanner<O> {
    pub fn new(config: PlannerConfig, ownership: O) -> Self {
        Self { config, ownership }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn ownership(&self) -> &O {
        &self.ownership
    }

    pub fn ownership_mut(&mut self) -> &mut O {
        &mut self.ownership
    }

    /// Checks the hike against the profile model and its catalogue stock.
    pub fn validate_hike_for_optimize(&self, hike: &Hike) -> Result<(), PlanningError> {
        HikeValidator::new(&self.config, &self.ownership).validate(hike)
    }

    /// Smallest equipment set covering every mandatory category.
    pub fn optimize_equipment(&self, hike: &Hike) -> Vec<EquipmentItem> {
        select_equipment(hike)
    }

    /// Lightest food set reaching the group's daily calories.
    pub fn optimize_food(&self, hike: &Hike) -> Vec<FoodProduct> {
        select_food(hike)
    }

    /// Distributes `items` into `backpacks`.
    ///
    /// With a hike id, clothing and rest items are pinned to their owner's
    /// backpack.
    pub fn distribute_batches_to_backpacks(
        &self,
        items: &[Item],
        backpacks: &mut [&mut Backpack],
        hike: Option<HikeId>,
    ) -> Result<DistributionStats, PlanningError> {
        match hike {
            Some(id) => BatchDistributor::with_ownership(&self.ownership, id).distribute(items, backpacks),
            None => BatchDistributor::new().distribute(items, backpacks),
        }
    }

    /// Validates the hike, selects its working set, and packs it into the
    /// participants' backpacks.
    ///
    /// Backpacks are left untouched if validation fails.
    #[instrument(skip_all, fields(hike = %hike.id()))]
    pub fn optimize(&self, hike: &mut Hike) -> Result<PackingPlan, PlanningError> {
        self.validate_hike_for_optimize(hike)?;

        let items: Vec<Item> = self
            .optimize_equipment(hike)
            .into_iter()
            .map(Item::from)
            .chain(self.optimize_food(hike).into_iter().map(Item::from))
            .collect();

        let id = hike.id();
        let stats = {
            let mut backpacks = hike.backpacks_mut();
            self.distribute_batches_to_backpacks(&items, &mut backpacks, Some(id))?
        };

        let plan = PackingPlan {
            hike: id,
            loads: hike.backpacks().map(BackpackLoad::of).collect(),
            stats,
        };
        info!(
            items = items.len(),
            total_mass_g = plan.total_mass_g(),
            nodes = stats.nodes,
            "hike packed"
        );
        Ok(plan)
    }

    /// Loads a hike, optimizes it, and saves it back on success.
    pub fn optimize_stored<S: HikeStore + ?Sized>(
        &self,
        store: &mut S,
        id: HikeId,
    ) -> Result<PackingPlan, PlanningError> {
        let mut hike = store.load(id)?;
        let plan = self.optimize(&mut hike)?;
        store.save(&hike)?;
        Ok(plan)
    }
}
