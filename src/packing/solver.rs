//! Backtracking batch distribution.
//!
//! # Algorithm
//!
//! 1. Reject before touching any backpack if the batches outweigh the summed
//!    capacity, or if one batch outweighs the largest backpack.
//! 2. Clear every backpack.
//! 3. Sort batches heaviest first (stable).
//! 4. For each batch in turn, try the backpacks in order of descending
//!    remaining space, with the owner's backpack moved to the front for
//!    pinned categories. Place, recurse, and undo on failure.
//!
//! Before each node, the subtree is cut if the usable remaining space is
//! strictly less than the weight of the batches still to place. Space only
//! counts in backpacks that can still take the lightest remaining batch. The
//! plain sum of remaining space would never cut anything here, since the
//! capacity pre-check already guarantees it covers every batch.
//!
//! The search guarantees a feasible assignment if one exists under this
//! order; it does not balance or minimize loads.

use tracing::{debug, instrument, trace};

use super::DistributionStats;
use crate::error::PlanningError;
use crate::models::{
    Backpack, CatalogueEntry, HikeId, Item, OwnershipLookup, OwnershipRegistry,
};

/// Assigns indivisible batches to backpacks.
///
/// Holds an optional ownership lookup used to pin clothing and rest items
/// to their owner's backpack.
///
/// # Examples
///
/// ```
/// use u_hike::models::{Backpack, FoodProduct, Item, ItemId, ParticipantId};
/// use u_hike::packing::BatchDistributor;
///
/// let mut a = Backpack::new(ParticipantId::new(1), 10_000);
/// let mut b = Backpack::new(ParticipantId::new(2), 10_000);
/// let items: Vec<Item> = [6_000, 5_000, 5_000, 4_000]
///     .iter()
///     .enumerate()
///     .map(|(i, &g)| FoodProduct::new(ItemId::new(i as u64), "ration", g, 1, 1.0).into())
///     .collect();
///
/// let stats = BatchDistributor::new()
///     .distribute(&items, &mut [&mut a, &mut b])
///     .unwrap();
/// assert_eq!(a.total_mass_g(), 10_000);
/// assert_eq!(b.total_mass_g(), 10_000);
/// assert!(stats.placements >= 4);
/// ```
#[derive(Debug)]
pub struct BatchDistributor<'a, O: OwnershipLookup + ?Sized = OwnershipRegistry> {
    ownership: Option<(&'a O, HikeId)>,
}

impl BatchDistributor<'_, OwnershipRegistry> {
    /// Creates a distributor without ownership pinning.
    pub fn new() -> Self {
        Self { ownership: None }
    }
}

impl Default for BatchDistributor<'_, OwnershipRegistry> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, O: OwnershipLookup + ?Sized> BatchDistributor<'a, O> {
    /// Creates a distributor that resolves owners of pinned items on `hike`.
    pub fn with_ownership(ownership: &'a O, hike: HikeId) -> Self {
        Self {
            ownership: Some((ownership, hike)),
        }
    }

    /// Distributes `items` into `backpacks`, replacing their contents.
    ///
    /// On success every item sits in exactly one backpack and no backpack
    /// exceeds its capacity. On failure the backpacks are either untouched
    /// (pre-check failures) or empty (search exhausted).
    ///
    /// # Errors
    ///
    /// - [`PlanningError::CapacityExceeded`] if the batches outweigh the summed capacity
    /// - [`PlanningError::BatchTooHeavy`] if one batch outweighs every backpack
    /// - [`PlanningError::NoFeasibleAssignment`] if the search finds no assignment
    #[instrument(skip_all, fields(items = items.len(), backpacks = backpacks.len()))]
    pub fn distribute(
        &self,
        items: &[Item],
        backpacks: &mut [&mut Backpack],
    ) -> Result<DistributionStats, PlanningError> {
        precheck(items, backpacks)?;

        for backpack in backpacks.iter_mut() {
            backpack.clear();
        }

        let mut batches: Vec<Batch> = items
            .iter()
            .map(|item| Batch {
                weight_g: item.batch_weight_g(),
                preferred: self.preferred_backpack(item, backpacks),
                item,
            })
            .collect();
        batches.sort_by(|a, b| b.weight_g.cmp(&a.weight_g));

        let mut suffix_g = vec![0u64; batches.len() + 1];
        for i in (0..batches.len()).rev() {
            suffix_g[i] = suffix_g[i + 1] + batches[i].weight_g;
        }

        let mut search = Search {
            batches: &batches,
            suffix_g: &suffix_g,
            stats: DistributionStats::default(),
        };

        if search.place(backpacks, 0) {
            debug!(stats = %search.stats, "distribution succeeded");
            Ok(search.stats)
        } else {
            debug!(stats = %search.stats, "distribution infeasible");
            for backpack in backpacks.iter_mut() {
                backpack.clear();
            }
            Err(PlanningError::NoFeasibleAssignment {
                items: items.len(),
                backpacks: backpacks.len(),
            })
        }
    }

    /// Index of the backpack owning `item`, for pinned categories only.
    fn preferred_backpack(&self, item: &Item, backpacks: &[&mut Backpack]) -> Option<usize> {
        let (ownership, hike) = self.ownership?;
        if !item.category()?.is_owner_pinned() {
            return None;
        }
        let owner = ownership.owner_of(hike, item.id())?;
        backpacks.iter().position(|b| b.owner() == owner)
    }
}

fn precheck(items: &[Item], backpacks: &[&mut Backpack]) -> Result<(), PlanningError> {
    let total_batch_g: u64 = items.iter().map(|i| i.batch_weight_g()).sum();
    let total_capacity_g: u64 = backpacks.iter().map(|b| b.capacity_g()).sum();
    if total_batch_g > total_capacity_g {
        debug!(total_batch_g, total_capacity_g, "batches exceed total capacity");
        return Err(PlanningError::CapacityExceeded {
            total_batch_g,
            total_capacity_g,
        });
    }

    let largest_capacity_g = backpacks.iter().map(|b| b.capacity_g()).max().unwrap_or(0);
    if let Some(heavy) = items.iter().find(|i| i.batch_weight_g() > largest_capacity_g) {
        debug!(item = heavy.name(), largest_capacity_g, "batch exceeds every backpack");
        return Err(PlanningError::BatchTooHeavy {
            item: heavy.name().to_string(),
            batch_g: heavy.batch_weight_g(),
            largest_capacity_g,
        });
    }
    Ok(())
}

struct Batch<'i> {
    item: &'i Item,
    weight_g: u64,
    preferred: Option<usize>,
}

struct Search<'s, 'i> {
    batches: &'s [Batch<'i>],
    /// Weight of `batches[i..]`.
    suffix_g: &'s [u64],
    stats: DistributionStats,
}

impl Search<'_, '_> {
    fn place(&mut self, backpacks: &mut [&mut Backpack], depth: usize) -> bool {
        self.stats.on_node();
        let batches = self.batches;
        let Some(batch) = batches.get(depth) else {
            return true;
        };

        // Batches are sorted heaviest first, so the last one is the lightest left.
        let needed_g = self.suffix_g[depth];
        let lightest_g = batches.last().map_or(0, |b| b.weight_g);
        let usable_g: u64 = backpacks
            .iter()
            .map(|b| b.remaining_g())
            .filter(|&r| r >= lightest_g)
            .sum();
        if usable_g < needed_g {
            self.stats.on_prune();
            trace!(depth, usable_g, lightest_g, needed_g, "pruned");
            return false;
        }

        for idx in candidate_order(backpacks, batch.preferred) {
            if !backpacks[idx].fits(batch.weight_g) {
                continue;
            }
            backpacks[idx].pack(batch.item.clone());
            self.stats.on_placement();
            trace!(depth, backpack = %backpacks[idx].owner(), item = batch.item.name(), "placed");

            if self.place(backpacks, depth + 1) {
                return true;
            }

            backpacks[idx].unpack(batch.item);
            self.stats.on_backtrack();
        }
        false
    }
}

/// Backpack indices by descending remaining space, `preferred` first.
fn candidate_order(backpacks: &[&mut Backpack], preferred: Option<usize>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..backpacks.len()).collect();
    order.sort_by(|&a, &b| backpacks[b].remaining_g().cmp(&backpacks[a].remaining_g()));
    if let Some(p) = preferred {
        if let Some(pos) = order.iter().position(|&i| i == p) {
            order.remove(pos);
            order.insert(0, p);
        }
    }
    order
}
