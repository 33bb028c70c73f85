//! Equipment selection.
//!
//! # Algorithm
//!
//! For every mandatory category, enumerates subsets of the category's items
//! by depth-first search and keeps the subset with the fewest entries whose
//! summed batch counts cover every participant, breaking ties by lower total
//! mass. Water containers must additionally carry the group's daily water
//! need. Items are scanned in ascending unit-mass order, so among equally
//! good subsets the one built from lighter items is found first.
//!
//! # Complexity
//!
//! O(2^k) per category in the worst case, where k = items in the category.
//! Catalogues are small; a branch is cut once it can no longer beat the best
//! subset found so far or can no longer reach the required coverage.

use tracing::{debug, warn};

use crate::models::{CatalogueEntry, EquipmentCategory, EquipmentItem, Hike};

/// Selects the smallest set of equipment covering every mandatory category.
///
/// Categories that cannot be covered are skipped with a warning; a hike that
/// passed validation never has any.
///
/// # Examples
///
/// ```
/// use u_hike::distance::GeoPoint;
/// use u_hike::models::{Build, EquipmentCategory, EquipmentItem, FitnessLevel, Hike, HikeId, ItemId, Participant, ParticipantId, Waypoint};
/// use u_hike::selection::select_equipment;
///
/// let creator = Participant::new(ParticipantId::new(1), "Ana", 30, FitnessLevel::Trained, Build::Medium);
/// let here = Waypoint::new("Hut", GeoPoint::new(46.0, 7.0).unwrap());
/// let mut hike = Hike::new(HikeId::new(1), 1, creator, here.clone(), here).unwrap();
/// hike.add_equipment(EquipmentItem::new(ItemId::new(1), "Kit", EquipmentCategory::Medical, 300, 1));
/// hike.add_equipment(EquipmentItem::new(ItemId::new(2), "Big kit", EquipmentCategory::Medical, 900, 1));
///
/// let picked = select_equipment(&hike);
/// assert_eq!(picked.len(), 1);
/// assert_eq!(picked[0].category(), EquipmentCategory::Medical);
/// ```
pub fn select_equipment(hike: &Hike) -> Vec<EquipmentItem> {
    let coverage = hike.participant_count() as u32;
    let mut selected = Vec::new();

    for category in EquipmentCategory::mandatory(hike.duration_days()) {
        let items = hike
            .equipment_group(category)
            .map(|g| g.items())
            .unwrap_or_default();
        let min_liters = if category == EquipmentCategory::Water {
            hike.group_daily_water_liters()
        } else {
            0.0
        };

        match select_cover(items, coverage, min_liters) {
            Some(mut chosen) => {
                debug!(%category, entries = chosen.len(), "equipment category covered");
                selected.append(&mut chosen);
            }
            None => warn!(%category, coverage, "equipment category cannot be covered"),
        }
    }

    selected
}

/// Best subset found so far.
struct Best {
    indices: Vec<usize>,
    mass: u64,
}

struct CoverSearch<'a> {
    items: &'a [EquipmentItem],
    min_coverage: u32,
    min_liters: f64,
    /// Coverage still obtainable from `items[i..]`.
    suffix_coverage: Vec<u32>,
    /// Water volume still obtainable from `items[i..]`.
    suffix_liters: Vec<f64>,
    chosen: Vec<usize>,
    best: Option<Best>,
}

impl<'a> CoverSearch<'a> {
    fn new(items: &'a [EquipmentItem], min_coverage: u32, min_liters: f64) -> Self {
        let n = items.len();
        let mut suffix_coverage = vec![0; n + 1];
        let mut suffix_liters = vec![0.0; n + 1];
        for i in (0..n).rev() {
            suffix_coverage[i] = suffix_coverage[i + 1] + items[i].batch_count();
            suffix_liters[i] = suffix_liters[i + 1] + items[i].water_capacity_liters();
        }
        Self {
            items,
            min_coverage,
            min_liters,
            suffix_coverage,
            suffix_liters,
            chosen: Vec::new(),
            best: None,
        }
    }

    /// Returns `true` if no extension of the current subset can beat the best.
    fn dominated(&self, mass: u64) -> bool {
        match &self.best {
            None => false,
            Some(best) => {
                let next_len = self.chosen.len() + 1;
                next_len > best.indices.len() || (next_len == best.indices.len() && mass >= best.mass)
            }
        }
    }

    fn explore(&mut self, start: usize, coverage: u32, liters: f64, mass: u64) {
        if coverage >= self.min_coverage && liters >= self.min_liters {
            let better = self.best.as_ref().is_none_or(|b| {
                (self.chosen.len(), mass) < (b.indices.len(), b.mass)
            });
            if better {
                self.best = Some(Best {
                    indices: self.chosen.clone(),
                    mass,
                });
            }
            return;
        }
        if self.dominated(mass)
            || coverage + self.suffix_coverage[start] < self.min_coverage
            || liters + self.suffix_liters[start] < self.min_liters
        {
            return;
        }

        for i in start..self.items.len() {
            let item = &self.items[i];
            self.chosen.push(i);
            self.explore(
                i + 1,
                coverage + item.batch_count(),
                liters + item.water_capacity_liters(),
                mass + item.batch_weight_g(),
            );
            self.chosen.pop();
        }
    }
}

/// Selects the fewest items (then the lightest) whose batch counts sum to at
/// least `min_coverage` and whose water volume is at least `min_liters`.
///
/// Returns the chosen items in input order, or `None` if no subset suffices.
/// A zero requirement yields an empty selection.
pub fn select_cover(
    items: &[EquipmentItem],
    min_coverage: u32,
    min_liters: f64,
) -> Option<Vec<EquipmentItem>> {
    let mut search = CoverSearch::new(items, min_coverage, min_liters);
    search.explore(0, 0, 0.0, 0);
    search
        .best
        .map(|best| best.indices.iter().map(|&i| items[i].clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemId;
    use crate::test_support::{valid_hike, valid_hike_with, HikeSpec};

    fn item(id: u64, mass: u32, batch: u32) -> EquipmentItem {
        EquipmentItem::new(ItemId::new(id), format!("i{id}"), EquipmentCategory::Rest, mass, batch)
    }

    fn ids(items: &[EquipmentItem]) -> Vec<u64> {
        items.iter().map(|i| i.id().get()).collect()
    }

    #[test]
    fn test_one_big_item_beats_many_small() {
        let items = vec![item(1, 100, 1), item(2, 100, 1), item(3, 100, 1), item(4, 500, 3)];
        let chosen = select_cover(&items, 3, 0.0).expect("coverable");
        assert_eq!(ids(&chosen), vec![4]);
    }

    #[test]
    fn test_equal_count_prefers_lighter() {
        let items = vec![item(1, 300, 2), item(2, 200, 2), item(3, 100, 1), item(4, 50, 1)];
        let chosen = select_cover(&items, 3, 0.0).expect("coverable");
        // Two entries are needed; 200×2 + 50 = 450 g is the lightest pair.
        assert_eq!(ids(&chosen), vec![2, 4]);
    }

    #[test]
    fn test_uncoverable() {
        let items = vec![item(1, 100, 1)];
        assert!(select_cover(&items, 2, 0.0).is_none());
        assert!(select_cover(&[], 1, 0.0).is_none());
    }

    #[test]
    fn test_zero_requirement_is_empty() {
        let items = vec![item(1, 100, 1)];
        assert_eq!(select_cover(&items, 0, 0.0), Some(vec![]));
    }

    #[test]
    fn test_water_volume_constraint() {
        let bottle = |id, mass, tare, batch| {
            EquipmentItem::new(ItemId::new(id), "w", EquipmentCategory::Water, mass, batch)
                .with_tare_mass(tare)
        };
        let items = vec![bottle(1, 600, 100, 3), bottle(2, 2100, 100, 2)];
        // Coverage alone would pick the 3×0.5 L bottles; 4 L needs the 2 L bags too.
        assert_eq!(ids(&select_cover(&items, 3, 0.0).expect("coverable")), vec![1]);
        assert_eq!(ids(&select_cover(&items, 3, 4.0).expect("coverable")), vec![1, 2]);
        assert!(select_cover(&items, 3, 6.0).is_none());
    }

    #[test]
    fn test_select_equipment_for_valid_hike() {
        let (hike, _) = valid_hike();
        let chosen = select_equipment(&hike);
        // Medical kit, map, water bag, tent, and the three pieces of clothing.
        assert_eq!(ids(&chosen), vec![20, 30, 35, 40, 52, 50, 51]);
        assert!(chosen.iter().all(|i| i.category() != EquipmentCategory::Other));
    }

    #[test]
    fn test_day_hike_skips_rest() {
        let spec = HikeSpec {
            duration_days: 1,
            ..HikeSpec::default()
        };
        let (hike, _) = valid_hike_with(&spec);
        let chosen = select_equipment(&hike);
        assert!(chosen.iter().all(|i| i.category() != EquipmentCategory::Rest));
    }
}
