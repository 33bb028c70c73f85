//! Food selection.
//!
//! Picks whole catalogue entries so that their total energy reaches the
//! group's daily caloric need with the least carried mass. Among selections
//! of equal mass, fewer entries win.
//!
//! The catalogue is kept sorted by caloric density, so the search tries the
//! most energy-dense entries first and finds a good incumbent early.

use tracing::debug;

use crate::models::{CatalogueEntry, FoodProduct, Hike};

/// Selects the lightest food set covering the hike's group daily calories.
///
/// Returns an empty list when the group needs no calories or when the
/// whole catalogue cannot reach the target.
pub fn select_food(hike: &Hike) -> Vec<FoodProduct> {
    select_food_for(hike.food(), hike.group_daily_kcal())
}

/// Selects the lightest subset of `catalogue` with total kcal ≥ `target_kcal`.
///
/// Entries are returned in catalogue order.
///
/// # Examples
///
/// ```
/// use u_hike::models::{CatalogueEntry, FoodProduct, ItemId};
/// use u_hike::selection::select_food_for;
///
/// let catalogue = vec![
///     FoodProduct::new(ItemId::new(1), "Nuts", 100, 4, 600.0),
///     FoodProduct::new(ItemId::new(2), "Rice", 500, 2, 1800.0),
/// ];
/// let picked = select_food_for(&catalogue, 2000.0);
/// assert_eq!(picked.len(), 1);
/// assert_eq!(picked[0].name(), "Nuts");
/// ```
pub fn select_food_for(catalogue: &[FoodProduct], target_kcal: f64) -> Vec<FoodProduct> {
    if target_kcal <= 0.0 {
        return Vec::new();
    }

    let mut search = FoodSearch::new(catalogue, target_kcal);
    search.explore(0, 0.0, 0);

    match search.best {
        Some((indices, mass)) => {
            debug!(entries = indices.len(), mass_g = mass, target_kcal, "food selected");
            indices.into_iter().map(|i| catalogue[i].clone()).collect()
        }
        None => {
            debug!(target_kcal, "food catalogue cannot reach target");
            Vec::new()
        }
    }
}

struct FoodSearch<'a> {
    catalogue: &'a [FoodProduct],
    target_kcal: f64,
    suffix_kcal: Vec<f64>,
    chosen: Vec<usize>,
    best: Option<(Vec<usize>, u64)>,
}

impl<'a> FoodSearch<'a> {
    fn new(catalogue: &'a [FoodProduct], target_kcal: f64) -> Self {
        let mut suffix_kcal = vec![0.0; catalogue.len() + 1];
        for i in (0..catalogue.len()).rev() {
            suffix_kcal[i] = suffix_kcal[i + 1] + catalogue[i].total_kcal();
        }
        Self {
            catalogue,
            target_kcal,
            suffix_kcal,
            chosen: Vec::new(),
            best: None,
        }
    }

    fn explore(&mut self, start: usize, kcal: f64, mass: u64) {
        if kcal >= self.target_kcal {
            let better = self
                .best
                .as_ref()
                .is_none_or(|(idx, m)| (mass, self.chosen.len()) < (*m, idx.len()));
            if better {
                self.best = Some((self.chosen.clone(), mass));
            }
            return;
        }
        if kcal + self.suffix_kcal[start] < self.target_kcal {
            return;
        }
        if let Some((idx, m)) = &self.best {
            // Any completion adds at least one entry and no negative mass.
            if mass > *m || (mass == *m && self.chosen.len() + 1 >= idx.len()) {
                return;
            }
        }

        for i in start..self.catalogue.len() {
            let food = &self.catalogue[i];
            self.chosen.push(i);
            self.explore(i + 1, kcal + food.total_kcal(), mass + food.batch_weight_g());
            self.chosen.pop();
        }
    }
}
