//! # u-hike
//!
//! Group hike planning library: validates a hike against a parametric
//! physiological model, selects the catalogue items it needs, and packs
//! them into the participants' backpacks.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Participant, Backpack, FoodProduct, EquipmentItem, Hike)
//! - [`distance`] — Haversine distance and waypoint-chain length
//! - [`evaluation`] — Profile targets, tolerance band, and the pre-optimization validator
//! - [`selection`] — Minimal equipment and food selection
//! - [`packing`] — Backtracking distribution of indivisible batches into backpacks
//! - [`planner`] — Validate → select → distribute pipeline and persistence boundary
//! - [`config`] — Planner configuration
//! - [`error`] — Error taxonomy

pub mod config;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod packing;
pub mod planner;
pub mod selection;

#[cfg(test)]
mod test_support;

pub use error::{ErrorKind, PlanningError};
