//! Hike evaluation.
//!
//! Profile-derived targets for each participant and the pre-optimization
//! validator that checks a hike against them.

mod profile;
mod validator;

pub use profile::{within_band, MetricModel, ModifierAccumulation, ModifierTable, ProfileModel};
pub use validator::HikeValidator;
