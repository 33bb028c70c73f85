//! Load distribution.
//!
//! Constrained bin-packing of indivisible item batches into participants'
//! backpacks, by backtracking with a remaining-capacity bound.

mod solver;
mod stats;

pub use solver::BatchDistributor;
pub use stats::DistributionStats;
