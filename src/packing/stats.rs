//! Search counters for the distribution solver.

use serde::{Deserialize, Serialize};

/// Counters collected during one [`distribute`](super::BatchDistributor::distribute) call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionStats {
    /// Search nodes visited (one per item position reached).
    pub nodes: u64,
    /// Tentative batch placements.
    pub placements: u64,
    /// Placements undone after a failed subtree.
    pub backtracks: u64,
    /// Subtrees cut because the remaining space could not hold the remaining batches.
    pub prunes: u64,
}

impl DistributionStats {
    #[inline]
    pub(crate) fn on_node(&mut self) {
        self.nodes = self.nodes.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_placement(&mut self) {
        self.placements = self.placements.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_prune(&mut self) {
        self.prunes = self.prunes.saturating_add(1);
    }
}

impl std::fmt::Display for DistributionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "nodes={} placements={} backtracks={} prunes={}",
            self.nodes, self.placements, self.backtracks, self.prunes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut s = DistributionStats::default();
        s.on_node();
        s.on_node();
        s.on_placement();
        s.on_backtrack();
        s.on_prune();
        assert_eq!(s.nodes, 2);
        assert_eq!(s.to_string(), "nodes=2 placements=1 backtracks=1 prunes=1");
    }
}
