//! Defines types holding statistics about a solver's progress.

/// Statistics about a finished IDA* outer-loop iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchIterationStats {
    /// The depth bound used for this iteration.
    pub depth_limit: u8,

    /// The number of nodes expanded (including the root) during this iteration.
    pub nodes_expanded: u64,
}
