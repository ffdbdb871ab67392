//! Runtime configuration for the matching driver.
//!
//! The accumulation strategy, threading, and endpoint widening are selected
//! once at driver entry and threaded through the sweep as values.

/// How per-dimension results combine into the final overlap matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombineMode {
    /// Sweep each dimension into a temporary matrix, invert it, and AND it
    /// into the result. The first dimension sweeps straight into the result.
    #[default]
    TwoMatrix,
    /// Accumulate every dimension's non-overlap bits into the result with
    /// OR and invert once at the end. Halves peak memory.
    InPlace,
}

/// Thread scheduling for the per-dimension sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParallelMode {
    /// One sweep at a time on the calling thread.
    #[default]
    Sequential,
    /// One worker thread per dimension, sharing the result matrix behind a
    /// per-row lock array. Accumulation is always in place in this mode.
    PerDimensionThread,
}

/// Endpoint treatment when building the event list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidenMode {
    /// Use endpoints as given; coincident endpoints count as overlapping.
    #[default]
    Exact,
    /// Widen every extent by one increment per side, so extents separated
    /// by up to one increment also count as overlapping.
    Superset,
}

/// Full driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchConfig {
    pub combine: CombineMode,
    pub parallel: ParallelMode,
    pub widen: WidenMode,
}
