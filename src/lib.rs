//! sortmatch: sort-based multi-dimensional extent matching.
//!
//! Given a set of *update* extents and a set of *subscription* extents
//! (axis-aligned hyperrectangles) in D-dimensional space, this library
//! computes the bit matrix of pairwise overlaps: one row per update, one
//! bit per subscription, set when the two extents share at least one point
//! in every dimension.
//!
//! Each dimension is processed with an endpoint sweep over a sorted event
//! list; per-dimension results are combined with bulk bitwise operations.
//! Three accumulation strategies are available: a two-matrix combiner, an
//! in-place low-memory combiner, and a thread-per-dimension combiner with
//! per-row locking.
//!
//! # Example
//!
//! ```rust
//! use sortmatch::prelude::*;
//!
//! let mut data = Dataset::<i64>::new(1);
//! data.updates.push(Extent::from_bounds(0, &[(2, 5)]));
//! data.subscriptions.push(Extent::from_bounds(0, &[(3, 4)]));
//! data.subscriptions.push(Extent::from_bounds(1, &[(6, 7)]));
//!
//! let mut result = BitMatrix::new(1, 2).unwrap();
//! sort_matching(&data, &MatchConfig::default(), &mut result).unwrap();
//! assert!(result.get(0, 0));
//! assert!(!result.get(0, 1));
//! ```

pub mod bitmatrix;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod extent;
pub mod generate;
pub mod matcher;
pub mod space;
pub mod sweep;

// Re-export commonly used types
pub use bitmatrix::{BitMatrix, BitVector};
pub use config::{CombineMode, MatchConfig, ParallelMode, WidenMode};
pub use error::{MatchError, Result};
pub use extent::{Dataset, Endpoints, Extent};
pub use matcher::sort_matching;
pub use space::SpaceValue;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of dimensions an extent can carry. The cap exists so
/// extents can hold their endpoints inline.
pub const MAX_DIMENSIONS: usize = 3;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitmatrix::{BitMatrix, BitVector};
    pub use crate::config::{CombineMode, MatchConfig, ParallelMode, WidenMode};
    pub use crate::error::{MatchError, Result};
    pub use crate::extent::{Dataset, Endpoints, Extent};
    pub use crate::generate::{fixed_dataset, random_dataset};
    pub use crate::matcher::sort_matching;
    pub use crate::space::SpaceValue;
    pub use crate::MAX_DIMENSIONS;
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_basic_workflow() {
        use crate::extent::{Dataset, Extent};
        use crate::{sort_matching, BitMatrix, MatchConfig};

        let mut data = Dataset::<f64>::new(2);
        data.updates
            .push(Extent::from_bounds(0, &[(0.0, 4.0), (0.0, 4.0)]));
        data.subscriptions
            .push(Extent::from_bounds(0, &[(1.0, 2.0), (1.0, 2.0)]));
        data.subscriptions
            .push(Extent::from_bounds(1, &[(5.0, 6.0), (1.0, 2.0)]));

        let mut result = BitMatrix::new(1, 2).unwrap();
        sort_matching(&data, &MatchConfig::default(), &mut result).unwrap();

        assert!(result.get(0, 0));
        assert!(!result.get(0, 1));
    }
}
