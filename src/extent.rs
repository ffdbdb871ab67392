//! Extent and dataset types for the matching problem.

use crate::error::{MatchError, Result};
use crate::space::SpaceValue;
use crate::MAX_DIMENSIONS;

/// The closed interval `[lower, upper]` an extent spans in one dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoints<S> {
    pub lower: S,
    pub upper: S,
}

impl<S: SpaceValue> Endpoints<S> {
    /// Create endpoints; `lower` must not exceed `upper`.
    #[inline]
    pub fn new(lower: S, upper: S) -> Self {
        debug_assert!(lower <= upper);
        Self { lower, upper }
    }
}

/// An axis-aligned hyperrectangle: an id plus one endpoint pair per
/// dimension. Slots past the dataset's dimension count are never read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent<S> {
    pub id: u32,
    pub endpoints: [Endpoints<S>; MAX_DIMENSIONS],
}

impl<S: SpaceValue> Extent<S> {
    /// Create an extent with every dimension collapsed to the space minimum.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            endpoints: [Endpoints::new(S::MIN, S::MIN); MAX_DIMENSIONS],
        }
    }

    /// Create an extent from the leading `bounds.len()` dimensions.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_DIMENSIONS`] bounds are given.
    pub fn from_bounds(id: u32, bounds: &[(S, S)]) -> Self {
        let mut extent = Self::new(id);
        for (dimension, &(lower, upper)) in bounds.iter().enumerate() {
            extent.endpoints[dimension] = Endpoints::new(lower, upper);
        }
        extent
    }
}

/// The matching problem: update extents against subscription extents in
/// `dimensions`-dimensional space.
///
/// Row `u` of the result matrix corresponds to `updates[u]` and bit `s` to
/// `subscriptions[s]`; the `id` field of an extent is carried for callers
/// and does not influence matching.
#[derive(Debug, Clone)]
pub struct Dataset<S> {
    pub dimensions: usize,
    pub updates: Vec<Extent<S>>,
    pub subscriptions: Vec<Extent<S>>,
}

impl<S: SpaceValue> Dataset<S> {
    /// Create an empty dataset with the given dimension count.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            updates: Vec::new(),
            subscriptions: Vec::new(),
        }
    }

    /// Check that the dimension count is in `1..=MAX_DIMENSIONS`.
    pub fn validate_dimensions(&self) -> Result<()> {
        if self.dimensions < 1 {
            return Err(MatchError::InvalidInput(
                "the problem must have at least one dimension".into(),
            ));
        }
        if self.dimensions > MAX_DIMENSIONS {
            return Err(MatchError::TooManyDimensions);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bounds_fills_leading_dimensions() {
        let extent = Extent::from_bounds(7, &[(2i64, 5), (10, 20)]);
        assert_eq!(extent.id, 7);
        assert_eq!(extent.endpoints[0], Endpoints::new(2, 5));
        assert_eq!(extent.endpoints[1], Endpoints::new(10, 20));
        // The trailing slot stays at the space minimum.
        assert_eq!(extent.endpoints[2].lower, i64::MIN);
    }

    #[test]
    fn test_dimension_validation() {
        let mut data = Dataset::<i64>::new(0);
        assert!(matches!(
            data.validate_dimensions(),
            Err(MatchError::InvalidInput(_))
        ));

        data.dimensions = MAX_DIMENSIONS + 1;
        assert!(matches!(
            data.validate_dimensions(),
            Err(MatchError::TooManyDimensions)
        ));

        data.dimensions = MAX_DIMENSIONS;
        assert!(data.validate_dimensions().is_ok());
    }
}
