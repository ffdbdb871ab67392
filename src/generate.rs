//! Synthetic dataset generators for benchmarking and tests.
//!
//! Two flavours: a deterministic fixture whose overlaps are easy to reason
//! about by hand, and a seeded uniform generator spanning most of the
//! coordinate type's range. Both validate the dimension count before
//! allocating anything.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::error::{MatchError, Result};
use crate::extent::{Dataset, Endpoints, Extent};
use crate::space::SpaceValue;

/// Deterministic dataset.
///
/// In every dimension `i`, update `j` spans
/// `[10(j+1)+1+50(i+1), 20(j+1)-1+50(i+1)]` and subscription `j` spans
/// `[15(j+1), 30(j+1)]`.
pub fn fixed_dataset<S: SpaceValue>(
    updates: usize,
    subscriptions: usize,
    dimensions: usize,
) -> Result<Dataset<S>> {
    let mut data = Dataset::new(dimensions);
    data.validate_dimensions()?;
    reserve(&mut data, updates, subscriptions)?;

    for j in 0..updates {
        let mut extent = Extent::new(j as u32);
        for (i, endpoints) in extent.endpoints.iter_mut().take(dimensions).enumerate() {
            let lower = 10 * (j as u64 + 1) + 1 + 50 * (i as u64 + 1);
            let upper = 20 * (j as u64 + 1) - 1 + 50 * (i as u64 + 1);
            *endpoints = Endpoints::new(S::from_u32(lower as u32), S::from_u32(upper as u32));
        }
        data.updates.push(extent);
    }

    for j in 0..subscriptions {
        let mut extent = Extent::new(j as u32);
        for endpoints in extent.endpoints.iter_mut().take(dimensions) {
            let lower = 15 * (j as u64 + 1);
            let upper = 30 * (j as u64 + 1);
            *endpoints = Endpoints::new(S::from_u32(lower as u32), S::from_u32(upper as u32));
        }
        data.subscriptions.push(extent);
    }

    Ok(data)
}

/// Seeded random dataset with uniform endpoints drawn between the
/// coordinate type's minimum and maximum. Two points are drawn per
/// dimension and sorted into lower/upper, so extents are wide on average.
/// For the float types the minimum is the positive minimum, so every
/// coordinate is positive.
pub fn random_dataset<S: SpaceValue>(
    updates: usize,
    subscriptions: usize,
    dimensions: usize,
    seed: u64,
) -> Result<Dataset<S>> {
    let mut data = Dataset::new(dimensions);
    data.validate_dimensions()?;
    reserve(&mut data, updates, subscriptions)?;

    let mut rng = SmallRng::seed_from_u64(seed);

    for j in 0..updates {
        data.updates.push(random_extent(j as u32, dimensions, &mut rng));
    }
    for j in 0..subscriptions {
        data.subscriptions
            .push(random_extent(j as u32, dimensions, &mut rng));
    }

    Ok(data)
}

fn random_extent<S: SpaceValue>(id: u32, dimensions: usize, rng: &mut SmallRng) -> Extent<S> {
    let mut extent = Extent::new(id);
    for endpoints in extent.endpoints.iter_mut().take(dimensions) {
        let a = S::random_point(rng);
        let b = S::random_point(rng);
        let (lower, upper) = if a <= b { (a, b) } else { (b, a) };
        *endpoints = Endpoints::new(lower, upper);
    }
    extent
}

fn reserve<S: SpaceValue>(
    data: &mut Dataset<S>,
    updates: usize,
    subscriptions: usize,
) -> Result<()> {
    data.updates
        .try_reserve_exact(updates)
        .map_err(|_| MatchError::Allocation)?;
    data.subscriptions
        .try_reserve_exact(subscriptions)
        .map_err(|_| MatchError::Allocation)?;
    Ok(())
}
