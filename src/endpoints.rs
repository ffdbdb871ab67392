//! Endpoint event lists for the per-dimension sweep.
//!
//! For one dimension, every extent contributes two events: its lower and
//! its upper endpoint. Events carry an explicit owner tag distinguishing
//! subscription extents from update extents; the ids are positions in the
//! dataset's respective sequences.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::config::WidenMode;
use crate::error::{MatchError, Result};
use crate::extent::Dataset;
use crate::space::SpaceValue;

/// Event count at which sorting switches to rayon. Below this, thread
/// spawn overhead outweighs the parallel speedup.
pub const PARALLEL_SORT_THRESHOLD: usize = 10_000;

/// Which extent an endpoint event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOwner {
    /// Position in `Dataset::subscriptions`.
    Subscription(u32),
    /// Position in `Dataset::updates`.
    Update(u32),
}

/// One sortable endpoint: owner, polarity, and position on the sweep axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointEvent<S> {
    pub owner: EventOwner,
    pub is_lower: bool,
    pub point: S,
}

/// Fill `events` with the `2 * (updates + subscriptions)` endpoint events
/// of `dimension`, applying superset widening when requested. The vector is
/// cleared first and reused across dimensions.
pub fn fill_event_list<S: SpaceValue>(
    data: &Dataset<S>,
    dimension: usize,
    widen: WidenMode,
    events: &mut Vec<EndpointEvent<S>>,
) -> Result<()> {
    events.clear();
    let len = 2 * (data.updates.len() + data.subscriptions.len());
    events
        .try_reserve_exact(len)
        .map_err(|_| MatchError::Allocation)?;

    for (index, subscription) in data.subscriptions.iter().enumerate() {
        let span = &subscription.endpoints[dimension];
        let owner = EventOwner::Subscription(index as u32);
        events.push(EndpointEvent {
            owner,
            is_lower: true,
            point: lower_point(span.lower, widen),
        });
        events.push(EndpointEvent {
            owner,
            is_lower: false,
            point: upper_point(span.upper, widen),
        });
    }

    for (index, update) in data.updates.iter().enumerate() {
        let span = &update.endpoints[dimension];
        let owner = EventOwner::Update(index as u32);
        events.push(EndpointEvent {
            owner,
            is_lower: true,
            point: lower_point(span.lower, widen),
        });
        events.push(EndpointEvent {
            owner,
            is_lower: false,
            point: upper_point(span.upper, widen),
        });
    }

    Ok(())
}

#[inline]
fn lower_point<S: SpaceValue>(point: S, widen: WidenMode) -> S {
    match widen {
        WidenMode::Exact => point,
        WidenMode::Superset => point.widen_lower(),
    }
}

#[inline]
fn upper_point<S: SpaceValue>(point: S, widen: WidenMode) -> S {
    match widen {
        WidenMode::Exact => point,
        WidenMode::Superset => point.widen_upper(),
    }
}

/// Sort events by point ascending, lower endpoints ahead of upper endpoints
/// at equal points. Large lists sort on the rayon pool.
///
/// The tie-break keeps coincident endpoints overlapping: a subscription's
/// upper event must not enter the "before" set ahead of an update's lower
/// event at the same point, and an update's lower event must never trail
/// its own upper event when widening collapses a zero-width extent onto a
/// single representable point.
pub fn sort_events<S: SpaceValue>(events: &mut [EndpointEvent<S>]) {
    if events.len() >= PARALLEL_SORT_THRESHOLD {
        events.par_sort_unstable_by(compare_events);
    } else {
        events.sort_unstable_by(compare_events);
    }
}

fn compare_events<S: SpaceValue>(a: &EndpointEvent<S>, b: &EndpointEvent<S>) -> Ordering {
    a.point
        .partial_cmp(&b.point)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.is_lower.cmp(&a.is_lower))
}
