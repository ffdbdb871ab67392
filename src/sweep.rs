//! The single-dimension sort-matching sweep.
//!
//! The sweep walks a sorted endpoint list while maintaining two subscription
//! sets: `before` holds subscriptions whose upper endpoint has been crossed,
//! `after` holds subscriptions whose lower endpoint has not been reached.
//! At an update's lower endpoint every subscription in `before` is disjoint
//! below it; at its upper endpoint every subscription still in `after` is
//! disjoint above it. Each update row therefore accumulates the complement
//! of its overlap set for the dimension.

use std::sync::Mutex;

use crate::bitmatrix::{or_words, BitMatrix, BitVector};
use crate::endpoints::{sort_events, EndpointEvent, EventOwner};
use crate::error::{MatchError, Result};
use crate::space::SpaceValue;

/// Write strategy for update rows; one sweep implementation serves all
/// accumulation modes.
pub trait RowWriter {
    /// Record the "before" set at an update's lower endpoint.
    fn write_before(&mut self, row: usize, bits: &[u32]) -> Result<()>;

    /// Record the "after" set at an update's upper endpoint.
    fn write_after(&mut self, row: usize, bits: &[u32]) -> Result<()>;
}

/// Overwrites each row at the lower endpoint, so the matrix holds exactly
/// this dimension's non-overlap bits afterwards. Used by the two-matrix
/// combiner.
pub struct OverwriteWriter<'a> {
    pub matrix: &'a mut BitMatrix,
}

impl RowWriter for OverwriteWriter<'_> {
    fn write_before(&mut self, row: usize, bits: &[u32]) -> Result<()> {
        self.matrix.row_mut(row).copy_from_slice(bits);
        Ok(())
    }

    fn write_after(&mut self, row: usize, bits: &[u32]) -> Result<()> {
        or_words(self.matrix.row_mut(row), bits);
        Ok(())
    }
}

/// ORs both endpoint writes, accumulating non-overlap bits across
/// dimensions into one matrix. Used by the in-place combiner.
pub struct AccumulateWriter<'a> {
    pub matrix: &'a mut BitMatrix,
}

impl RowWriter for AccumulateWriter<'_> {
    fn write_before(&mut self, row: usize, bits: &[u32]) -> Result<()> {
        or_words(self.matrix.row_mut(row), bits);
        Ok(())
    }

    fn write_after(&mut self, row: usize, bits: &[u32]) -> Result<()> {
        or_words(self.matrix.row_mut(row), bits);
        Ok(())
    }
}

/// ORs under a per-row lock; used when dimensions sweep on parallel
/// threads against a shared matrix.
pub struct LockedWriter<'a, 'm> {
    pub rows: &'a [Mutex<&'m mut [u32]>],
}

impl LockedWriter<'_, '_> {
    fn or_locked(&self, row: usize, bits: &[u32]) -> Result<()> {
        let mut guard = self.rows[row]
            .lock()
            .map_err(|_| MatchError::Threads("row lock poisoned".into()))?;
        or_words(&mut **guard, bits);
        Ok(())
    }
}

impl RowWriter for LockedWriter<'_, '_> {
    fn write_before(&mut self, row: usize, bits: &[u32]) -> Result<()> {
        self.or_locked(row, bits)
    }

    fn write_after(&mut self, row: usize, bits: &[u32]) -> Result<()> {
        self.or_locked(row, bits)
    }
}

/// Sweep one dimension's endpoint events, writing each update row's
/// non-overlap bitset through `writer`.
///
/// `events` is sorted in place. `before` and `after` are scratch vectors
/// sized to the subscription count; their previous contents are discarded.
pub fn sweep_dimension<S: SpaceValue, W: RowWriter>(
    events: &mut [EndpointEvent<S>],
    before: &mut BitVector,
    after: &mut BitVector,
    writer: &mut W,
) -> Result<()> {
    sort_events(events);

    before.zero_all();
    after.fill_all();

    // Only update endpoints write to the matrix; once they are exhausted
    // the remaining subscription events cannot change the result.
    let mut remaining = events
        .iter()
        .filter(|e| matches!(e.owner, EventOwner::Update(_)))
        .count();

    for event in events.iter() {
        if remaining == 0 {
            break;
        }
        match event.owner {
            EventOwner::Subscription(id) => {
                if event.is_lower {
                    // Past its lower endpoint the subscription is no longer
                    // strictly after the sweep position.
                    after.clear(id as usize);
                } else {
                    before.set(id as usize);
                }
            }
            EventOwner::Update(id) => {
                remaining -= 1;
                if event.is_lower {
                    writer.write_before(id as usize, before.words())?;
                } else {
                    writer.write_after(id as usize, after.words())?;
                }
            }
        }
    }

    Ok(())
}
