//! The matching driver: validation, scratch allocation, per-dimension
//! dispatch, and cross-dimension combining.
//!
//! Each dimension's sweep produces the set of subscriptions that do *not*
//! overlap each update in that dimension. The final overlap matrix is the
//! complement of the union of those sets: `M = NOT(OR_d X_d)`. The
//! two-matrix combiner computes the equivalent `AND_d NOT(X_d)` instead,
//! one inverted dimension at a time.

use std::sync::Mutex;
use std::thread;

use crate::bitmatrix::{and_words, not_words, words_for, BitMatrix, BitVector};
use crate::config::{CombineMode, MatchConfig, ParallelMode};
use crate::endpoints::{fill_event_list, EndpointEvent};
use crate::error::{MatchError, Result};
use crate::extent::Dataset;
use crate::space::SpaceValue;
use crate::sweep::{sweep_dimension, AccumulateWriter, LockedWriter, OverwriteWriter};

/// Compute the overlap matrix for `data` into `out`.
///
/// `out` must be a zero-initialised matrix of `data.updates.len()` rows and
/// `data.subscriptions.len()` bit columns. On success `out[u][s]` is set
/// iff update `u` overlaps subscription `s` in every dimension. Bits past
/// the subscription count in the last word of each row are unspecified.
pub fn sort_matching<S: SpaceValue>(
    data: &Dataset<S>,
    config: &MatchConfig,
    out: &mut BitMatrix,
) -> Result<()> {
    data.validate_dimensions()?;

    let n_updates = data.updates.len();
    let n_subscriptions = data.subscriptions.len();
    if out.rows() != n_updates || out.row_words() != words_for(n_subscriptions) {
        return Err(MatchError::InvalidInput(format!(
            "result matrix is {}x{} words but the dataset needs {}x{}",
            out.rows(),
            out.row_words(),
            n_updates,
            words_for(n_subscriptions),
        )));
    }

    // With no updates or no subscriptions the matrix holds no words.
    if n_updates == 0 || n_subscriptions == 0 {
        return Ok(());
    }

    match config.parallel {
        ParallelMode::Sequential => match_sequential(data, config, out),
        ParallelMode::PerDimensionThread => match_threaded(data, config, out),
    }
}

fn match_sequential<S: SpaceValue>(
    data: &Dataset<S>,
    config: &MatchConfig,
    out: &mut BitMatrix,
) -> Result<()> {
    let n_subscriptions = data.subscriptions.len();
    let mut events: Vec<EndpointEvent<S>> = Vec::new();
    let mut before = BitVector::new(n_subscriptions)?;
    let mut after = BitVector::new(n_subscriptions)?;

    match config.combine {
        CombineMode::TwoMatrix => {
            // The first dimension sweeps straight into the result.
            fill_event_list(data, 0, config.widen, &mut events)?;
            {
                let mut writer = OverwriteWriter { matrix: &mut *out };
                sweep_dimension(&mut events, &mut before, &mut after, &mut writer)?;
            }
            not_words(out.words_mut());

            if data.dimensions > 1 {
                let mut scratch = BitMatrix::new(data.updates.len(), n_subscriptions)?;
                for dimension in 1..data.dimensions {
                    fill_event_list(data, dimension, config.widen, &mut events)?;
                    {
                        let mut writer = OverwriteWriter {
                            matrix: &mut scratch,
                        };
                        sweep_dimension(&mut events, &mut before, &mut after, &mut writer)?;
                    }
                    not_words(scratch.words_mut());
                    and_words(out.words_mut(), scratch.words());
                }
            }
        }
        CombineMode::InPlace => {
            for dimension in 0..data.dimensions {
                fill_event_list(data, dimension, config.widen, &mut events)?;
                let mut writer = AccumulateWriter { matrix: &mut *out };
                sweep_dimension(&mut events, &mut before, &mut after, &mut writer)?;
            }
            not_words(out.words_mut());
        }
    }

    Ok(())
}

/// One worker per dimension against a shared matrix. Each worker owns its
/// event list and scratch vectors; every row write happens under that row's
/// lock. Contributions commute under OR, so any interleaving that respects
/// the per-row locks yields the same matrix.
fn match_threaded<S: SpaceValue>(
    data: &Dataset<S>,
    config: &MatchConfig,
    out: &mut BitMatrix,
) -> Result<()> {
    let n_subscriptions = data.subscriptions.len();
    let row_words = out.row_words();
    // One lock per update row: two dimensions only contend when they reach
    // the same update at the same time.
    let row_locks: Vec<Mutex<&mut [u32]>> = out
        .words_mut()
        .chunks_mut(row_words)
        .map(Mutex::new)
        .collect();

    let first_error = thread::scope(|scope| {
        let mut workers = Vec::with_capacity(data.dimensions);
        for dimension in 0..data.dimensions {
            let row_locks = &row_locks;
            let widen = config.widen;
            workers.push(scope.spawn(move || -> Result<()> {
                let mut events: Vec<EndpointEvent<S>> = Vec::new();
                fill_event_list(data, dimension, widen, &mut events)?;
                let mut before = BitVector::new(n_subscriptions)?;
                let mut after = BitVector::new(n_subscriptions)?;
                let mut writer = LockedWriter { rows: row_locks };
                sweep_dimension(&mut events, &mut before, &mut after, &mut writer)
            }));
        }

        // Join every worker; surface the first failure in dimension order.
        let mut first_error = None;
        for worker in workers {
            match worker.join() {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
                Err(_) => {
                    if first_error.is_none() {
                        first_error =
                            Some(MatchError::Threads("matching worker panicked".into()));
                    }
                }
            }
        }
        first_error
    });
    drop(row_locks);

    if let Some(error) = first_error {
        return Err(error);
    }

    not_words(out.words_mut());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extent::Extent;

    fn two_dimensional() -> Dataset<i64> {
        let mut data = Dataset::new(2);
        data.updates
            .push(Extent::from_bounds(0, &[(0, 4), (0, 4)]));
        data.subscriptions
            .push(Extent::from_bounds(0, &[(1, 2), (1, 2)]));
        data.subscriptions
            .push(Extent::from_bounds(1, &[(5, 6), (1, 2)]));
        data.subscriptions
            .push(Extent::from_bounds(2, &[(1, 2), (5, 6)]));
        data
    }

    #[test]
    fn test_overlap_requires_every_dimension() {
        let data = two_dimensional();
        let mut out = BitMatrix::new(1, 3).unwrap();
        sort_matching(&data, &MatchConfig::default(), &mut out).unwrap();
        assert!(out.get(0, 0));
        assert!(!out.get(0, 1));
        assert!(!out.get(0, 2));
    }

    #[test]
    fn test_all_modes_agree_on_a_small_case() {
        let data = two_dimensional();
        let configs = [
            MatchConfig::default(),
            MatchConfig {
                combine: CombineMode::InPlace,
                ..MatchConfig::default()
            },
            MatchConfig {
                parallel: ParallelMode::PerDimensionThread,
                ..MatchConfig::default()
            },
        ];
        for config in configs {
            let mut out = BitMatrix::new(1, 3).unwrap();
            sort_matching(&data, &config, &mut out).unwrap();
            assert!(out.get(0, 0), "{config:?}");
            assert!(!out.get(0, 1), "{config:?}");
            assert!(!out.get(0, 2), "{config:?}");
        }
    }

    #[test]
    fn test_dimension_count_is_validated_first() {
        let mut data = two_dimensional();
        let mut out = BitMatrix::new(1, 3).unwrap();

        data.dimensions = 0;
        assert!(matches!(
            sort_matching(&data, &MatchConfig::default(), &mut out),
            Err(MatchError::InvalidInput(_))
        ));

        data.dimensions = crate::MAX_DIMENSIONS + 1;
        assert!(matches!(
            sort_matching(&data, &MatchConfig::default(), &mut out),
            Err(MatchError::TooManyDimensions)
        ));
    }

    #[test]
    fn test_result_shape_is_validated() {
        let data = two_dimensional();
        let mut out = BitMatrix::new(2, 3).unwrap();
        assert!(matches!(
            sort_matching(&data, &MatchConfig::default(), &mut out),
            Err(MatchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_sides_succeed() {
        let mut data = two_dimensional();
        data.updates.clear();
        let mut out = BitMatrix::new(0, 3).unwrap();
        sort_matching(&data, &MatchConfig::default(), &mut out).unwrap();

        let mut data = two_dimensional();
        data.subscriptions.clear();
        let mut out = BitMatrix::new(1, 0).unwrap();
        sort_matching(&data, &MatchConfig::default(), &mut out).unwrap();
    }
}
