//! Coordinate scalar types for extent endpoints.
//!
//! The matching engine is generic over the scalar the space is measured in.
//! Four types are supported: `i32`, `i64`, `f32`, and `f64`. Each carries
//! its bounds and its minimum positive increment, which the superset mode
//! uses to widen extents by one representable step.

use rand::Rng;
use std::fmt;

/// A scalar usable as an endpoint coordinate.
pub trait SpaceValue:
    Copy + PartialOrd + PartialEq + Send + Sync + fmt::Debug + fmt::Display + 'static
{
    /// Lower clamp for superset widening. For the float types this is the
    /// positive minimum, so widening at the true lower bound is not clamped.
    const MIN: Self;

    /// Upper clamp for superset widening.
    const MAX: Self;

    /// Minimum positive increment: 1 for the integer types, the machine
    /// epsilon for the float types.
    const INCREMENT: Self;

    /// One increment below `self`, clamped at `MIN`.
    fn widen_lower(self) -> Self;

    /// One increment above `self`, clamped at `MAX`.
    fn widen_upper(self) -> Self;

    /// A uniformly distributed point between `MIN` and `MAX`. For the
    /// float types `MIN` is the positive minimum, so float points are
    /// positive.
    fn random_point<R: Rng>(rng: &mut R) -> Self;

    /// Lossy lift from a small integer, for deterministic fixtures.
    fn from_u32(value: u32) -> Self;
}

macro_rules! int_space {
    ($t:ty) => {
        impl SpaceValue for $t {
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
            const INCREMENT: Self = 1;

            #[inline]
            fn widen_lower(self) -> Self {
                if self > Self::MIN {
                    self - Self::INCREMENT
                } else {
                    self
                }
            }

            #[inline]
            fn widen_upper(self) -> Self {
                if self < Self::MAX {
                    self + Self::INCREMENT
                } else {
                    self
                }
            }

            fn random_point<R: Rng>(rng: &mut R) -> Self {
                rng.gen()
            }

            #[inline]
            fn from_u32(value: u32) -> Self {
                value as $t
            }
        }
    };
}

macro_rules! float_space {
    ($t:ty) => {
        impl SpaceValue for $t {
            const MIN: Self = <$t>::MIN_POSITIVE;
            const MAX: Self = <$t>::MAX;
            const INCREMENT: Self = <$t>::EPSILON;

            #[inline]
            fn widen_lower(self) -> Self {
                if self > Self::MIN {
                    self - Self::INCREMENT
                } else {
                    self
                }
            }

            #[inline]
            fn widen_upper(self) -> Self {
                if self < Self::MAX {
                    self + Self::INCREMENT
                } else {
                    self
                }
            }

            fn random_point<R: Rng>(rng: &mut R) -> Self {
                Self::MIN + rng.gen::<$t>() * (Self::MAX - Self::MIN)
            }

            #[inline]
            fn from_u32(value: u32) -> Self {
                value as $t
            }
        }
    };
}

int_space!(i32);
int_space!(i64);
float_space!(f32);
float_space!(f64);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_integer_widening() {
        assert_eq!(5i32.widen_lower(), 4);
        assert_eq!(5i32.widen_upper(), 6);
        assert_eq!(i32::MIN.widen_lower(), i32::MIN);
        assert_eq!(i32::MAX.widen_upper(), i32::MAX);
        assert_eq!(i64::MIN.widen_lower(), i64::MIN);
        assert_eq!(i64::MAX.widen_upper(), i64::MAX);
    }

    #[test]
    fn test_float_widening_near_one() {
        let widened = 1.0f64.widen_lower();
        assert!(widened < 1.0);
        assert!(1.0f64.widen_upper() > 1.0);
        assert_eq!(widened + f64::EPSILON, 1.0);
    }

    #[test]
    fn test_float_lower_clamp_is_positive_minimum() {
        // The lower clamp compares against the positive minimum, so it
        // blocks widening for every value at or below it, negatives
        // included.
        assert_eq!(f32::MIN_POSITIVE.widen_lower(), f32::MIN_POSITIVE);
        assert_eq!(f64::MAX.widen_upper(), f64::MAX);
        assert_eq!((-1.0f64).widen_lower(), -1.0);
        assert_eq!(0.0f64.widen_lower(), 0.0);
    }

    #[test]
    fn test_from_u32() {
        assert_eq!(i32::from_u32(61), 61);
        assert_eq!(i64::from_u32(61), 61);
        assert_eq!(f64::from_u32(61), 61.0);
    }

    #[test]
    fn test_random_float_points_are_finite_and_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let x = f64::random_point(&mut rng);
            assert!(x.is_finite());
            assert!((f64::MIN_POSITIVE..=f64::MAX).contains(&x));
            let y = f32::random_point(&mut rng);
            assert!(y.is_finite());
            assert!((f32::MIN_POSITIVE..=f32::MAX).contains(&y));
        }
    }
}
