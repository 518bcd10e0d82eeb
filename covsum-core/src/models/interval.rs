use num_traits::{PrimInt, Unsigned, identities::zero};
use std::cmp::Ordering::{self};

use crate::errors::{IntervalError, IntervalResult};

/// One aligned span on a reference, `[start, end)`.
///
/// Inclusive of `start`, exclusive of `end`: the interval covers positions
/// `start..=end - 1`. A well-formed interval always has `start < end`; use
/// [`Interval::new`] to get that checked at construction, or
/// [`Interval::validate`] on values built with a struct literal.
#[derive(Eq, Debug, Clone)]
pub struct Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    pub start: I,
    pub end: I,
    pub val: T,
}

impl<I, T> Ord for Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    #[inline]
    fn cmp(&self, other: &Interval<I, T>) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl<I, T> Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Build an interval, rejecting `end <= start`.
    pub fn new(start: I, end: I, val: T) -> IntervalResult<Self> {
        let interval = Interval { start, end, val };
        interval.validate()?;
        Ok(interval)
    }

    /// Check the `start < end` invariant.
    #[inline]
    pub fn validate(&self) -> IntervalResult<()> {
        if self.end <= self.start {
            return Err(IntervalError::Empty {
                start: self.start.to_u64().unwrap_or(u64::MAX),
                end: self.end.to_u64().unwrap_or(u64::MAX),
            });
        }
        Ok(())
    }

    /// Number of positions covered. Zero for malformed intervals.
    #[inline]
    pub fn len(&self) -> I {
        self.end.checked_sub(&self.start).unwrap_or_else(zero::<I>)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Length of the intersection between two intervals
    #[inline]
    pub fn intersect(&self, other: &Interval<I, T>) -> I {
        std::cmp::min(self.end, other.end)
            .checked_sub(std::cmp::max(&self.start, &other.start))
            .unwrap_or_else(zero::<I>)
    }

    /// Half-open overlap test against `[start, end)`
    #[inline]
    pub fn overlaps(&self, start: I, end: I) -> bool {
        self.start < end && start < self.end
    }

    /// Clip to `[start, end)`. `None` when nothing is left.
    #[inline]
    pub fn clip(&self, start: I, end: I) -> Option<(I, I)> {
        let lo = std::cmp::max(self.start, start);
        let hi = std::cmp::min(self.end, end);
        (lo < hi).then_some((lo, hi))
    }
}

impl<I, T> PartialOrd for Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I, T> PartialEq for Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    #[inline]
    fn eq(&self, other: &Interval<I, T>) -> bool {
        self.start == other.start && self.end == other.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(5, 5)]
    #[case(10, 5)]
    fn test_new_rejects_empty_and_inverted(#[case] start: u32, #[case] end: u32) {
        let result = Interval::new(start, end, ());
        assert_eq!(
            result,
            Err(IntervalError::Empty {
                start: start as u64,
                end: end as u64
            })
        );
    }

    #[rstest]
    fn test_single_point_interval() {
        let iv = Interval::new(7u32, 8, ()).unwrap();
        assert_eq!(iv.len(), 1);
        assert!(iv.overlaps(7, 8));
        assert!(!iv.overlaps(8, 9));
        assert!(!iv.overlaps(6, 7));
    }

    #[rstest]
    #[case((0, 100), Some((5, 10)))]
    #[case((7, 100), Some((7, 10)))]
    #[case((0, 8), Some((5, 8)))]
    #[case((10, 20), None)]
    #[case((0, 5), None)]
    fn test_clip(#[case] bounds: (u32, u32), #[case] expected: Option<(u32, u32)>) {
        let iv = Interval {
            start: 5u32,
            end: 10,
            val: (),
        };
        assert_eq!(iv.clip(bounds.0, bounds.1), expected);
    }

    #[rstest]
    fn test_intersect_and_ordering() {
        let a = Interval {
            start: 5u32,
            end: 10,
            val: "a",
        };
        let b = Interval {
            start: 8u32,
            end: 20,
            val: "b",
        };
        assert_eq!(a.intersect(&b), 3);
        assert_eq!(a.cmp(&b), Ordering::Less);

        let c = Interval {
            start: 20u32,
            end: 25,
            val: "c",
        };
        assert_eq!(a.intersect(&c), 0);
    }
}
