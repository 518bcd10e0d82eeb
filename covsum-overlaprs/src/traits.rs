use num_traits::{PrimInt, Unsigned};

pub use covsum_core::models::Interval;

/// A read-only index answering "which intervals overlap `[start, end)`".
///
/// Overlap is half-open on both sides: an interval `iv` matches when
/// `iv.start < end && start < iv.end`.
pub trait Overlapper<I, T>: Send + Sync
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    fn build(intervals: Vec<Interval<I, T>>) -> Self
    where
        Self: Sized;

    fn find(&self, start: I, end: I) -> Vec<Interval<I, T>>;

    fn find_iter<'a>(
        &'a self,
        start: I,
        end: I,
    ) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a>;
}
