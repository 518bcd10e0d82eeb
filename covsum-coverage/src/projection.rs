use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use covsum_core::models::Interval;

use crate::errors::{CoverageError, CoverageResult};

/// How a [`CoverageProjector`] turns intervals into per-position depth.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMethod {
    /// Increment every covered position of every interval. O(width × depth).
    Naive,
    /// Record +1/-1 at clipped starts/ends, then prefix-sum. O(width + intervals).
    #[default]
    Sweep,
}

///
/// Projects the intervals overlapping a region onto a dense depth array.
///
/// The buffers are kept between calls, so walking the regions of a reference
/// with one projector sized to the region width allocates only once.
///
#[derive(Debug, Clone, Default)]
pub struct CoverageProjector {
    method: ProjectionMethod,
    deltas: Vec<i64>,
    coverage: Vec<u32>,
}

impl CoverageProjector {
    pub fn new(method: ProjectionMethod) -> Self {
        CoverageProjector {
            method,
            deltas: Vec::new(),
            coverage: Vec::new(),
        }
    }

    /// Projector with buffers pre-sized for regions of up to `width` positions.
    pub fn with_capacity(method: ProjectionMethod, width: usize) -> Self {
        let deltas = match method {
            ProjectionMethod::Naive => Vec::new(),
            ProjectionMethod::Sweep => Vec::with_capacity(width + 1),
        };
        CoverageProjector {
            method,
            deltas,
            coverage: Vec::with_capacity(width),
        }
    }

    ///
    /// Depth at every position of `[region_start, region_end)`.
    ///
    /// Each interval is clipped to the region first, intervals outside it
    /// contribute nothing. Position `i` of the result is the depth at
    /// `region_start + i`.
    ///
    /// # Errors
    /// - `InvertedRegion` when `region_start > region_end`
    /// - `Interval` when an interval has `end <= start`
    ///
    pub fn project<'a, T>(
        &mut self,
        intervals: impl IntoIterator<Item = &'a Interval<u32, T>>,
        region_start: u32,
        region_end: u32,
    ) -> CoverageResult<&[u32]>
    where
        T: Eq + Clone + Send + Sync + 'a,
    {
        if region_start > region_end {
            return Err(CoverageError::InvertedRegion {
                start: region_start,
                end: region_end,
            });
        }
        let coverage = self.accumulate(
            intervals,
            region_start,
            region_end,
            Interval::<u32, T>::validate,
        )?;
        Ok(coverage)
    }

    /// [`project`](Self::project) for intervals and regions already known to be well formed.
    pub(crate) fn project_valid<'a, T>(
        &mut self,
        intervals: impl IntoIterator<Item = &'a Interval<u32, T>>,
        region_start: u32,
        region_end: u32,
    ) -> &[u32]
    where
        T: Eq + Clone + Send + Sync + 'a,
    {
        let Ok(coverage) = self.accumulate(intervals, region_start, region_end, |_| {
            Ok::<(), Infallible>(())
        });
        coverage
    }

    fn accumulate<'a, T, E, F>(
        &mut self,
        intervals: impl IntoIterator<Item = &'a Interval<u32, T>>,
        region_start: u32,
        region_end: u32,
        mut check: F,
    ) -> Result<&[u32], E>
    where
        T: Eq + Clone + Send + Sync + 'a,
        F: FnMut(&Interval<u32, T>) -> Result<(), E>,
    {
        let width = (region_end - region_start) as usize;
        self.coverage.clear();
        self.coverage.resize(width, 0);

        match self.method {
            ProjectionMethod::Naive => {
                for interval in intervals {
                    check(interval)?;
                    if let Some((lo, hi)) = interval.clip(region_start, region_end) {
                        let range = (lo - region_start) as usize..(hi - region_start) as usize;
                        for depth in self.coverage[range].iter_mut() {
                            *depth += 1;
                        }
                    }
                }
            }
            ProjectionMethod::Sweep => {
                self.deltas.clear();
                self.deltas.resize(width + 1, 0);

                for interval in intervals {
                    check(interval)?;
                    if let Some((lo, hi)) = interval.clip(region_start, region_end) {
                        self.deltas[(lo - region_start) as usize] += 1;
                        self.deltas[(hi - region_start) as usize] -= 1;
                    }
                }

                let mut depth: i64 = 0;
                for (slot, delta) in self.coverage.iter_mut().zip(self.deltas.iter()) {
                    depth += delta;
                    *slot = depth as u32;
                }
            }
        }

        Ok(&self.coverage)
    }
}

///
/// Per-position depth over `[region_start, region_end)`, one increment per
/// covered position per interval.
///
pub fn project_coverage<'a, T>(
    intervals: impl IntoIterator<Item = &'a Interval<u32, T>>,
    region_start: u32,
    region_end: u32,
) -> CoverageResult<Vec<u32>>
where
    T: Eq + Clone + Send + Sync + 'a,
{
    CoverageProjector::new(ProjectionMethod::Naive)
        .project(intervals, region_start, region_end)
        .map(<[u32]>::to_vec)
}

///
/// Same result as [`project_coverage`], computed with a start/end delta sweep.
///
pub fn project_coverage_sweep<'a, T>(
    intervals: impl IntoIterator<Item = &'a Interval<u32, T>>,
    region_start: u32,
    region_end: u32,
) -> CoverageResult<Vec<u32>>
where
    T: Eq + Clone + Send + Sync + 'a,
{
    CoverageProjector::new(ProjectionMethod::Sweep)
        .project(intervals, region_start, region_end)
        .map(<[u32]>::to_vec)
}

#[cfg(test)]
mod tests {
    use super::*;

    use covsum_core::errors::IntervalError;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    fn iv(start: u32, end: u32) -> Interval<u32, ()> {
        Interval {
            start,
            end,
            val: (),
        }
    }

    #[rstest]
    #[case(ProjectionMethod::Naive)]
    #[case(ProjectionMethod::Sweep)]
    fn test_half_open_projection(#[case] method: ProjectionMethod) {
        let intervals = vec![iv(2, 5), iv(4, 6)];
        let mut projector = CoverageProjector::new(method);
        let coverage = projector.project(&intervals, 0, 8).unwrap();
        assert_eq!(coverage, &[0, 0, 1, 1, 2, 1, 0, 0]);
    }

    #[rstest]
    #[case(ProjectionMethod::Naive)]
    #[case(ProjectionMethod::Sweep)]
    fn test_clips_intervals_straddling_the_region(#[case] method: ProjectionMethod) {
        let intervals = vec![iv(0, 12), iv(8, 30), iv(25, 40), iv(0, 10)];
        let mut projector = CoverageProjector::new(method);
        let coverage = projector.project(&intervals, 10, 20).unwrap();
        assert_eq!(coverage, &[2, 2, 1, 1, 1, 1, 1, 1, 1, 1]);
    }

    #[rstest]
    #[case(ProjectionMethod::Naive)]
    #[case(ProjectionMethod::Sweep)]
    fn test_deep_pileup_accumulates(#[case] method: ProjectionMethod) {
        let intervals = vec![iv(100, 200); 10];
        let mut projector = CoverageProjector::new(method);
        let coverage = projector.project(&intervals, 150, 160).unwrap();
        assert_eq!(coverage, &[10; 10]);
    }

    #[rstest]
    fn test_empty_region() {
        let coverage = project_coverage(&[iv(0, 10)], 5, 5).unwrap();
        assert!(coverage.is_empty());
    }

    #[rstest]
    fn test_inverted_region_is_rejected() {
        assert_eq!(
            project_coverage_sweep(&[iv(0, 10)], 6, 5),
            Err(CoverageError::InvertedRegion { start: 6, end: 5 })
        );
    }

    #[rstest]
    #[case(ProjectionMethod::Naive)]
    #[case(ProjectionMethod::Sweep)]
    fn test_malformed_interval_is_rejected(#[case] method: ProjectionMethod) {
        let intervals = vec![iv(0, 10), iv(7, 7)];
        let mut projector = CoverageProjector::new(method);
        assert_eq!(
            projector.project(&intervals, 0, 10),
            Err(CoverageError::Interval(IntervalError::Empty { start: 7, end: 7 }))
        );
    }

    #[rstest]
    fn test_projector_reuses_buffers_across_regions() {
        let intervals = vec![iv(0, 15)];
        let mut projector = CoverageProjector::with_capacity(ProjectionMethod::Sweep, 10);
        assert_eq!(projector.project(&intervals, 0, 10).unwrap(), &[1; 10]);
        assert_eq!(
            projector.project(&intervals, 10, 20).unwrap(),
            &[1, 1, 1, 1, 1, 0, 0, 0, 0, 0]
        );
        assert_eq!(projector.project(&intervals, 20, 23).unwrap(), &[0, 0, 0]);
    }

    #[rstest]
    fn test_conservation_and_agreement_on_random_input() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..500 {
            let n = rng.random_range(0..=50);
            let intervals: Vec<Interval<u32, ()>> = (0..n)
                .map(|_| {
                    let start = rng.random_range(0..300u32);
                    iv(start, start + rng.random_range(1..=100u32))
                })
                .collect();
            let region_start = rng.random_range(0..300u32);
            let region_end = region_start + rng.random_range(0..=120u32);

            let naive = project_coverage(&intervals, region_start, region_end).unwrap();
            let sweep = project_coverage_sweep(&intervals, region_start, region_end).unwrap();
            assert_eq!(naive, sweep);
            assert_eq!(naive.len(), (region_end - region_start) as usize);

            let clipped_total: u64 = intervals
                .iter()
                .filter_map(|i| i.clip(region_start, region_end))
                .map(|(lo, hi)| (hi - lo) as u64)
                .sum();
            let covered_total: u64 = naive.iter().map(|&d| d as u64).sum();
            assert_eq!(covered_total, clipped_total);

            for (offset, &depth) in naive.iter().enumerate() {
                let pos = region_start + offset as u32;
                let truth = intervals.iter().filter(|i| i.start <= pos && pos < i.end).count();
                assert_eq!(depth as usize, truth);
            }
        }
    }
}
