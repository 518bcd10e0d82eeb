/// Zero-coverage statistics of one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GapStats {
    /// Number of maximal runs of zero coverage
    pub n_gaps: u32,
    /// Number of zero-coverage positions
    pub tot_gaps: u32,
}

///
/// Count the gaps of a coverage array.
///
/// A gap starts at every zero position that is either the first position or
/// follows a covered one.
///
pub fn analyze_gaps(coverage: &[u32]) -> GapStats {
    let mut stats = GapStats::default();
    let mut previous_covered = true;

    for &depth in coverage {
        if depth == 0 {
            stats.tot_gaps += 1;
            if previous_covered {
                stats.n_gaps += 1;
            }
        }
        previous_covered = depth != 0;
    }

    stats
}

/// Half-open offsets `(start, end)` of every zero run, left to right.
pub fn gap_runs(coverage: &[u32]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut open: Option<usize> = None;

    for (i, &depth) in coverage.iter().enumerate() {
        match (depth == 0, open) {
            (true, None) => open = Some(i),
            (false, Some(start)) => {
                runs.push((start, i));
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        runs.push((start, coverage.len()));
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    #[rstest]
    #[case(&[], 0, 0)]
    #[case(&[0, 0, 0, 0], 1, 4)]
    #[case(&[3, 1, 2], 0, 0)]
    #[case(&[0, 1, 0], 2, 2)]
    #[case(&[1, 0, 0, 1, 0, 1], 2, 3)]
    #[case(&[0], 1, 1)]
    fn test_analyze_gaps(#[case] coverage: &[u32], #[case] n_gaps: u32, #[case] tot_gaps: u32) {
        assert_eq!(analyze_gaps(coverage), GapStats { n_gaps, tot_gaps });
    }

    #[rstest]
    fn test_gap_runs() {
        assert_eq!(gap_runs(&[0, 0, 1, 0, 2, 2, 0, 0]), vec![(0, 2), (3, 4), (6, 8)]);
        assert_eq!(gap_runs(&[1, 1]), vec![]);
        assert_eq!(gap_runs(&[]), vec![]);
    }

    #[rstest]
    fn test_gaps_and_coverage_are_complementary() {
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..1000 {
            let len = rng.random_range(0..64);
            let coverage: Vec<u32> = (0..len).map(|_| rng.random_range(0..3u32)).collect();
            let stats = analyze_gaps(&coverage);
            let runs = gap_runs(&coverage);

            assert!(stats.n_gaps <= stats.tot_gaps);
            assert_eq!(stats.tot_gaps == 0, stats.n_gaps == 0);
            assert_eq!(runs.len(), stats.n_gaps as usize);
            assert_eq!(
                runs.iter().map(|(s, e)| e - s).sum::<usize>(),
                stats.tot_gaps as usize
            );
        }
    }
}
