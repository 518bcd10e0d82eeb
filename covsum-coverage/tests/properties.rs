use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use covsum_core::models::{Interval, ReferenceIntervals};
use covsum_coverage::sizing::count_regions;
use covsum_coverage::{
    SummarizeConfig, SummaryOptions, region_bounds, summarize, summarize_references,
};

#[rstest]
fn test_regions_tile_the_reference() {
    let mut rng = StdRng::seed_from_u64(17);

    for _ in 0..1000 {
        let length = rng.random_range(1..=5000u32);
        let width = rng.random_range(1..=6000u32);

        let regions: Vec<(u32, u32)> = region_bounds(length, width).unwrap().collect();

        assert_eq!(regions.first().map(|r| r.0), Some(0));
        assert_eq!(regions.last().map(|r| r.1), Some(length));
        for pair in regions.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        for (start, end) in regions.iter() {
            assert!(start < end);
            assert!(end - start <= width);
        }
        assert_eq!(regions.len() as u64, count_regions(&[length], width as u64));
    }
}

#[rstest]
fn test_region_depths_add_up_to_aligned_bases() {
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..200 {
        let length = rng.random_range(50..=3000u32);
        let width = rng.random_range(1..=700u32);
        let intervals: Vec<Interval<u32, ()>> = (0..rng.random_range(0..=60))
            .map(|_| {
                let start = rng.random_range(0..length);
                let end = rng.random_range(start + 1..=length);
                Interval { start, end, val: () }
            })
            .collect();
        let aligned: u64 = intervals.iter().map(|i| (i.end - i.start) as u64).sum();

        let options = SummaryOptions::default();
        let summaries: Vec<_> = summarize("ctg", length, intervals, width, &options)
            .unwrap()
            .collect();

        let covered: f64 = summaries.iter().map(|s| s.mean * s.width() as f64).sum();
        assert!((covered - aligned as f64).abs() < 1e-6 * (aligned as f64 + 1.0));

        for summary in summaries.iter() {
            assert!(summary.n_gaps <= summary.tot_gaps);
            assert!(summary.tot_gaps <= summary.width());
            assert!(summary.cov2.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}

#[rstest]
fn test_many_contigs_respect_region_ceiling() {
    let references: Vec<ReferenceIntervals> = (0..300)
        .map(|i| ReferenceIntervals::new(format!("contig{i}"), 1_000 + 37 * i))
        .collect();
    let config = SummarizeConfig {
        target_region_count: 2000,
        max_total_regions: 400,
        threads: 4,
        ..SummarizeConfig::default()
    };

    let summary = summarize_references(references, &config).unwrap();
    let total: usize = summary.references.iter().map(|r| r.regions.len()).sum();

    assert_eq!(summary.references.len(), 300);
    assert!(total <= 400, "{total} regions");
    assert_eq!(summary.references[0].name, "contig0");
    assert_eq!(summary.references[299].name, "contig299");
}
