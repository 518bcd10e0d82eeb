/// Mean depth. `0.0` for an empty array.
pub fn mean(coverage: &[u32]) -> f64 {
    if coverage.is_empty() {
        return 0.0;
    }
    let total: u64 = coverage.iter().map(|&depth| depth as u64).sum();
    total as f64 / coverage.len() as f64
}

/// Population standard deviation of the depth. `0.0` for an empty array.
pub fn stddev(coverage: &[u32]) -> f64 {
    if coverage.is_empty() {
        return 0.0;
    }
    let mu = mean(coverage);
    let variance = coverage
        .iter()
        .map(|&depth| {
            let diff = depth as f64 - mu;
            diff * diff
        })
        .sum::<f64>()
        / coverage.len() as f64;
    variance.sqrt()
}

///
/// `n_samples` nearest-rank percentiles spread evenly over `0..=100`.
///
/// Three samples give the minimum, median and maximum; a single sample is the
/// median. The output is non-decreasing. Empty coverage gives an empty vector.
///
pub fn percentile_samples(coverage: &[u32], n_samples: usize) -> Vec<u32> {
    if coverage.is_empty() || n_samples == 0 {
        return Vec::new();
    }

    let mut sorted = coverage.to_vec();
    sorted.sort_unstable();
    let last = (sorted.len() - 1) as f64;

    (0..n_samples)
        .map(|i| {
            let fraction = if n_samples == 1 {
                0.5
            } else {
                i as f64 / (n_samples - 1) as f64
            };
            sorted[(fraction * last).round() as usize]
        })
        .collect()
}
