use log::debug;

use crate::errors::SizingError;

/// Regions to aim for across a whole run when the caller has no preference.
pub const DEFAULT_TARGET_REGION_COUNT: u32 = 500;

/// Ceiling on the regions of a whole run, bounds output size for many-contig assemblies.
pub const DEFAULT_MAX_TOTAL_REGIONS: u32 = 40_000;

/// Leading digits of a pretty width, `d × 10^k`.
const PRETTY_DIGITS: [u64; 3] = [1, 2, 5];

/// Smallest pretty value (`1`, `2` or `5` times a power of ten) that is `>= n`.
///
/// `0` rounds to `1`.
pub fn pretty_ceil(n: u64) -> u64 {
    let n = n.max(1);
    let mut scale: u64 = 1;
    loop {
        for digit in PRETTY_DIGITS {
            let candidate = digit.saturating_mul(scale);
            if candidate >= n {
                return candidate;
            }
        }
        scale = scale.saturating_mul(10);
    }
}

/// The pretty value following `width`.
pub fn next_pretty(width: u64) -> u64 {
    pretty_ceil(width.saturating_add(1))
}

/// Number of regions of `width` needed to tile every reference.
pub fn count_regions(reference_lengths: &[u32], width: u64) -> u64 {
    let width = width.max(1);
    reference_lengths
        .iter()
        .map(|&length| (length as u64).div_ceil(width))
        .sum()
}

///
/// Pick the region width shared by every reference of a run.
///
/// A non-zero `user_override` is returned as given. Otherwise the width is
/// `total_length / target_region_count` rounded up to a pretty value, then
/// widened (pretty value by pretty value) until the regions of all references
/// together fit in `max_total_regions`.
///
/// # Arguments
/// - reference_lengths: length of every reference in the run
/// - target_region_count: number of regions to aim for, across all references
/// - user_override: explicit width; `None` or `Some(0)` lets this function choose
/// - max_total_regions: hard ceiling on the number of regions across all references
///
/// # Returns
/// - a strictly positive width, or the input that made one impossible
///
pub fn choose_region_width(
    reference_lengths: &[u32],
    target_region_count: u32,
    user_override: Option<u32>,
    max_total_regions: u32,
) -> Result<u32, SizingError> {
    if let Some(width) = user_override.filter(|&width| width > 0) {
        debug!("Using region width {width} from user override");
        return Ok(width);
    }

    if reference_lengths.is_empty() {
        return Err(SizingError::NoReferences);
    }
    if let Some(index) = reference_lengths.iter().position(|&length| length == 0) {
        return Err(SizingError::ZeroLengthReference { index });
    }
    if target_region_count == 0 {
        return Err(SizingError::ZeroTargetRegionCount);
    }
    if max_total_regions == 0 {
        return Err(SizingError::ZeroMaxTotalRegions);
    }
    // one region per reference is the floor no width can go below
    if reference_lengths.len() as u64 > max_total_regions as u64 {
        return Err(SizingError::TooManyReferences {
            n_references: reference_lengths.len(),
            max_total_regions,
        });
    }

    let total_length: u64 = reference_lengths.iter().map(|&length| length as u64).sum();
    let mut width = pretty_ceil(total_length.div_ceil(target_region_count as u64));

    while count_regions(reference_lengths, width) > max_total_regions as u64 {
        width = next_pretty(width);
    }

    debug!(
        "Chose region width {width} for {} references ({total_length} bp, {} regions)",
        reference_lengths.len(),
        count_regions(reference_lengths, width)
    );

    // past u32::MAX every reference is a single region anyway
    Ok(u32::try_from(width).unwrap_or(u32::MAX))
}
