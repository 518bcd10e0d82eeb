use indicatif::ProgressBar;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use covsum_core::models::{Interval, ReferenceIntervals, Region};
use covsum_overlaprs::{IntervalTree, Overlapper};

use crate::config::{DEFAULT_COV2_SAMPLES, InvalidReferencePolicy, SummarizeConfig};
use crate::errors::{CoverageError, CoverageResult};
use crate::gaps::analyze_gaps;
use crate::projection::{CoverageProjector, ProjectionMethod};
use crate::sizing::choose_region_width;
use crate::stats::{mean, percentile_samples, stddev};

/// Coverage summary of one region of one reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub reference: String,
    pub region_start: u32,
    pub region_end: u32,
    pub mean: f64,
    pub stddev: f64,
    /// Evenly spaced percentile samples of the depth, lowest first
    pub cov2: Vec<u32>,
    pub n_gaps: u32,
    pub tot_gaps: u32,
}

impl RegionSummary {
    pub fn width(&self) -> u32 {
        self.region_end - self.region_start
    }

    pub fn region(&self) -> Region {
        Region {
            chr: self.reference.clone(),
            start: self.region_start,
            end: self.region_end,
        }
    }
}

/// Per-region statistics settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    pub cov2_samples: usize,
    pub projection: ProjectionMethod,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        SummaryOptions {
            cov2_samples: DEFAULT_COV2_SAMPLES,
            projection: ProjectionMethod::default(),
        }
    }
}

///
/// The regions tiling `[0, length)`, left to right, as `(start, end)` pairs.
///
/// Every region is `width` wide except the last, which stops at `length`.
///
#[derive(Debug, Clone)]
pub struct Regions {
    length: u32,
    width: u32,
    next: u32,
}

impl Iterator for Regions {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.length {
            return None;
        }
        let start = self.next;
        let end = start.saturating_add(self.width).min(self.length);
        self.next = end;
        Some((start, end))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.length - self.next).div_ceil(self.width) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Regions {}

///
/// Regions of `region_width` over a reference of `reference_length`.
/// A zero-length reference has no regions.
///
pub fn region_bounds(reference_length: u32, region_width: u32) -> CoverageResult<Regions> {
    if region_width == 0 {
        return Err(CoverageError::ZeroRegionWidth);
    }
    Ok(Regions {
        length: reference_length,
        width: region_width,
        next: 0,
    })
}

/// Lazy stream of [`RegionSummary`] records for one reference, created by [`summarize`].
pub struct RegionSummaries<T>
where
    T: Eq + Clone + Send + Sync,
{
    reference: String,
    tree: IntervalTree<u32, T>,
    regions: Regions,
    projector: CoverageProjector,
    options: SummaryOptions,
}

impl<T> Iterator for RegionSummaries<T>
where
    T: Eq + Clone + Send + Sync,
{
    type Item = RegionSummary;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, end) = self.regions.next()?;

        let coverage = self
            .projector
            .project_valid(self.tree.iter_find(start, end), start, end);
        let gaps = analyze_gaps(coverage);

        Some(RegionSummary {
            reference: self.reference.clone(),
            region_start: start,
            region_end: end,
            mean: mean(coverage),
            stddev: stddev(coverage),
            cov2: percentile_samples(coverage, self.options.cov2_samples),
            n_gaps: gaps.n_gaps,
            tot_gaps: gaps.tot_gaps,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.regions.size_hint()
    }
}

impl<T> ExactSizeIterator for RegionSummaries<T> where T: Eq + Clone + Send + Sync {}

///
/// Summarize the coverage of one reference, region by region.
///
/// Everything is validated before the first region is produced: the reference
/// must have a positive length, the width must be positive and every interval
/// must satisfy `start < end`. Intervals running past `reference_length` are
/// clipped to it. The returned iterator then cannot fail.
///
/// # Arguments
/// - reference: name copied into every record
/// - reference_length: length of the reference, regions tile `[0, reference_length)`
/// - intervals: alignments on this reference, in any order, duplicates allowed
/// - region_width: width of every region but the last
/// - options: per-region statistics settings
///
pub fn summarize<T>(
    reference: &str,
    reference_length: u32,
    mut intervals: Vec<Interval<u32, T>>,
    region_width: u32,
    options: &SummaryOptions,
) -> CoverageResult<RegionSummaries<T>>
where
    T: Eq + Clone + Send + Sync,
{
    if reference_length == 0 {
        return Err(CoverageError::ZeroLengthReference {
            reference: reference.to_string(),
        });
    }
    let regions = region_bounds(reference_length, region_width)?;

    let mut clipped = 0usize;
    for interval in intervals.iter_mut() {
        interval.validate()?;
        if interval.end > reference_length {
            interval.end = reference_length;
            clipped += 1;
        }
    }
    // intervals starting at or past the reference end are now empty
    intervals.retain(|interval| interval.start < interval.end);
    if clipped > 0 {
        warn!(
            "{reference}: clipped {clipped} intervals extending past position {reference_length}"
        );
    }

    debug!(
        "Summarizing {reference}: {} intervals over {} regions of width {region_width}",
        intervals.len(),
        regions.len()
    );

    let tree = IntervalTree::build(intervals);
    let projector = CoverageProjector::with_capacity(
        options.projection,
        region_width.min(reference_length) as usize,
    );

    Ok(RegionSummaries {
        reference: reference.to_string(),
        tree,
        regions,
        projector,
        options: options.clone(),
    })
}

/// All region summaries of one reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceSummary {
    pub name: String,
    pub length: u32,
    pub regions: Vec<RegionSummary>,
}

/// Region summaries of a whole run, references in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenomeSummary {
    pub region_width: u32,
    pub references: Vec<ReferenceSummary>,
}

/// Collect the summaries of one reference with an already chosen width.
pub fn summarize_reference(
    reference: ReferenceIntervals,
    region_width: u32,
    options: &SummaryOptions,
) -> CoverageResult<ReferenceSummary> {
    let regions = summarize(
        &reference.name,
        reference.length,
        reference.intervals,
        region_width,
        options,
    )?
    .collect();

    Ok(ReferenceSummary {
        name: reference.name,
        length: reference.length,
        regions,
    })
}

///
/// Summarize every reference of a run.
///
/// The region width is chosen once for all references, then each reference is
/// summarized independently on a rayon pool of `config.threads` workers. Output
/// order follows input order. A reference failing validation either aborts the
/// run or is left out, depending on `config.on_invalid_reference`.
///
pub fn summarize_references(
    references: Vec<ReferenceIntervals>,
    config: &SummarizeConfig,
) -> CoverageResult<GenomeSummary> {
    let references: Vec<ReferenceIntervals> = match config.on_invalid_reference {
        InvalidReferencePolicy::Abort => references,
        InvalidReferencePolicy::Skip => references
            .into_iter()
            .filter(|reference| {
                if reference.length == 0 {
                    warn!("Skipping reference {}: zero length", reference.name);
                }
                reference.length > 0
            })
            .collect(),
    };

    let lengths: Vec<u32> = references.iter().map(|reference| reference.length).collect();
    let region_width = choose_region_width(
        &lengths,
        config.target_region_count,
        config.region_width,
        config.max_total_regions,
    )?;

    info!(
        "Summarizing {} references with region width {region_width}",
        references.len()
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .map_err(|err| CoverageError::ThreadPool(err.to_string()))?;

    let bar = match config.progress {
        true => ProgressBar::new(references.len() as u64),
        false => ProgressBar::hidden(),
    };
    let options = config.summary_options();

    let results: Vec<(String, CoverageResult<ReferenceSummary>)> = pool.install(|| {
        references
            .into_par_iter()
            .map(|reference| {
                let name = reference.name.clone();
                let result = summarize_reference(reference, region_width, &options);
                bar.inc(1);
                (name, result)
            })
            .collect()
    });
    bar.finish_and_clear();

    let mut summaries = Vec::with_capacity(results.len());
    for (name, result) in results {
        match (result, config.on_invalid_reference) {
            (Ok(summary), _) => summaries.push(summary),
            (Err(err), InvalidReferencePolicy::Skip) => {
                warn!("Skipping reference {name}: {err}");
            }
            (Err(err), InvalidReferencePolicy::Abort) => return Err(err),
        }
    }

    Ok(GenomeSummary {
        region_width,
        references: summaries,
    })
}
