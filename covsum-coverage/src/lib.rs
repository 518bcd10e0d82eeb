//! Per-region coverage summaries over read alignments.
//!
//! Given the alignment intervals of each reference, the references are cut into
//! regions of one shared width and every region gets its mean depth, a few depth
//! percentiles and its gap (zero-coverage run) statistics.
//!
//! ```rust
//! use covsum_core::models::Interval;
//! use covsum_coverage::{SummaryOptions, summarize};
//!
//! let reads = vec![
//!     Interval { start: 50u32, end: 55, val: () },
//!     Interval { start: 75, end: 80, val: () },
//! ];
//!
//! let summaries: Vec<_> = summarize("chr1", 100, reads, 100, &SummaryOptions::default())
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(summaries.len(), 1);
//! assert_eq!((summaries[0].n_gaps, summaries[0].tot_gaps), (3, 90));
//! ```
pub mod config;
pub mod errors;
pub mod gaps;
pub mod projection;
pub mod sizing;
pub mod stats;
pub mod summarize;

// re-exports
pub use self::config::{InvalidReferencePolicy, SummarizeConfig};
pub use self::errors::{CoverageError, SizingError};
pub use self::gaps::{GapStats, analyze_gaps};
pub use self::projection::{
    CoverageProjector, ProjectionMethod, project_coverage, project_coverage_sweep,
};
pub use self::sizing::choose_region_width;
pub use self::summarize::{
    GenomeSummary, ReferenceSummary, RegionSummary, SummaryOptions, region_bounds, summarize,
    summarize_references,
};
