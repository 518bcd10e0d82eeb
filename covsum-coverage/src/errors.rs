use thiserror::Error;

use covsum_core::errors::IntervalError;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SizingError {
    #[error("No reference lengths given")]
    NoReferences,

    #[error("Reference at index {index} has zero length")]
    ZeroLengthReference { index: usize },

    #[error("Target region count must be positive")]
    ZeroTargetRegionCount,

    #[error("Maximum total region count must be positive")]
    ZeroMaxTotalRegions,

    #[error(
        "{n_references} references need at least one region each, more than the maximum of {max_total_regions}"
    )]
    TooManyReferences {
        n_references: usize,
        max_total_regions: u32,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoverageError {
    #[error(transparent)]
    Interval(#[from] IntervalError),

    #[error(transparent)]
    Sizing(#[from] SizingError),

    #[error("Region is inverted: start={start}, end={end}")]
    InvertedRegion { start: u32, end: u32 },

    #[error("Reference {reference} has zero length")]
    ZeroLengthReference { reference: String },

    #[error("Region width must be positive")]
    ZeroRegionWidth,

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}

pub type CoverageResult<T> = std::result::Result<T, CoverageError>;
