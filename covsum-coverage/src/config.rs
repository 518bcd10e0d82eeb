use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::projection::ProjectionMethod;
use crate::sizing::{DEFAULT_MAX_TOTAL_REGIONS, DEFAULT_TARGET_REGION_COUNT};
use crate::summarize::SummaryOptions;

/// Default number of percentile samples in `cov2`: min, median, max.
pub const DEFAULT_COV2_SAMPLES: usize = 3;

/// What a multi-reference run does with a reference that fails validation.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvalidReferencePolicy {
    /// Stop the whole run on the first invalid reference.
    #[default]
    Abort,
    /// Log the problem and leave the reference out of the output.
    Skip,
}

///
/// Settings of a coverage summarization run.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// target_region_count = 1000
/// projection = "naive"
/// on_invalid_reference = "skip"
/// ```
///
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct SummarizeConfig {
    /// Number of regions to aim for across all references.
    pub target_region_count: u32,
    /// Fixed region width. `None` or `0` lets the sizer choose.
    pub region_width: Option<u32>,
    /// Hard ceiling on the number of regions across all references.
    pub max_total_regions: u32,
    pub cov2_samples: usize,
    pub projection: ProjectionMethod,
    /// Worker threads; `0` lets rayon decide.
    pub threads: usize,
    pub on_invalid_reference: InvalidReferencePolicy,
    pub progress: bool,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        SummarizeConfig {
            target_region_count: DEFAULT_TARGET_REGION_COUNT,
            region_width: None,
            max_total_regions: DEFAULT_MAX_TOTAL_REGIONS,
            cov2_samples: DEFAULT_COV2_SAMPLES,
            projection: ProjectionMethod::default(),
            threads: 1,
            on_invalid_reference: InvalidReferencePolicy::default(),
            progress: false,
        }
    }
}

impl SummarizeConfig {
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            cov2_samples: self.cov2_samples,
            projection: self.projection,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl TryFrom<&Path> for SummarizeConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> ConfigResult<Self> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}
