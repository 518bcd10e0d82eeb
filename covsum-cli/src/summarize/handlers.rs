use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{LevelFilter, info};

use covsum_core::utils::{read_reference_intervals, read_reference_sizes};
use covsum_coverage::{InvalidReferencePolicy, SummarizeConfig, summarize_references};

use super::output::{OutputFormat, write_gff, write_json};

/// Matches items from CLAP args before running the summarization
pub fn run_summarize(matches: &ArgMatches) -> Result<()> {
    init_logging(matches.get_count("verbose"));

    let intervals_file = matches
        .get_one::<String>("intervals")
        .context("A path to an intervals file is required.")?;
    let sizes_file = matches
        .get_one::<String>("sizes")
        .context("A path to a reference sizes file is required.")?;
    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("gff")
        .parse()?;

    let config = build_config(matches)?;

    let sizes = read_reference_sizes(sizes_file)?;
    let references = read_reference_intervals(intervals_file, &sizes)?;
    let summary = summarize_references(references, &config)?;

    let out: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(path) if path != "-" => Box::new(
            File::create(path).with_context(|| format!("Failed to create output file: {path}"))?,
        ),
        _ => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(out);

    match format {
        OutputFormat::Gff => {
            let command_line = std::env::args().collect::<Vec<_>>().join(" ");
            write_gff(&mut writer, &summary, &command_line)?;
        }
        OutputFormat::Json => write_json(&mut writer, &summary)?,
    }
    writer.flush()?;

    info!(
        "Wrote {} regions over {} references",
        summary
            .references
            .iter()
            .map(|reference| reference.regions.len())
            .sum::<usize>(),
        summary.references.len()
    );

    Ok(())
}

/// Settings from `--config` (or the defaults), overridden by explicit flags.
fn build_config(matches: &ArgMatches) -> Result<SummarizeConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => SummarizeConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config file: {path}"))?,
        None => SummarizeConfig::default(),
    };

    if let Some(width) = matches.get_one::<u32>("region-width") {
        config.region_width = Some(*width);
    }
    if let Some(target) = matches.get_one::<u32>("num-regions") {
        config.target_region_count = *target;
    }
    if let Some(max) = matches.get_one::<u32>("max-regions") {
        config.max_total_regions = *max;
    }
    if let Some(threads) = matches.get_one::<usize>("threads") {
        config.threads = *threads;
    }
    if matches.get_flag("skip-invalid") {
        config.on_invalid_reference = InvalidReferencePolicy::Skip;
    }
    if matches.get_flag("progress") {
        config.progress = true;
    }

    Ok(config)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    // a logger may already be installed when run from tests
    let _ = env_logger::Builder::new().filter_level(level).try_init();
}
