use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use log::{debug, warn};

use crate::models::ReferenceIntervals;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, or '-' for stdin
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path_str == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        get_dynamic_reader(Path::new(file_path_str))
    }
}

/// Lines that carry no interval: blanks, comments and UCSC track/browser lines.
fn is_header_line(line: &str) -> bool {
    line.trim().is_empty()
        || line.starts_with('#')
        || line.starts_with("track")
        || line.starts_with("browser")
}

///
/// Parse one line of a BED-like file into `(chr, start, end)`. Columns past
/// the third are ignored. Header lines yield `Ok(None)`.
///
pub fn parse_bedlike_line(line: &str) -> Result<Option<(String, u32, u32)>> {
    if is_header_line(line) {
        return Ok(None);
    }

    let mut fields = line.split('\t');

    let chr = fields
        .next()
        .ok_or_else(|| anyhow::anyhow!("Missing chromosome field"))?;
    let start = fields
        .next()
        .ok_or_else(|| anyhow::anyhow!("Missing start field in line: {}", line))?
        .trim()
        .parse::<u32>()
        .with_context(|| format!("Failed to parse start position in line: {}", line))?;
    let end = fields
        .next()
        .ok_or_else(|| anyhow::anyhow!("Missing end field in line: {}", line))?
        .trim()
        .parse::<u32>()
        .with_context(|| format!("Failed to parse end position in line: {}", line))?;

    Ok(Some((chr.to_string(), start, end)))
}

///
/// Read a reference sizes file (`name length` per line, whitespace separated).
/// File order is kept, it decides the output order of references.
///
pub fn read_reference_sizes<T: AsRef<Path>>(path: T) -> Result<Vec<(String, u32)>> {
    let reader = get_dynamic_reader(path.as_ref())?;
    let mut sizes = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if is_header_line(&line) {
            continue;
        }

        let mut parts = line.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("Missing reference name on line {}", lineno + 1))?;
        let length = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("Missing reference length on line {}", lineno + 1))?
            .parse::<u32>()
            .with_context(|| format!("Failed to parse reference length on line {}", lineno + 1))?;

        sizes.push((name.to_string(), length));
    }

    if sizes.is_empty() {
        anyhow::bail!("No references found in sizes file: {:?}", path.as_ref());
    }

    Ok(sizes)
}

///
/// Group the intervals of a BED-like file by reference.
///
/// References come back in the order of `sizes`, including the ones with no
/// intervals at all. Intervals on references missing from `sizes` are dropped.
/// Coordinates are taken as-is, validation is left to the consumer.
///
/// # Arguments
///
/// - file_path: BED-like file, gzipped or not, or '-' for stdin
/// - sizes: reference names and lengths, see [`read_reference_sizes`]
///
pub fn read_reference_intervals(
    file_path: &str,
    sizes: &[(String, u32)],
) -> Result<Vec<ReferenceIntervals>> {
    let mut references: Vec<ReferenceIntervals> = sizes
        .iter()
        .map(|(name, length)| ReferenceIntervals::new(name.clone(), *length))
        .collect();
    let index: HashMap<&str, usize> = sizes
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (name.as_str(), i))
        .collect();

    let reader = get_dynamic_reader_w_stdin(file_path)?;
    let mut dropped: HashMap<String, usize> = HashMap::new();
    let mut total = 0usize;

    for line in reader.lines() {
        let line = line?;
        let Some((chr, start, end)) = parse_bedlike_line(&line)? else {
            continue;
        };

        match index.get(chr.as_str()) {
            Some(&i) => {
                references[i].push(start, end);
                total += 1;
            }
            None => *dropped.entry(chr).or_default() += 1,
        }
    }

    for (chr, count) in dropped.iter() {
        warn!("Dropped {count} intervals on unknown reference {chr}");
    }
    debug!(
        "Read {total} intervals over {} references from {file_path}",
        references.len()
    );

    Ok(references)
}
