use std::io::Write;
use std::str::FromStr;

use anyhow::Result;

use covsum_coverage::{GenomeSummary, RegionSummary};

use crate::consts::{PKG_NAME, VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Gff,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gff" | "gff3" => Ok(OutputFormat::Gff),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow::anyhow!(
                "Invalid output format: {}. Valid options are 'gff' or 'json'",
                s
            )),
        }
    }
}

/// One GFF3 feature line, 1-based inclusive coordinates.
fn gff_feature_line(summary: &RegionSummary) -> String {
    let region = summary.region();
    let cov2 = summary
        .cov2
        .iter()
        .map(|depth| depth.to_string())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{}\t.\tregion\t{}\t{}\t0.00\t+\t.\tcov={:.2};cov2={};stddev={:.2};gaps={},{}",
        region.chr,
        region.start + 1,
        region.end,
        summary.mean,
        cov2,
        summary.stddev,
        summary.n_gaps,
        summary.tot_gaps
    )
}

///
/// Write a summary as GFF3: version and provenance headers, one
/// `##sequence-region` directive per reference, then one `region` feature per
/// region with its statistics in the attributes column.
///
pub fn write_gff<W: Write>(
    writer: &mut W,
    summary: &GenomeSummary,
    command_line: &str,
) -> Result<()> {
    writeln!(writer, "##gff-version 3")?;
    writeln!(writer, "##source {PKG_NAME} {VERSION}")?;
    writeln!(writer, "##source-commandline {command_line}")?;

    for reference in summary.references.iter() {
        writeln!(
            writer,
            "##sequence-region {} 1 {}",
            reference.name, reference.length
        )?;
    }

    for reference in summary.references.iter() {
        for region in reference.regions.iter() {
            writeln!(writer, "{}", gff_feature_line(region))?;
        }
    }

    Ok(())
}

/// Write a summary as a single pretty-printed JSON document.
pub fn write_json<W: Write>(writer: &mut W, summary: &GenomeSummary) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use covsum_core::models::ReferenceIntervals;
    use covsum_coverage::{SummarizeConfig, summarize_references};

    #[fixture]
    fn summary() -> GenomeSummary {
        let mut chr1 = ReferenceIntervals::new("chr1".to_string(), 100);
        chr1.push(50, 55);
        chr1.push(75, 80);
        let config = SummarizeConfig {
            region_width: Some(100),
            ..SummarizeConfig::default()
        };
        summarize_references(vec![chr1], &config).unwrap()
    }

    #[rstest]
    fn test_gff_output(summary: GenomeSummary) {
        let mut buffer = Vec::new();
        write_gff(&mut buffer, &summary, "covsum summarize -i reads.bed -s genome.sizes").unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "##gff-version 3".to_string(),
                format!("##source covsum {VERSION}"),
                "##source-commandline covsum summarize -i reads.bed -s genome.sizes".to_string(),
                "##sequence-region chr1 1 100".to_string(),
                "chr1\t.\tregion\t1\t100\t0.00\t+\t.\tcov=0.10;cov2=0,0,1;stddev=0.30;gaps=3,90"
                    .to_string(),
            ]
        );
    }

    #[rstest]
    fn test_json_output(summary: GenomeSummary) {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["region_width"], 100);
        assert_eq!(value["references"][0]["name"], "chr1");
        assert_eq!(value["references"][0]["length"], 100);

        let region = &value["references"][0]["regions"][0];
        assert_eq!(region["region_start"], 0);
        assert_eq!(region["region_end"], 100);
        assert_eq!(region["n_gaps"], 3);
        assert_eq!(region["tot_gaps"], 90);
        assert_eq!(region["cov2"], serde_json::json!([0, 0, 1]));
    }

    #[rstest]
    #[case("gff", OutputFormat::Gff)]
    #[case("gff3", OutputFormat::Gff)]
    #[case("json", OutputFormat::Json)]
    fn test_output_format_parsing(#[case] input: &str, #[case] expected: OutputFormat) {
        assert_eq!(input.parse::<OutputFormat>().unwrap(), expected);
    }

    #[rstest]
    fn test_unknown_output_format() {
        assert!("wig".parse::<OutputFormat>().is_err());
    }
}
