use clap::{Arg, ArgAction, Command, arg};

pub const SUMMARIZE_CMD: &str = "summarize";

/// Creates the summarize CLI Command object
pub fn create_summarize_cli() -> Command {
    Command::new(SUMMARIZE_CMD)
        .author("Databio")
        .about("Summarize per-region coverage of a BED-like file of alignment intervals")
        .arg_required_else_help(true)
        .arg(
            arg!(-i --intervals <intervals> "BED-like file of alignment intervals, gzipped or '-' for stdin")
                .required(true),
        )
        .arg(
            arg!(-s --sizes <sizes> "Reference sizes file, one 'name length' pair per line")
                .required(true),
        )
        .arg(arg!(-o --output <output> "Where to write the summary (defaults to stdout)"))
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .value_parser(["gff", "json"])
                .default_value("gff")
                .help("Output format"),
        )
        .arg(arg!(-c --config <config> "TOML file with summarization settings"))
        .arg(
            Arg::new("region-width")
                .long("region-width")
                .short('w')
                .value_parser(clap::value_parser!(u32))
                .help("Fixed region width; 0 picks one automatically"),
        )
        .arg(
            Arg::new("num-regions")
                .long("num-regions")
                .short('n')
                .value_parser(clap::value_parser!(u32))
                .help("Number of regions to aim for across all references"),
        )
        .arg(
            Arg::new("max-regions")
                .long("max-regions")
                .value_parser(clap::value_parser!(u32))
                .help("Upper bound on the number of regions across all references"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('t')
                .value_parser(clap::value_parser!(usize))
                .help("Number of worker threads (0 uses every core)"),
        )
        .arg(
            Arg::new("skip-invalid")
                .long("skip-invalid")
                .help("Skip invalid references instead of aborting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .help("Show a progress bar")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase logging verbosity (-v info, -vv debug)")
                .action(ArgAction::Count),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_defaults_and_flags() {
        let matches = create_summarize_cli()
            .try_get_matches_from([
                SUMMARIZE_CMD,
                "-i",
                "reads.bed.gz",
                "-s",
                "genome.sizes",
                "--region-width",
                "1000",
                "--skip-invalid",
                "-vv",
            ])
            .unwrap();

        assert_eq!(matches.get_one::<String>("intervals").unwrap(), "reads.bed.gz");
        assert_eq!(matches.get_one::<String>("format").unwrap(), "gff");
        assert_eq!(matches.get_one::<u32>("region-width"), Some(&1000));
        assert_eq!(matches.get_one::<u32>("num-regions"), None);
        assert!(matches.get_flag("skip-invalid"));
        assert!(!matches.get_flag("progress"));
        assert_eq!(matches.get_count("verbose"), 2);
    }

    #[rstest]
    #[case(&[SUMMARIZE_CMD, "-s", "genome.sizes"])]
    #[case(&[SUMMARIZE_CMD, "-i", "reads.bed", "-s", "genome.sizes", "--format", "wig"])]
    #[case(&[SUMMARIZE_CMD, "-i", "reads.bed", "-s", "genome.sizes", "--threads", "many"])]
    fn test_bad_invocations_are_rejected(#[case] args: &[&str]) {
        assert!(create_summarize_cli().try_get_matches_from(args).is_err());
    }
}
