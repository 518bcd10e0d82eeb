mod summarize;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "covsum";
    pub const BIN_NAME: &str = "covsum";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Summarize read coverage, depth percentiles and gaps over fixed-width regions of a reference.")
        .subcommand_required(true)
        .subcommand(summarize::cli::create_summarize_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // SUMMARIZE
        //
        Some((summarize::cli::SUMMARIZE_CMD, matches)) => {
            summarize::handlers::run_summarize(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_is_well_formed() {
        build_parser().debug_assert();
    }
}
