//! Sprout CLI binary.
//!
//! Cleans a growth CSV, fits the growth regressions and writes the report
//! directory in one run.

use clap::Parser;
use sprout::{DEFAULT_INPUT, DEFAULT_OUTPUT_DIR, PipelineConfig};
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sprout")]
#[command(about = "Generate growth regression and business reports", long_about = None)]
struct Cli {
    /// Path to input CSV file
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Directory to write generated reports into
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Log to stderr so stdout only carries the result line. `RUST_LOG`
/// overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");

    let config = PipelineConfig::new(cli.input, cli.output_dir);
    let summary = sprout::run(&config)?;

    println!("Wrote reports to: {}", summary.output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sprout"]).unwrap();
        assert_eq!(cli.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(cli.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "sprout",
            "--input",
            "your.csv",
            "--output-dir",
            "custom-reports",
        ])
        .unwrap();
        assert_eq!(cli.input, PathBuf::from("your.csv"));
        assert_eq!(cli.output_dir, PathBuf::from("custom-reports"));
    }

    #[test]
    fn test_only_path_flags() {
        let err = Cli::try_parse_from(["sprout", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
        assert!(Cli::try_parse_from(["sprout", "-V"]).is_err());

        let command = Cli::command();
        let flags: Vec<_> = command
            .get_arguments()
            .filter_map(|arg| arg.get_long())
            .filter(|long| *long != "help")
            .collect();
        assert_eq!(flags, ["input", "output-dir"]);
    }
}
