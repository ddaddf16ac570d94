//! k2patch - add Kotlin K1/K2 plugin mode support to a CodeLocator plugin zip

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use k2patch::{patch_archive, PatchConfig, PatchReport};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "k2patch", version)]
#[command(
    about = "Patch plugin.xml inside the CodeLocatorPlugin jar of a plugin zip",
    long_about = None
)]
struct Cli {
    /// Absolute path of the plugin zip
    #[arg(value_name = "ZIP")]
    archive: Option<PathBuf>,

    /// Absolute path of the plugin zip (alternative to the positional argument)
    #[arg(long = "zip", value_name = "ZIP", conflicts_with = "archive")]
    zip: Option<PathBuf>,

    /// TOML file overriding the default patch settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail if plugin.xml has no closing </idea-plugin> tag
    #[arg(long)]
    strict: bool,

    /// Fail if more than one jar matches the plugin jar pattern
    #[arg(long)]
    unique: bool,

    /// Log every copied and patched entry
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let Some(archive) = cli.archive.as_deref().or(cli.zip.as_deref()) else {
        println!("Please pass the absolute path of the plugin zip, e.g. k2patch /path/to/plugin.zip");
        println!();
        println!("{}", Cli::command().render_usage());
        return ExitCode::SUCCESS;
    };

    match run(&cli, archive) {
        Ok(report) => {
            println!("{}", report.output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, archive: &Path) -> Result<PatchReport> {
    let mut config = match &cli.config {
        Some(path) => PatchConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PatchConfig::default(),
    };
    config.require_closing_tag |= cli.strict;
    config.require_unique_jar |= cli.unique;

    patch_archive(archive, &config)
        .with_context(|| format!("failed to patch {}", archive.display()))
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    let filter = if cli.verbose || cli.quiet {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_zip_flag_and_positional_conflict() {
        let result = Cli::try_parse_from(["k2patch", "a.zip", "--zip", "b.zip"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from(["k2patch", "--zip", "/x/a.zip", "--strict", "-v"]).unwrap();
        assert_eq!(cli.zip, Some(PathBuf::from("/x/a.zip")));
        assert!(cli.archive.is_none());
        assert!(cli.strict);
        assert!(cli.verbose);
        assert!(!cli.unique);
    }
}
