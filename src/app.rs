//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the dataset
//! - renders the static chart set
//! - serves the dashboard
//! - generates synthetic sample data

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{ChartsArgs, Command, SampleArgs, ServeArgs};
use crate::domain::{ChartConfig, ServeConfig};
use crate::error::AppError;

/// Entry point for the `salesviz` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `salesviz` (or `salesviz -d data.csv`) to behave like
    // `salesviz charts ...`. Clap requires a subcommand name, so we do a
    // small, explicit rewrite of the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Charts(args) => handle_charts(args),
        Command::Serve(args) => handle_serve(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_charts(args: ChartsArgs) -> Result<(), AppError> {
    let config = ChartConfig {
        data_path: args.data,
        out_dir: args.out_dir,
        bubble_scale: args.bubble_scale,
        width: args.width,
        height: args.height,
    };

    let ingested = crate::io::ingest::load_dataset(&config.data_path)?;
    let artifacts = crate::charts::render_static_set(&ingested.dataset, &config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&ingested.stats, &artifacts, &config.out_dir)
    );
    Ok(())
}

fn handle_serve(args: ServeArgs) -> Result<(), AppError> {
    init_logging();

    let config = ServeConfig {
        data_path: args.data,
        addr: args.addr,
        port: args.port,
    };

    let ingested = crate::io::ingest::load_dataset(&config.data_path)?;
    info!(
        rows = ingested.stats.rows_read,
        vehicle_types = ingested.stats.vehicle_types.len(),
        "dataset loaded"
    );

    crate::dashboard::serve(&ingested.dataset, &config)
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = crate::data::SampleConfig {
        seed: args.seed,
        year_start: args.year_start,
        year_end: args.year_end,
    };
    let dataset = crate::data::generate_sample(&config)?;
    crate::data::write_sample_csv(&args.out, &dataset)?;

    println!("Wrote {} rows to {}", dataset.len(), args.out.display());
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Rewrite argv so `salesviz` defaults to `salesviz charts`.
///
/// Rules:
/// - `salesviz`                     -> `salesviz charts`
/// - `salesviz -d data.csv ...`     -> `salesviz charts -d data.csv ...`
/// - `salesviz --help/--version`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("charts".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "charts" | "serve" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "charts flags".
    if arg1.starts_with('-') {
        argv.insert(1, "charts".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_charts() {
        assert_eq!(rewrite_args(args(&["salesviz"])), args(&["salesviz", "charts"]));
    }

    #[test]
    fn leading_flag_defaults_to_charts() {
        assert_eq!(
            rewrite_args(args(&["salesviz", "-d", "x.csv"])),
            args(&["salesviz", "charts", "-d", "x.csv"])
        );
    }

    #[test]
    fn explicit_subcommands_pass_through() {
        assert_eq!(
            rewrite_args(args(&["salesviz", "serve", "-p", "8000"])),
            args(&["salesviz", "serve", "-p", "8000"])
        );
        assert_eq!(rewrite_args(args(&["salesviz", "--help"])), args(&["salesviz", "--help"]));
    }
}
