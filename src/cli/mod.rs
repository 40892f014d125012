//! Command-line parsing for the automobile sales charting tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the aggregation/charting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "salesviz", version, about = "Automobile sales charts and dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the static chart set to SVG files.
    Charts(ChartsArgs),
    /// Serve the interactive dashboard over HTTP.
    Serve(ServeArgs),
    /// Generate a synthetic sales dataset CSV.
    Sample(SampleArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct ChartsArgs {
    /// Path to the sales dataset CSV.
    #[arg(short = 'd', long, default_value = "historical_automobile_sales.csv")]
    pub data: PathBuf,

    /// Directory for the chart artifacts (created if missing).
    #[arg(short = 'o', long, default_value = "charts")]
    pub out_dir: PathBuf,

    /// Bubble area multiplier applied to `Seasonality_Weight` in the
    /// seasonality chart.
    #[arg(long, default_value_t = 100.0)]
    pub bubble_scale: f64,

    /// Chart width in pixels.
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Chart height in pixels.
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}

#[derive(Debug, Parser, Clone)]
pub struct ServeArgs {
    /// Path to the sales dataset CSV.
    #[arg(short = 'd', long, default_value = "historical_automobile_sales.csv")]
    pub data: PathBuf,

    /// Bind address.
    #[arg(long, default_value = "127.0.0.1")]
    pub addr: String,

    /// Bind port.
    #[arg(short = 'p', long, default_value_t = 8050)]
    pub port: u16,
}

#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "historical_automobile_sales.csv")]
    pub out: PathBuf,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// First year of the generated range (inclusive).
    #[arg(long, default_value_t = 1980)]
    pub year_start: i32,

    /// Last year of the generated range (inclusive).
    #[arg(long, default_value_t = 2023)]
    pub year_end: i32,
}
