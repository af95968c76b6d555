//! Command-line interface definitions for vbench.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use viterbi_perf::{DecodeType, SimdType, parse_tag};

/// Compare, list and plot Viterbi decoder benchmark results.
#[derive(Parser)]
#[command(name = "vbench", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: `vbench.toml` in the working directory, if present).
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Suppress progress output; show only errors and the report.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose output with timings and sample counts.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compare decoder throughput, with speedups over the scalar decoder.
    Compare(CompareArgs),
    /// List every code in a benchmark file.
    List(ListArgs),
    /// Plot bit error rate against Eb/No from an SNR/BER sweep.
    Plot(PlotArgs),
}

/// Report format for `compare`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable grouped text.
    Text,
    /// Structured JSON rows.
    Json,
}

/// Arguments for the `compare` subcommand.
#[derive(Parser)]
pub struct CompareArgs {
    /// Benchmark results written by the benchmark runner.
    pub filename: PathBuf,

    /// Only include these codes (by exact name).
    #[arg(long, num_args = 1..)]
    pub filter_code: Vec<String>,

    /// Only include these decode types.
    #[arg(long, num_args = 1.., value_parser = parse_tag::<DecodeType>)]
    pub filter_decode: Vec<DecodeType>,

    /// Only include these SIMD types.
    #[arg(long, num_args = 1.., value_parser = parse_tag::<SimdType>)]
    pub filter_simd: Vec<SimdType>,

    /// Output format (default: text, or `display.format` from the config).
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Decimal places for rates and ratios (default: 2).
    #[arg(long)]
    pub precision: Option<usize>,
}

/// Arguments for the `list` subcommand.
#[derive(Parser)]
pub struct ListArgs {
    /// Benchmark results written by the benchmark runner.
    pub filename: PathBuf,
}

/// Arguments for the `plot` subcommand.
#[derive(Parser)]
pub struct PlotArgs {
    /// SNR/BER sweep results.
    pub filename: PathBuf,

    /// Print the grouped curves and axes instead of opening the chart view.
    #[arg(long)]
    pub dump: bool,
}
