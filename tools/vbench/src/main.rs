//! Viterbi decoder benchmark viewer.
//!
//! Reads the JSON written by the benchmark and SNR/BER runners and presents
//! it: grouped throughput comparisons with scalar speedups, a listing of the
//! codes in a file, or log-scale BER charts in the terminal.
//!
//! Pipeline: read document → normalize records → filter → group → report.

mod cli;
mod config;
mod diag;
mod output;
mod plot;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::Value;
use viterbi_perf::ber::{group_curves, parse_curves};
use viterbi_perf::listing::list_codes;
use viterbi_perf::{compare, parse_samples};

use cli::OutputFormat;
use diag::{detail, progress, warning};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    diag::set_level(diag::Level::from_flags(cli.quiet, cli.verbose));

    // Checked for every command; only `compare` reads it.
    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        cli::Command::Compare(ref args) => cmd_compare(args, &config),
        cli::Command::List(ref args) => cmd_list(args),
        cli::Command::Plot(ref args) => cmd_plot(args),
    }
}

/// Read and parse a JSON document.
fn read_document(path: &Path) -> Result<Value> {
    progress!("Loading {}...", path.display());
    diag::timed("read document", || -> Result<Value> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("invalid JSON in '{}'", path.display()))
    })
}

/// `vbench compare` — grouped throughput report.
fn cmd_compare(args: &cli::CompareArgs, config: &config::VbenchConfig) -> Result<()> {
    let filter = config.resolve_filter(args)?;
    let display = config.resolve_display(args);

    let document = read_document(&args.filename)?;
    let samples = diag::timed("normalize samples", || parse_samples(&document))
        .with_context(|| format!("bad benchmark data in '{}'", args.filename.display()))?;
    detail!("  {} samples read", samples.len());

    for code in filter.unmatched_codes(&samples) {
        warning!("no samples for code '{code}'");
    }

    let samples = filter.apply(samples);
    detail!("  {} samples after filtering", samples.len());

    let reports = diag::timed("group and summarize", || compare(&samples));
    if reports.is_empty() {
        progress!("No samples match the given filters.");
    }

    let mut stdout = io::stdout().lock();
    match display.format {
        OutputFormat::Text => output::write_comparison(&mut stdout, &reports, display.precision)?,
        OutputFormat::Json => output::write_json(&mut stdout, &reports)?,
    }
    stdout.flush()?;
    Ok(())
}

/// `vbench list` — every code in the file, cheapest first.
fn cmd_list(args: &cli::ListArgs) -> Result<()> {
    let document = read_document(&args.filename)?;
    let samples = parse_samples(&document)
        .with_context(|| format!("bad benchmark data in '{}'", args.filename.display()))?;

    let listings = list_codes(&samples);
    if listings.is_empty() {
        progress!("No codes in {}.", args.filename.display());
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    output::write_listing(&mut stdout, &listings)?;
    stdout.flush()?;
    Ok(())
}

/// `vbench plot` — BER against Eb/No, one figure per code.
fn cmd_plot(args: &cli::PlotArgs) -> Result<()> {
    let document = read_document(&args.filename)?;
    let curves = parse_curves(&document)
        .with_context(|| format!("bad SNR/BER data in '{}'", args.filename.display()))?;

    let groups: Vec<_> = group_curves(&curves)
        .into_iter()
        .map(|group| {
            let axes = group.axes();
            (group, axes)
        })
        .collect();
    detail!("  {} curves in {} figures", curves.len(), groups.len());

    if args.dump {
        let mut stdout = io::stdout().lock();
        output::write_curve_groups(&mut stdout, &groups)?;
        stdout.flush()?;
        return Ok(());
    }

    let mut figures = Vec::with_capacity(groups.len());
    for (group, axes) in groups {
        match axes {
            Some(axes) => figures.push(plot::Figure { group, axes }),
            None => warning!("skipping {}: every BER point is zero", group.key.name),
        }
    }
    if figures.is_empty() {
        bail!("nothing to plot in '{}'", args.filename.display());
    }

    plot::run_plot(figures)
}
