//! Console formatting for comparison reports, code listings and curve dumps.

use std::io::{self, Write};

use serde_json::Value;
use viterbi_perf::Tag;
use viterbi_perf::ber::{CurveGroup, PlotAxes};
use viterbi_perf::listing::CodeListing;
use viterbi_perf::{BucketReport, RateSummary};

/// Write the grouped comparison as text.
///
/// ```text
/// name='conv_k7',K=7,R=2,decode=SOFT16
/// simd=scalar,samples=10
///  update    = 2.00 ± 0.01 megasymbols/s
///  chainback = 1.50 ± 0.02 megabits/s
/// simd=simd_avx,samples=10
///  update    = 9.12 ± 0.11 megasymbols/s (x4.56)
///  chainback = 3.01 ± 0.05 megabits/s (x2.01)
/// ```
pub fn write_comparison(
    out: &mut impl Write,
    reports: &[BucketReport],
    precision: usize,
) -> io::Result<()> {
    for report in reports {
        writeln!(
            out,
            "name='{}',K={},R={},decode={}",
            report.key.name,
            report.key.k,
            report.key.r,
            report.decode_type.name()
        )?;
        for row in &report.rows {
            let (update_ratio, chainback_ratio) = match row.speedup {
                Some(s) => (
                    format!(" (x{:.precision$})", s.symbol),
                    format!(" (x{:.precision$})", s.chainback),
                ),
                None => (String::new(), String::new()),
            };
            writeln!(
                out,
                "simd={},samples={}",
                row.simd_type.name().to_lowercase(),
                row.repetitions
            )?;
            writeln!(
                out,
                " update    = {}symbols/s{update_ratio}",
                format_rate(&row.symbol_rate, precision)
            )?;
            writeln!(
                out,
                " chainback = {}bits/s{chainback_ratio}",
                format_rate(&row.chainback_rate, precision)
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// `"<mean> ± <std> <prefix>"`, both in the mean's display scale.
fn format_rate(summary: &RateSummary, precision: usize) -> String {
    format!(
        "{:.precision$} ± {:.precision$} {}",
        summary.scaled_mean(),
        summary.scaled_std_dev(),
        summary.scale.prefix
    )
}

/// Write the comparison as pretty-printed JSON.
pub fn write_json(out: &mut impl Write, reports: &[BucketReport]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)
}

/// Write the code listing table.
pub fn write_listing(out: &mut impl Write, listings: &[CodeListing]) -> io::Result<()> {
    let width = listings
        .iter()
        .map(|l| l.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    writeln!(out, " {:<width$} |  K  R | Coefficients", "Name")?;
    for listing in listings {
        writeln!(
            out,
            " {:<width$} | {:2} {:2} | {}",
            listing.name,
            listing.k,
            listing.r,
            format_coefficients(listing.coefficients.as_ref())
        )?;
    }
    Ok(())
}

/// Render generator polynomials as `[a, b, c]`; anything else verbatim.
fn format_coefficients(coefficients: Option<&Value>) -> String {
    match coefficients {
        None => "-".to_string(),
        Some(Value::Array(items)) => {
            let items: Vec<String> = items.iter().map(Value::to_string).collect();
            format!("[{}]", items.join(", "))
        }
        Some(other) => other.to_string(),
    }
}

/// Write grouped SNR/BER curves and their shared axes as text.
pub fn write_curve_groups(
    out: &mut impl Write,
    groups: &[(CurveGroup<'_>, Option<PlotAxes>)],
) -> io::Result<()> {
    for (group, axes) in groups {
        writeln!(out, "{} (K={},R={})", group.key.name, group.key.k, group.key.r)?;
        match axes {
            Some(axes) => {
                let [x_lo, x_hi] = axes.x_bounds();
                let [y_lo, y_hi] = axes.y_bounds();
                writeln!(
                    out,
                    " Eb/No (dB) = {x_lo:.1} .. {x_hi:.1}, BER = 1e{y_lo} .. 1e{y_hi}"
                )?;
            }
            None => writeln!(out, " no non-zero BER points")?,
        }
        for layer in &group.layers {
            writeln!(out, " {}", layer.simd_type.name())?;
            for curve in &layer.curves {
                let points: Vec<String> = curve
                    .points
                    .iter()
                    .map(|(x, y)| format!("{x:.1}:{y:.3e}"))
                    .collect();
                writeln!(
                    out,
                    "  {:<6} {}",
                    curve.decode_type.name().to_lowercase(),
                    points.join(" ")
                )?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
