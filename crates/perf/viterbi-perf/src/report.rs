//! Throughput statistics and scalar-relative speedups.
//!
//! Each decode-precision bucket is walked in SIMD order. The first scalar
//! sample becomes the bucket's baseline; every later row carries the ratio
//! of its mean rates to the baseline's. Rows before the baseline (or all
//! rows, when the scalar decoder was filtered out) carry no ratio.

use serde::Serialize;

use crate::group::{ComparisonKey, PrecisionBucket, group_samples};
use crate::kinds::{DecodeType, SimdType};
use crate::sample::Sample;
use crate::scale::{UnitScale, unit_scale};

/// Population mean and standard deviation of a rate sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateSummary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation (divides by `n`).
    pub std_dev: f64,
    /// Display scale chosen from the mean.
    pub scale: UnitScale,
}

impl RateSummary {
    /// Summarize `rates`. An empty slice summarizes to zero.
    pub fn of(rates: &[f64]) -> Self {
        if rates.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
                scale: UnitScale::UNIT,
            };
        }

        #[allow(clippy::cast_precision_loss)]
        let n = rates.len() as f64;
        let mean = rates.iter().sum::<f64>() / n;
        let variance = rates.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / n;

        Self {
            mean,
            std_dev: variance.sqrt(),
            scale: unit_scale(mean),
        }
    }

    /// Mean in display units.
    pub fn scaled_mean(&self) -> f64 {
        self.scale.apply(self.mean)
    }

    /// Standard deviation in the same display units as the mean.
    pub fn scaled_std_dev(&self) -> f64 {
        self.scale.apply(self.std_dev)
    }
}

/// Mean-rate ratios against the bucket's scalar baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Speedup {
    /// Symbol-rate ratio.
    pub symbol: f64,
    /// Chainback-rate ratio.
    pub chainback: f64,
}

/// One reported sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Code identifier.
    pub name: String,
    /// Constraint length.
    #[serde(rename = "K")]
    pub k: u32,
    /// Code rate denominator.
    #[serde(rename = "R")]
    pub r: u32,
    /// Decode precision.
    pub decode_type: DecodeType,
    /// SIMD variant.
    pub simd_type: SimdType,
    /// Number of measurement repetitions.
    pub repetitions: usize,
    /// Symbols per second through the update stage.
    pub symbol_rate: RateSummary,
    /// Bits per second through chainback.
    pub chainback_rate: RateSummary,
    /// Ratio to the scalar baseline, when one precedes this row.
    pub speedup: Option<Speedup>,
}

/// The rows of one decode-precision bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketReport {
    /// Code configuration.
    #[serde(flatten)]
    pub key: ComparisonKey,
    /// Decode precision of every row.
    pub decode_type: DecodeType,
    /// Rows in SIMD order.
    pub rows: Vec<ReportRow>,
}

/// Baseline capture state for one bucket.
#[derive(Debug, Clone, Copy)]
enum Baseline {
    AwaitingBaseline,
    HaveBaseline { symbol: f64, chainback: f64 },
}

impl Baseline {
    fn speedup(self, symbol: &RateSummary, chainback: &RateSummary) -> Option<Speedup> {
        match self {
            Self::AwaitingBaseline => None,
            Self::HaveBaseline {
                symbol: base_symbol,
                chainback: base_chainback,
            } => Some(Speedup {
                symbol: symbol.mean / base_symbol,
                chainback: chainback.mean / base_chainback,
            }),
        }
    }

    /// Capture the first scalar sample; later samples leave it unchanged.
    fn observe(self, sample: &Sample, symbol: &RateSummary, chainback: &RateSummary) -> Self {
        match self {
            Self::AwaitingBaseline if sample.simd_type() == SimdType::Scalar => Self::HaveBaseline {
                symbol: symbol.mean,
                chainback: chainback.mean,
            },
            other => other,
        }
    }
}

/// Compute one row per sample in an already SIMD-ordered bucket.
pub fn report_bucket(bucket: &PrecisionBucket<'_>) -> Vec<ReportRow> {
    let mut baseline = Baseline::AwaitingBaseline;

    bucket
        .samples
        .iter()
        .map(|sample| {
            let symbol_rate = RateSummary::of(sample.symbol_rate());
            let chainback_rate = RateSummary::of(sample.chainback_rate());
            let speedup = baseline.speedup(&symbol_rate, &chainback_rate);
            baseline = baseline.observe(sample, &symbol_rate, &chainback_rate);

            ReportRow {
                name: sample.name().to_string(),
                k: sample.k(),
                r: sample.r(),
                decode_type: sample.decode_type(),
                simd_type: sample.simd_type(),
                repetitions: sample.repetitions(),
                symbol_rate,
                chainback_rate,
                speedup,
            }
        })
        .collect()
}

/// Group `samples` and report every bucket, cheapest code first.
pub fn compare(samples: &[Sample]) -> Vec<BucketReport> {
    group_samples(samples)
        .iter()
        .flat_map(|group| {
            group.buckets.iter().map(|bucket| BucketReport {
                key: group.key.clone(),
                decode_type: bucket.decode_type,
                rows: report_bucket(bucket),
            })
        })
        .collect()
}
