//! Aggregation and comparison engine for Viterbi decoder benchmarks.
//!
//! Normalizes JSON benchmark records into typed [`Sample`]s, groups them by
//! code, decode precision and SIMD variant, and computes throughput
//! statistics with speedup ratios against the scalar decoder. Also handles
//! the SNR/BER sweep format used for error-rate plots.
//!
//! Everything here is a pure transformation over in-memory data. Reading
//! files and rendering results is left to the `vbench` tool.

pub mod ber;
pub mod error;
pub mod filter;
pub mod group;
pub mod kinds;
pub mod listing;
pub mod report;
pub mod sample;
pub mod scale;

pub use error::{Error, Result};
pub use filter::SampleFilter;
pub use group::{CodeGroup, ComparisonKey, PrecisionBucket, group_samples};
pub use kinds::{DecodeType, SimdType, Tag, parse_tag};
pub use report::{BucketReport, RateSummary, ReportRow, Speedup, compare, report_bucket};
pub use sample::{Sample, parse_samples};
pub use scale::{UnitScale, unit_scale};
