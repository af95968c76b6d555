//! Optional `vbench.toml` configuration.
//!
//! Supplies default filters and display settings. Values given on the
//! command line take precedence over the file.
//!
//! ```toml
//! [filter]
//! codes = ["voyager", "cassini"]
//! decode = ["soft16"]
//! simd = ["scalar", "simd_avx"]
//!
//! [display]
//! precision = 3
//! format = "text"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use viterbi_perf::{DecodeType, SampleFilter, SimdType, parse_tag};

use crate::cli::{CompareArgs, OutputFormat};
use crate::diag::detail;

/// File name searched for in the working directory.
pub const CONFIG_FILE: &str = "vbench.toml";

/// Default number of decimal places.
const DEFAULT_PRECISION: usize = 2;

/// Default sample filters.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Code names to include.
    pub codes: Vec<String>,
    /// Decode type tags to include.
    pub decode: Vec<String>,
    /// SIMD type tags to include.
    pub simd: Vec<String>,
}

/// Report presentation settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Decimal places for rates and ratios.
    pub precision: Option<usize>,
    /// Report format.
    pub format: Option<OutputFormat>,
}

/// Top-level configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VbenchConfig {
    /// Default filters for `compare`.
    pub filter: FilterConfig,
    /// Default display settings for `compare`.
    pub display: DisplayConfig,
}

/// Display settings after merging file and command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDisplay {
    /// Decimal places.
    pub precision: usize,
    /// Report format.
    pub format: OutputFormat,
}

/// Load configuration from `explicit`, or from `vbench.toml` in the working
/// directory when it exists. Absent files yield the defaults.
pub fn load(explicit: Option<&Path>) -> Result<VbenchConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let path = PathBuf::from(CONFIG_FILE);
            if !path.exists() {
                return Ok(VbenchConfig::default());
            }
            path
        }
    };

    detail!("Loading config from {}", path.display());
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Parse configuration text.
pub fn parse(text: &str) -> Result<VbenchConfig> {
    Ok(toml::from_str(text)?)
}

impl VbenchConfig {
    /// Merge the file's filters with the command line's. A non-empty
    /// command-line list replaces the file's list for that dimension.
    pub fn resolve_filter(&self, args: &CompareArgs) -> Result<SampleFilter> {
        let codes = if args.filter_code.is_empty() {
            self.filter.codes.clone()
        } else {
            args.filter_code.clone()
        };
        let decode_types = if args.filter_decode.is_empty() {
            parse_tags::<DecodeType>(&self.filter.decode)?
        } else {
            args.filter_decode.clone()
        };
        let simd_types = if args.filter_simd.is_empty() {
            parse_tags::<SimdType>(&self.filter.simd)?
        } else {
            args.filter_simd.clone()
        };

        Ok(SampleFilter {
            codes,
            decode_types,
            simd_types,
        })
    }

    /// Merge display settings with the command line.
    pub fn resolve_display(&self, args: &CompareArgs) -> ResolvedDisplay {
        ResolvedDisplay {
            precision: args
                .precision
                .or(self.display.precision)
                .unwrap_or(DEFAULT_PRECISION),
            format: args
                .format
                .or(self.display.format)
                .unwrap_or(OutputFormat::Text),
        }
    }
}

fn parse_tags<T: viterbi_perf::Tag>(tags: &[String]) -> Result<Vec<T>> {
    tags.iter()
        .map(|tag| parse_tag::<T>(tag).context("in [filter] section of config"))
        .collect()
}
