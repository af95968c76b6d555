//! Closed enumerations for decode precision and SIMD variant.
//!
//! Both enumerations are resolved from strings through [`parse_tag`], which
//! is shared by the JSON reader and the command-line filters so that a tag
//! means the same thing wherever it appears.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// A closed set of variants addressable by a case-insensitive name.
pub trait Tag: Copy + Sized + 'static {
    /// Enumeration name used in error messages.
    const KIND: &'static str;
    /// Every variant, in declared order.
    const ALL: &'static [Self];

    /// Canonical upper-case name of the variant.
    fn name(self) -> &'static str;

    /// Position of the variant in declared order.
    fn ordinal(self) -> usize;
}

/// Resolve `value` to a variant of `T` by case-insensitive exact match.
pub fn parse_tag<T: Tag>(value: &str) -> Result<T> {
    T::ALL
        .iter()
        .copied()
        .find(|variant| variant.name().eq_ignore_ascii_case(value))
        .ok_or_else(|| Error::InvalidEnumerationValue {
            value: value.to_string(),
            kind: T::KIND,
        })
}

/// Quantization used on the decoder's soft/hard-decision path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecodeType {
    /// 16-bit soft decisions.
    Soft16,
    /// 8-bit soft decisions.
    Soft8,
    /// 8-bit hard decisions.
    Hard8,
}

impl Tag for DecodeType {
    const KIND: &'static str = "decode type";
    const ALL: &'static [Self] = &[Self::Soft16, Self::Soft8, Self::Hard8];

    fn name(self) -> &'static str {
        match self {
            Self::Soft16 => "SOFT16",
            Self::Soft8 => "SOFT8",
            Self::Hard8 => "HARD8",
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }
}

/// Instruction-set strategy used by one decoder implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimdType {
    /// Portable scalar decoder, the speedup baseline.
    Scalar,
    /// x86 SSE.
    SimdSse,
    /// x86 AVX.
    SimdAvx,
    /// ARM NEON.
    SimdNeon,
}

impl Tag for SimdType {
    const KIND: &'static str = "simd type";
    const ALL: &'static [Self] = &[Self::Scalar, Self::SimdSse, Self::SimdAvx, Self::SimdNeon];

    fn name(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::SimdSse => "SIMD_SSE",
            Self::SimdAvx => "SIMD_AVX",
            Self::SimdNeon => "SIMD_NEON",
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }
}

impl FromStr for DecodeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_tag(s)
    }
}

impl FromStr for SimdType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_tag(s)
    }
}

impl fmt::Display for DecodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for SimdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
