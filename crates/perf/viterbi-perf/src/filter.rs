//! Selection of samples by code name, decode precision and SIMD variant.

use crate::kinds::{DecodeType, SimdType};
use crate::sample::Sample;

/// Constraints on which samples take part in a comparison.
///
/// An empty list leaves that dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleFilter {
    /// Accepted code names (exact, case-sensitive).
    pub codes: Vec<String>,
    /// Accepted decode precisions.
    pub decode_types: Vec<DecodeType>,
    /// Accepted SIMD variants.
    pub simd_types: Vec<SimdType>,
}

impl SampleFilter {
    /// Whether no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty() && self.decode_types.is_empty() && self.simd_types.is_empty()
    }

    /// Whether `sample` passes every constraint.
    pub fn matches(&self, sample: &Sample) -> bool {
        (self.simd_types.is_empty() || self.simd_types.contains(&sample.simd_type()))
            && (self.decode_types.is_empty() || self.decode_types.contains(&sample.decode_type()))
            && (self.codes.is_empty() || self.codes.iter().any(|c| c == sample.name()))
    }

    /// Keep the matching samples, preserving input order.
    pub fn apply(&self, samples: Vec<Sample>) -> Vec<Sample> {
        samples.into_iter().filter(|s| self.matches(s)).collect()
    }

    /// Code-name constraints that name no sample in `samples`.
    pub fn unmatched_codes<'f>(&'f self, samples: &[Sample]) -> Vec<&'f str> {
        self.codes
            .iter()
            .filter(|code| !samples.iter().any(|s| s.name() == code.as_str()))
            .map(String::as_str)
            .collect()
    }
}
