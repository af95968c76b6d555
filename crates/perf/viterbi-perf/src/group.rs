//! Three-level grouping of samples: code, then decode precision, then SIMD.
//!
//! Codes are ordered cheapest first by complexity weight `(2^K - 1) * R`.
//! Decode-precision buckets and the samples inside them follow the declared
//! order of their enumerations, so a bucket always starts with its scalar
//! decoder when one is present.

use serde::Serialize;

use crate::kinds::{DecodeType, Tag};
use crate::sample::Sample;

/// Identity of one code configuration: `(name, K, R)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ComparisonKey {
    /// Code identifier.
    pub name: String,
    /// Constraint length.
    #[serde(rename = "K")]
    pub k: u32,
    /// Code rate denominator.
    #[serde(rename = "R")]
    pub r: u32,
}

impl ComparisonKey {
    /// Construct a key.
    pub fn new(name: &str, k: u32, r: u32) -> Self {
        Self {
            name: name.to_string(),
            k,
            r,
        }
    }

    /// Decoding cost proxy `(2^K - 1) * R`, the number of trellis states
    /// times the symbols per bit. Saturates for absurd `K`.
    pub fn complexity_weight(&self) -> u128 {
        2u128
            .checked_pow(self.k)
            .map_or(u128::MAX, |states| (states - 1).saturating_mul(u128::from(self.r)))
    }

    /// Whether `sample` belongs under this key.
    pub fn matches(&self, sample: &Sample) -> bool {
        sample.name() == self.name && sample.k() == self.k && sample.r() == self.r
    }
}

/// Samples of one code sharing a decode precision, in SIMD order.
#[derive(Debug, Clone)]
pub struct PrecisionBucket<'a> {
    /// Decode precision shared by every sample in the bucket.
    pub decode_type: DecodeType,
    /// Samples ordered by SIMD variant (stable for equal variants).
    pub samples: Vec<&'a Sample>,
}

/// All buckets of one code configuration.
#[derive(Debug, Clone)]
pub struct CodeGroup<'a> {
    /// The code configuration.
    pub key: ComparisonKey,
    /// Non-empty buckets in decode-precision declared order.
    pub buckets: Vec<PrecisionBucket<'a>>,
}

/// Distinct keys in first-encounter order.
pub(crate) fn distinct_keys<'a, I>(keys: I) -> Vec<ComparisonKey>
where
    I: IntoIterator<Item = (&'a str, u32, u32)>,
{
    let mut out: Vec<ComparisonKey> = Vec::new();
    for (name, k, r) in keys {
        if !out.iter().any(|key| key.name == name && key.k == k && key.r == r) {
            out.push(ComparisonKey::new(name, k, r));
        }
    }
    out
}

/// Build the grouped hierarchy over `samples`.
///
/// Ties in complexity weight keep the order in which the codes first
/// appear. Empty buckets and codes without any bucket are left out.
pub fn group_samples(samples: &[Sample]) -> Vec<CodeGroup<'_>> {
    let mut keys = distinct_keys(samples.iter().map(|s| (s.name(), s.k(), s.r())));
    keys.sort_by_key(ComparisonKey::complexity_weight);

    keys.into_iter()
        .filter_map(|key| {
            let members: Vec<&Sample> = samples.iter().filter(|s| key.matches(s)).collect();
            let buckets: Vec<PrecisionBucket<'_>> = DecodeType::ALL
                .iter()
                .filter_map(|&decode_type| {
                    let mut bucket: Vec<&Sample> = members
                        .iter()
                        .copied()
                        .filter(|s| s.decode_type() == decode_type)
                        .collect();
                    if bucket.is_empty() {
                        return None;
                    }
                    bucket.sort_by_key(|s| s.simd_type().ordinal());
                    Some(PrecisionBucket {
                        decode_type,
                        samples: bucket,
                    })
                })
                .collect();

            if buckets.is_empty() {
                None
            } else {
                Some(CodeGroup { key, buckets })
            }
        })
        .collect()
}
