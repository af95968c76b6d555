//! One-line-per-code listing of a benchmark file.

use serde::Serialize;
use serde_json::Value;

use crate::sample::Sample;

/// A code present in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeListing {
    /// Code identifier.
    pub name: String,
    /// Constraint length.
    #[serde(rename = "K")]
    pub k: u32,
    /// Code rate denominator.
    #[serde(rename = "R")]
    pub r: u32,
    /// Generator polynomials, if the input listed them.
    #[serde(rename = "G")]
    pub coefficients: Option<Value>,
}

impl CodeListing {
    /// Listing order key `2^K * R`. Note this differs from the grouping
    /// weight, which uses `2^K - 1`.
    pub fn listing_weight(&self) -> u128 {
        2u128
            .checked_pow(self.k)
            .map_or(u128::MAX, |states| states.saturating_mul(u128::from(self.r)))
    }
}

/// Deduplicate by name and order by `2^K * R`.
///
/// A name keeps the position of its first occurrence but takes its values
/// from the last occurrence.
pub fn list_codes(samples: &[Sample]) -> Vec<CodeListing> {
    let mut listings: Vec<CodeListing> = Vec::new();
    for sample in samples {
        let listing = CodeListing {
            name: sample.name().to_string(),
            k: sample.k(),
            r: sample.r(),
            coefficients: sample.coefficients().cloned(),
        };
        match listings.iter_mut().find(|l| l.name == listing.name) {
            Some(existing) => *existing = listing,
            None => listings.push(listing),
        }
    }
    listings.sort_by_key(CodeListing::listing_weight);
    listings
}
