//! Normalization of raw benchmark records into typed samples.
//!
//! A record is one JSON object emitted by the benchmark runner:
//!
//! ```json
//! {
//!   "name": "conv_k7", "K": 7, "R": 2, "G": [121, 91],
//!   "decode_type": "SOFT16", "simd_type": "SCALAR",
//!   "total_input_bits": 1000, "total_symbols": 2000,
//!   "update_symbols_ns": [1000000], "chainback_bits_ns": [500000]
//! }
//! ```

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::group::ComparisonKey;
use crate::kinds::{DecodeType, SimdType, Tag, parse_tag};

/// One benchmark observation with its derived per-repetition rates.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    name: String,
    decode_type: DecodeType,
    simd_type: SimdType,
    k: u32,
    r: u32,
    coefficients: Option<Value>,
    total_input_bits: u64,
    total_symbols: u64,
    update_time_ns: Vec<f64>,
    chainback_time_ns: Vec<f64>,
    symbol_rate: Vec<f64>,
    chainback_rate: Vec<f64>,
}

impl Sample {
    /// Build a sample from one decoded JSON record.
    pub fn from_json(value: &Value) -> Result<Self> {
        let record = Record::new(value)?;

        let name = record.name()?;
        let decode_type = record.tag::<DecodeType>("decode_type")?;
        let simd_type = record.tag::<SimdType>("simd_type")?;
        let k = record.positive_u32("K")?;
        let r = record.positive_u32("R")?;
        let coefficients = record.optional("G").cloned();
        let total_input_bits = record.positive_u64("total_input_bits")?;
        let total_symbols = record.positive_u64("total_symbols")?;
        let update_time_ns = record.durations("update_symbols_ns")?;
        let chainback_time_ns = record.durations("chainback_bits_ns")?;

        if update_time_ns.len() != chainback_time_ns.len() {
            return Err(Error::malformed(format!(
                "update_symbols_ns has {} entries but chainback_bits_ns has {}",
                update_time_ns.len(),
                chainback_time_ns.len()
            )));
        }

        let symbol_rate = rates(total_symbols, &update_time_ns, "update_symbols_ns")?;
        let chainback_rate = rates(total_input_bits, &chainback_time_ns, "chainback_bits_ns")?;

        Ok(Self {
            name,
            decode_type,
            simd_type,
            k,
            r,
            coefficients,
            total_input_bits,
            total_symbols,
            update_time_ns,
            chainback_time_ns,
            symbol_rate,
            chainback_rate,
        })
    }

    /// Code identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decode precision.
    pub fn decode_type(&self) -> DecodeType {
        self.decode_type
    }

    /// SIMD variant.
    pub fn simd_type(&self) -> SimdType {
        self.simd_type
    }

    /// Constraint length.
    pub fn k(&self) -> u32 {
        self.k
    }

    /// Code rate denominator.
    pub fn r(&self) -> u32 {
        self.r
    }

    /// Generator polynomials as listed in the input, if present.
    pub fn coefficients(&self) -> Option<&Value> {
        self.coefficients.as_ref()
    }

    /// Number of input bits decoded per repetition.
    pub fn total_input_bits(&self) -> u64 {
        self.total_input_bits
    }

    /// Number of symbols consumed per repetition.
    pub fn total_symbols(&self) -> u64 {
        self.total_symbols
    }

    /// Raw update timings in nanoseconds.
    pub fn update_time_ns(&self) -> &[f64] {
        &self.update_time_ns
    }

    /// Raw chainback timings in nanoseconds.
    pub fn chainback_time_ns(&self) -> &[f64] {
        &self.chainback_time_ns
    }

    /// Symbols per second for each repetition.
    pub fn symbol_rate(&self) -> &[f64] {
        &self.symbol_rate
    }

    /// Bits per second through chainback for each repetition.
    pub fn chainback_rate(&self) -> &[f64] {
        &self.chainback_rate
    }

    /// Number of measurement repetitions.
    pub fn repetitions(&self) -> usize {
        self.update_time_ns.len()
    }

    /// The `(name, K, R)` key this sample is grouped under.
    pub fn key(&self) -> ComparisonKey {
        ComparisonKey::new(&self.name, self.k, self.r)
    }
}

/// Normalize every record in a JSON array.
///
/// Stops at the first bad record; its position is attached to the error.
pub fn parse_samples(document: &Value) -> Result<Vec<Sample>> {
    let records = document
        .as_array()
        .ok_or_else(|| Error::malformed("benchmark document is not a JSON array"))?;

    records
        .iter()
        .enumerate()
        .map(|(index, value)| {
            Sample::from_json(value).map_err(|e| Error::Record {
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

/// `count / (t * 1e-9)` for each duration, rejecting non-finite results.
fn rates(count: u64, durations_ns: &[f64], field: &str) -> Result<Vec<f64>> {
    durations_ns
        .iter()
        .map(|&ns| {
            #[allow(clippy::cast_precision_loss)]
            let rate = count as f64 / (ns * 1e-9);
            if rate.is_finite() && rate > 0.0 {
                Ok(rate)
            } else {
                Err(Error::malformed(format!(
                    "{field} entry {ns} gives a non-finite rate"
                )))
            }
        })
        .collect()
}

/// Typed field access over one JSON object.
pub(crate) struct Record<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    pub(crate) fn new(value: &'a Value) -> Result<Self> {
        let fields = value
            .as_object()
            .ok_or_else(|| Error::malformed("record is not a JSON object"))?;
        Ok(Self { fields })
    }

    pub(crate) fn required(&self, field: &'static str) -> Result<&'a Value> {
        self.fields.get(field).ok_or(Error::MissingField { field })
    }

    pub(crate) fn optional(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    pub(crate) fn name(&self) -> Result<String> {
        let name = self
            .required("name")?
            .as_str()
            .ok_or_else(|| Error::malformed("'name' is not a string"))?;
        if name.is_empty() {
            return Err(Error::malformed("'name' is empty"));
        }
        Ok(name.to_string())
    }

    pub(crate) fn tag<T: Tag>(&self, field: &'static str) -> Result<T> {
        let raw = self
            .required(field)?
            .as_str()
            .ok_or_else(|| Error::malformed(format!("'{field}' is not a string")))?;
        parse_tag(raw)
    }

    pub(crate) fn positive_u64(&self, field: &'static str) -> Result<u64> {
        match self.required(field)?.as_u64() {
            Some(n) if n > 0 => Ok(n),
            _ => Err(Error::malformed(format!(
                "'{field}' must be a positive integer"
            ))),
        }
    }

    pub(crate) fn positive_u32(&self, field: &'static str) -> Result<u32> {
        let n = self.positive_u64(field)?;
        u32::try_from(n).map_err(|_| Error::malformed(format!("'{field}' is out of range: {n}")))
    }

    /// An array of finite numbers.
    pub(crate) fn numbers(&self, field: &'static str) -> Result<Vec<f64>> {
        let items = self
            .required(field)?
            .as_array()
            .ok_or_else(|| Error::malformed(format!("'{field}' is not an array")))?;
        items
            .iter()
            .map(|v| {
                v.as_f64()
                    .filter(|x| x.is_finite())
                    .ok_or_else(|| Error::malformed(format!("'{field}' contains non-number {v}")))
            })
            .collect()
    }

    /// A non-empty array of strictly positive durations.
    fn durations(&self, field: &'static str) -> Result<Vec<f64>> {
        let values = self.numbers(field)?;
        if values.is_empty() {
            return Err(Error::malformed(format!("'{field}' is empty")));
        }
        if let Some(bad) = values.iter().find(|&&ns| ns <= 0.0) {
            return Err(Error::malformed(format!(
                "'{field}' contains non-positive duration {bad}"
            )));
        }
        Ok(values)
    }
}

/// Build a sample for tests: one rate per timing, `total_* = 1000` so a
/// timing of `t` ns gives a rate of `1e12 / t`.
#[cfg(test)]
pub(crate) fn fixture(name: &str, k: u32, r: u32, decode: &str, simd: &str, times_ns: &[f64]) -> Sample {
    Sample::from_json(&serde_json::json!({
        "name": name,
        "K": k,
        "R": r,
        "decode_type": decode,
        "simd_type": simd,
        "total_input_bits": 1000,
        "total_symbols": 1000,
        "update_symbols_ns": times_ns,
        "chainback_bits_ns": times_ns,
    }))
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_record() -> Value {
        json!({
            "name": "conv_k7",
            "K": 7,
            "R": 2,
            "G": [121, 91],
            "decode_type": "SOFT16",
            "simd_type": "SCALAR",
            "total_input_bits": 1000,
            "total_symbols": 2000,
            "update_symbols_ns": [1_000_000, 2_000_000],
            "chainback_bits_ns": [500_000, 250_000],
        })
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() <= e * 1e-9, "{a} != {e}");
        }
    }

    fn without(field: &str) -> Value {
        let mut v = valid_record();
        v.as_object_mut().unwrap().remove(field);
        v
    }

    fn with(field: &str, value: Value) -> Value {
        let mut v = valid_record();
        v.as_object_mut().unwrap().insert(field.into(), value);
        v
    }

    #[test]
    fn parses_valid_record() {
        let s = Sample::from_json(&valid_record()).unwrap();
        assert_eq!(s.name(), "conv_k7");
        assert_eq!(s.k(), 7);
        assert_eq!(s.r(), 2);
        assert_eq!(s.decode_type(), DecodeType::Soft16);
        assert_eq!(s.simd_type(), SimdType::Scalar);
        assert_eq!(s.coefficients(), Some(&json!([121, 91])));
        assert_eq!(s.repetitions(), 2);
        assert_close(s.symbol_rate(), &[2e6, 1e6]);
        assert_close(s.chainback_rate(), &[2e6, 4e6]);
    }

    #[test]
    fn rates_match_timing_lengths_and_are_positive() {
        let mut record = with("update_symbols_ns", json!([3.5, 7e9, 12]));
        record["chainback_bits_ns"] = json!([1, 2, 3]);
        let s = Sample::from_json(&record).unwrap();
        assert_eq!(s.symbol_rate().len(), s.update_time_ns().len());
        assert_eq!(s.chainback_rate().len(), s.chainback_time_ns().len());
        assert!(
            s.symbol_rate()
                .iter()
                .chain(s.chainback_rate())
                .all(|r| r.is_finite() && *r > 0.0)
        );
    }

    #[test]
    fn coefficients_are_optional() {
        let s = Sample::from_json(&without("G")).unwrap();
        assert!(s.coefficients().is_none());
    }

    #[test]
    fn tags_are_case_insensitive() {
        let s = Sample::from_json(&with("simd_type", json!("simd_neon"))).unwrap();
        assert_eq!(s.simd_type(), SimdType::SimdNeon);
    }

    #[test]
    fn missing_field_is_reported() {
        for field in [
            "name",
            "decode_type",
            "simd_type",
            "K",
            "R",
            "total_input_bits",
            "total_symbols",
            "update_symbols_ns",
            "chainback_bits_ns",
        ] {
            let err = Sample::from_json(&without(field)).unwrap_err();
            assert_eq!(err, Error::MissingField { field });
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = Sample::from_json(&with("decode_type", json!("SOFT4"))).unwrap_err();
        assert!(matches!(err, Error::InvalidEnumerationValue { kind: "decode type", .. }));
    }

    #[test]
    fn mismatched_timing_lengths_are_rejected() {
        let err = Sample::from_json(&with("chainback_bits_ns", json!([1]))).unwrap_err();
        assert!(matches!(err, Error::MalformedSample { .. }));
    }

    #[test]
    fn non_positive_durations_are_rejected() {
        for bad in [json!([0, 1]), json!([-5, 1]), json!([]), json!(["fast", 1])] {
            let err = Sample::from_json(&with("update_symbols_ns", bad)).unwrap_err();
            assert!(matches!(err, Error::MalformedSample { .. }), "{err}");
        }
    }

    #[test]
    fn zero_counts_are_rejected() {
        let err = Sample::from_json(&with("total_symbols", json!(0))).unwrap_err();
        assert!(matches!(err, Error::MalformedSample { .. }));
        let err = Sample::from_json(&with("K", json!(0))).unwrap_err();
        assert!(matches!(err, Error::MalformedSample { .. }));
    }

    #[test]
    fn document_error_carries_record_index() {
        let doc = json!([valid_record(), without("R")]);
        let err = parse_samples(&doc).unwrap_err();
        assert!(matches!(err, Error::Record { index: 1, .. }));
        assert_eq!(err.root(), &Error::MissingField { field: "R" });
        assert_eq!(err.to_string(), "record 1: missing required field 'R'");
    }

    #[test]
    fn document_must_be_array() {
        assert!(parse_samples(&valid_record()).is_err());
        assert!(parse_samples(&json!([])).unwrap().is_empty());
    }
}
