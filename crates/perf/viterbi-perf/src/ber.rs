//! Bit-error-rate sweeps for SNR/BER plots.
//!
//! Input records carry `EbNo_dB` and `ber` arrays in place of timings.
//! Points with a BER of exactly zero cannot be drawn on a log axis and are
//! dropped from both arrays.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::group::{ComparisonKey, distinct_keys};
use crate::kinds::{DecodeType, SimdType, Tag};
use crate::sample::Record;

/// One decoder's BER curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BerCurve {
    /// Code identifier.
    pub name: String,
    /// Decode precision.
    pub decode_type: DecodeType,
    /// SIMD variant.
    pub simd_type: SimdType,
    /// Constraint length.
    #[serde(rename = "K")]
    pub k: u32,
    /// Code rate denominator.
    #[serde(rename = "R")]
    pub r: u32,
    /// `(Eb/No in dB, bit error rate)` points with non-zero BER.
    pub points: Vec<(f64, f64)>,
}

impl BerCurve {
    /// Build a curve from one decoded JSON record.
    pub fn from_json(value: &Value) -> Result<Self> {
        let record = Record::new(value)?;

        let name = record.name()?;
        let decode_type = record.tag::<DecodeType>("decode_type")?;
        let simd_type = record.tag::<SimdType>("simd_type")?;
        let k = record.positive_u32("K")?;
        let r = record.positive_u32("R")?;
        let ebno_db = record.numbers("EbNo_dB")?;
        let ber = record.numbers("ber")?;

        if ebno_db.len() != ber.len() {
            return Err(Error::malformed(format!(
                "EbNo_dB has {} entries but ber has {}",
                ebno_db.len(),
                ber.len()
            )));
        }
        if let Some(bad) = ber.iter().find(|&&b| b < 0.0) {
            return Err(Error::malformed(format!("'ber' contains negative rate {bad}")));
        }

        let points = ebno_db
            .into_iter()
            .zip(ber)
            .filter(|&(_, b)| b != 0.0)
            .collect();

        Ok(Self {
            name,
            decode_type,
            simd_type,
            k,
            r,
            points,
        })
    }

    fn key_matches(&self, key: &ComparisonKey) -> bool {
        self.name == key.name && self.k == key.k && self.r == key.r
    }
}

/// Parse every record of an SNR/BER document.
pub fn parse_curves(document: &Value) -> Result<Vec<BerCurve>> {
    let records = document
        .as_array()
        .ok_or_else(|| Error::malformed("SNR/BER document is not a JSON array"))?;

    records
        .iter()
        .enumerate()
        .map(|(index, value)| {
            BerCurve::from_json(value).map_err(|e| Error::Record {
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

/// Curves of one code sharing a SIMD variant (one plot panel).
#[derive(Debug, Clone)]
pub struct SimdLayer<'a> {
    /// SIMD variant of the panel.
    pub simd_type: SimdType,
    /// Curves in decode-precision declared order.
    pub curves: Vec<&'a BerCurve>,
}

/// All panels for one code (one figure).
#[derive(Debug, Clone)]
pub struct CurveGroup<'a> {
    /// Code configuration.
    pub key: ComparisonKey,
    /// Non-empty panels in SIMD declared order.
    pub layers: Vec<SimdLayer<'a>>,
}

/// Axis ticks shared by every panel of a figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotAxes {
    /// Sorted distinct Eb/No values.
    pub x_ticks: Vec<f64>,
    /// Decade exponents: `10^e` for each `e`, lowest first.
    pub y_decades: Vec<i32>,
}

impl PlotAxes {
    /// Inclusive Eb/No range.
    pub fn x_bounds(&self) -> [f64; 2] {
        [
            self.x_ticks.first().copied().unwrap_or(0.0),
            self.x_ticks.last().copied().unwrap_or(0.0),
        ]
    }

    /// Inclusive decade range as exponents.
    pub fn y_bounds(&self) -> [f64; 2] {
        [
            self.y_decades.first().map_or(0.0, |&e| f64::from(e)),
            self.y_decades.last().map_or(0.0, |&e| f64::from(e)),
        ]
    }
}

impl CurveGroup<'_> {
    /// Compute shared axes, or `None` if no panel has a point.
    pub fn axes(&self) -> Option<PlotAxes> {
        let points: Vec<(f64, f64)> = self
            .layers
            .iter()
            .flat_map(|layer| layer.curves.iter())
            .flat_map(|curve| curve.points.iter().copied())
            .collect();
        if points.is_empty() {
            return None;
        }

        let mut x_ticks: Vec<f64> = points.iter().map(|&(x, _)| x).collect();
        x_ticks.sort_by(f64::total_cmp);
        x_ticks.dedup();

        let (min_ber, max_ber) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
                (lo.min(y), hi.max(y))
            });
        #[allow(clippy::cast_possible_truncation)]
        let lowest = min_ber.log10().floor() as i32;
        #[allow(clippy::cast_possible_truncation)]
        let highest = max_ber.log10().ceil() as i32;

        Some(PlotAxes {
            x_ticks,
            y_decades: (lowest..=highest).collect(),
        })
    }
}

/// Group curves into figures (code) and panels (SIMD variant).
///
/// Figures are ordered by `K * R`, ties in encounter order.
pub fn group_curves(curves: &[BerCurve]) -> Vec<CurveGroup<'_>> {
    let mut keys = distinct_keys(curves.iter().map(|c| (c.name.as_str(), c.k, c.r)));
    keys.sort_by_key(|key| u64::from(key.k) * u64::from(key.r));

    keys.into_iter()
        .filter_map(|key| {
            let members: Vec<&BerCurve> = curves.iter().filter(|c| c.key_matches(&key)).collect();
            let layers: Vec<SimdLayer<'_>> = SimdType::ALL
                .iter()
                .filter_map(|&simd_type| {
                    let mut layer: Vec<&BerCurve> = members
                        .iter()
                        .copied()
                        .filter(|c| c.simd_type == simd_type)
                        .collect();
                    if layer.is_empty() {
                        return None;
                    }
                    layer.sort_by_key(|c| c.decode_type.ordinal());
                    Some(SimdLayer {
                        simd_type,
                        curves: layer,
                    })
                })
                .collect();

            if layers.is_empty() {
                None
            } else {
                Some(CurveGroup { key, layers })
            }
        })
        .collect()
}
