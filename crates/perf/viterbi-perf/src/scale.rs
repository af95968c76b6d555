//! SI-style unit prefixes for human-readable rates.

use serde::Serialize;

/// A display scale: divide a magnitude by `factor` and prepend `prefix`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitScale {
    /// Divisor applied to the raw magnitude.
    pub factor: f64,
    /// Word prefix for the unit (e.g. "mega"), empty for no scaling.
    pub prefix: &'static str,
}

impl UnitScale {
    /// The identity scale.
    pub const UNIT: Self = Self {
        factor: 1.0,
        prefix: "",
    };

    /// Apply this scale to a magnitude.
    pub fn apply(self, value: f64) -> f64 {
        value / self.factor
    }
}

/// Scales in descending order.
const SCALES: [(f64, &str); 8] = [
    (1e12, "tera"),
    (1e9, "giga"),
    (1e6, "mega"),
    (1e3, "kilo"),
    (1e0, ""),
    (1e-3, "milli"),
    (1e-6, "micro"),
    (1e-9, "nano"),
];

/// Pick the largest scale strictly below `value`.
///
/// A value exactly on a power of a thousand falls to the next lower prefix
/// (`1e12` is reported as `1000 giga`). Values at or below `1e-9`, zero,
/// negatives and NaN get the identity scale.
pub fn unit_scale(value: f64) -> UnitScale {
    SCALES
        .iter()
        .find(|&&(factor, _)| value > factor)
        .map_or(UnitScale::UNIT, |&(factor, prefix)| UnitScale { factor, prefix })
}
