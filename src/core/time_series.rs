use serde::Serialize;

use crate::core::array::ArrayInput;
use crate::core::validators::validate_array;
use crate::error::{VisError, VisResult};

/// Shared x-axis of a visualization; its length is the canonical length `L`
/// every bound data series must match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    values: Vec<f64>,
    unit: String,
}

impl TimeSeries {
    pub fn new(values: &ArrayInput, unit: impl Into<String>) -> VisResult<Self> {
        let values = validate_array::<f64>(values, "x_series", Some(1), Some(1), None)?;
        if values.is_empty() {
            return Err(VisError::shape("x_series", "must hold at least one value"));
        }
        Ok(Self {
            values: values.into_values(),
            unit: unit.into(),
        })
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values rendered with four significant decimals, e.g. `1.5000e+01`.
    #[must_use]
    pub fn formatted(&self) -> Vec<String> {
        self.values.iter().copied().map(format_scientific).collect()
    }
}

/// Formats `value` as `d.dddde±XX` with at least two exponent digits.
#[must_use]
pub fn format_scientific(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_owned()
        } else if value > 0.0 {
            "inf".to_owned()
        } else {
            "-inf".to_owned()
        };
    }
    let raw = format!("{value:.4e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}
