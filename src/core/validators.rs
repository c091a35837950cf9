//! Coercion and validation of caller-supplied arrays, colors and bounds.
//!
//! Every function here is pure: it either returns the coerced value or the
//! first violation it finds. Nothing is silently clamped or dropped.

use serde_json::Value;

use crate::core::array::{ArrayElement, NdArray};
use crate::core::color::{ColorScale, is_hex_color};
use crate::error::{VisError, VisResult};

/// Coerces `value` into a rectangular array of `T`.
///
/// `min_dims`/`max_dims` bound the dimensionality (inclusive) and `dim0_len`
/// pins the size of the first dimension.
pub fn validate_array<T: ArrayElement>(
    value: &Value,
    name: &str,
    min_dims: Option<usize>,
    max_dims: Option<usize>,
    dim0_len: Option<usize>,
) -> VisResult<NdArray<T>> {
    let mut values = Vec::new();
    let shape = flatten_into(value, name, &mut values)?;
    let ndim = shape.len();

    let below = min_dims.is_some_and(|min| ndim < min);
    let above = max_dims.is_some_and(|max| ndim > max);
    if below || above {
        let min = min_dims.map_or_else(|| "0".to_owned(), |min| min.to_string());
        let max = max_dims.map_or_else(|| "any".to_owned(), |max| max.to_string());
        return Err(VisError::shape(
            name,
            format!("expected between {min} and {max} dimensions, found {ndim}"),
        ));
    }

    if let Some(expected) = dim0_len {
        let found = shape.first().copied();
        if found != Some(expected) {
            return Err(VisError::shape(
                name,
                format!(
                    "expected size {expected} in dimension 1, found {}",
                    found.map_or_else(|| "a scalar".to_owned(), |len| len.to_string())
                ),
            ));
        }
    }

    Ok(NdArray::from_parts(shape, values))
}

fn flatten_into<T: ArrayElement>(value: &Value, name: &str, out: &mut Vec<T>) -> VisResult<Vec<usize>> {
    match value {
        Value::Array(items) => {
            let Some((first, rest)) = items.split_first() else {
                return Ok(vec![0]);
            };
            let inner = flatten_into(first, name, out)?;
            for item in rest {
                let shape = flatten_into(item, name, out)?;
                if shape != inner {
                    return Err(VisError::shape(
                        name,
                        format!("inhomogeneous nesting: {inner:?} vs {shape:?}"),
                    ));
                }
            }
            let mut shape = Vec::with_capacity(inner.len() + 1);
            shape.push(items.len());
            shape.extend(inner);
            Ok(shape)
        }
        scalar => {
            let coerced = T::coerce(scalar).ok_or_else(|| VisError::TypeCast {
                field: name.to_owned(),
                target: T::TYPE_NAME,
                value: scalar.to_string(),
            })?;
            out.push(coerced);
            Ok(Vec::new())
        }
    }
}

/// Validates a list whose entries are independently shaped arrays.
pub fn validate_array_slices<T: ArrayElement>(
    value: &Value,
    name: &str,
) -> VisResult<Vec<NdArray<T>>> {
    let Value::Array(slices) = value else {
        return Err(VisError::Iteration {
            field: name.to_owned(),
        });
    };
    slices
        .iter()
        .enumerate()
        .map(|(index, slice)| validate_array(slice, &format!("{name}[{index}]"), None, None, None))
        .collect()
}

/// Coerces every entry to a string and requires `#RGB`/`#RRGGBB`.
pub fn validate_colors(value: &Value, name: &str) -> VisResult<NdArray<String>> {
    let colors = validate_array::<String>(value, name, None, None, None)?;
    if let Some(bad) = colors.values().iter().find(|color| !is_hex_color(color)) {
        return Err(VisError::ColorFormat {
            field: name.to_owned(),
            value: bad.clone(),
        });
    }
    Ok(colors)
}

pub fn validate_color(value: &Value, name: &str) -> VisResult<String> {
    if value.is_array() {
        return Err(VisError::type_mismatch(name, "a single color string"));
    }
    let single = Value::Array(vec![value.clone()]);
    validate_colors(&single, name)?
        .into_values()
        .pop()
        .ok_or_else(|| VisError::type_mismatch(name, "a single color string"))
}

/// Validates a 1-D hex color list against a 1-D numeric level list of equal length.
pub fn validate_color_scale(scale: &Value, levels: &Value) -> VisResult<ColorScale> {
    let colors = validate_array::<String>(scale, "color_scale", Some(1), Some(1), None)?;
    let levels = validate_array::<f64>(levels, "color_levels", Some(1), Some(1), None)?;
    ColorScale::new(colors.into_values(), levels.into_values())
}

/// Requires two finite numbers with `max > min`.
pub fn validate_heights(min: &Value, max: &Value) -> VisResult<(f64, f64)> {
    let min = finite_number(min, "min_height")?;
    let max = finite_number(max, "max_height")?;
    if max <= min {
        return Err(VisError::range(
            "max_height",
            format!("max_height ({max}) must be greater than min_height ({min})"),
        ));
    }
    Ok((min, max))
}

pub fn validate_opacity(opacity: f64) -> VisResult<f64> {
    if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
        return Err(VisError::range("opacity", "must be finite and in [0, 1]"));
    }
    Ok(opacity)
}

pub(crate) fn finite_number(value: &Value, name: &str) -> VisResult<f64> {
    match value.as_f64() {
        Some(number) if value.is_number() && number.is_finite() => Ok(number),
        _ => Err(VisError::type_mismatch(name, "a finite number")),
    }
}
