use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;

/// Raw, not yet validated array-like input (nested JSON lists or scalars).
pub type ArrayInput = Value;

/// Scalar types a nested array can be coerced into.
pub trait ArrayElement: Sized + Clone {
    /// Human-readable target name used in cast errors.
    const TYPE_NAME: &'static str;

    fn coerce(value: &Value) -> Option<Self>;

    fn to_json(&self) -> Value;
}

impl ArrayElement for f64 {
    const TYPE_NAME: &'static str = "float";

    /// Non-finite values are rejected; JSON has no encoding for them.
    fn coerce(value: &Value) -> Option<Self> {
        let number = match value {
            Value::Number(number) => number.as_f64(),
            Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }?;
        number.is_finite().then_some(number)
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl ArrayElement for String {
    const TYPE_NAME: &'static str = "str";

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

/// Dense, rectangular n-dimensional array stored row-major.
///
/// A zero-dimensional array holds exactly one scalar. Serializes back to
/// nested lists matching `shape`.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray<T> {
    shape: Vec<usize>,
    values: Vec<T>,
}

impl<T> NdArray<T> {
    /// Builds a 1-D array.
    #[must_use]
    pub fn from_vec(values: Vec<T>) -> Self {
        Self {
            shape: vec![values.len()],
            values,
        }
    }

    pub(crate) fn from_parts(shape: Vec<usize>, values: Vec<T>) -> Self {
        debug_assert_eq!(shape.iter().product::<usize>(), values.len());
        Self { shape, values }
    }

    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[must_use]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Size of the first dimension (1 for a scalar).
    #[must_use]
    pub fn len(&self) -> usize {
        self.shape.first().copied().unwrap_or(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat row-major view of every scalar.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

impl<T: ArrayElement> NdArray<T> {
    /// Re-encodes the array as nested JSON lists.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self.shape.as_slice() {
            [] => self.values.first().map_or(Value::Null, ArrayElement::to_json),
            shape => nested_value(shape, &self.values),
        }
    }
}

fn nested_value<T: ArrayElement>(shape: &[usize], values: &[T]) -> Value {
    let Some((&outer, inner)) = shape.split_first() else {
        return Value::Null;
    };
    if inner.is_empty() {
        return Value::Array(values.iter().map(ArrayElement::to_json).collect());
    }
    let stride: usize = inner.iter().product();
    let rows = (0..outer)
        .map(|index| nested_value(inner, &values[index * stride..(index + 1) * stride]))
        .collect();
    Value::Array(rows)
}

impl<T: Serialize> Serialize for NdArray<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.shape.as_slice() {
            [] => match self.values.first() {
                Some(scalar) => scalar.serialize(serializer),
                None => serializer.serialize_none(),
            },
            shape => Nested {
                shape,
                values: &self.values,
            }
            .serialize(serializer),
        }
    }
}

struct Nested<'a, T> {
    shape: &'a [usize],
    values: &'a [T],
}

impl<T: Serialize> Serialize for Nested<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (&outer, inner) = match self.shape.split_first() {
            Some(split) => split,
            None => return serializer.serialize_none(),
        };
        let mut seq = serializer.serialize_seq(Some(outer))?;
        if inner.is_empty() {
            for value in self.values {
                seq.serialize_element(value)?;
            }
        } else {
            let stride: usize = inner.iter().product();
            for index in 0..outer {
                let start = index * stride;
                seq.serialize_element(&Nested {
                    shape: inner,
                    values: &self.values[start..start + stride],
                })?;
            }
        }
        seq.end()
    }
}
