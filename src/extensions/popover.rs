use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::condition::{ArraySpec, normalize_kind_name};
use crate::core::{ArrayInput, NdArray, validate_array};
use crate::error::{VisError, VisResult};

pub const DEFAULT_POPOVER_DIMS: [f64; 2] = [0.2, 0.2];

const POPOVER_SERIES: ArraySpec = ArraySpec::time_bound(1, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopoverKind {
    /// Inline trend line over the time axis.
    LineChart,
}

impl PopoverKind {
    pub const ALL: [Self; 1] = [Self::LineChart];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LineChart => "line_chart",
        }
    }

    pub fn parse(name: &str) -> VisResult<Self> {
        let wanted = normalize_kind_name(name);
        Self::ALL
            .into_iter()
            .find(|kind| normalize_kind_name(kind.name()) == wanted)
            .ok_or_else(|| VisError::UnsupportedKind {
                family: "popover",
                name: name.to_owned(),
            })
    }
}

impl fmt::Display for PopoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw popover fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopoverInput {
    pub data: Option<ArrayInput>,
    /// Width and height as fractions of the viewport.
    pub dims: Option<Value>,
    pub label: String,
}

impl PopoverInput {
    #[must_use]
    pub fn new(data: impl Into<ArrayInput>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_dims(mut self, width: f64, height: f64) -> Self {
        self.dims = Some(Value::from(vec![width, height]));
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popover {
    #[serde(rename = "type")]
    kind: PopoverKind,
    data: NdArray<f64>,
    dims: [f64; 2],
    label: String,
}

impl Popover {
    pub fn create(kind: PopoverKind, time_len: usize, input: &PopoverInput) -> VisResult<Self> {
        let data = input.data.as_ref().ok_or(VisError::MissingField {
            field: "data",
            kind: kind.name(),
        })?;
        let data = POPOVER_SERIES.validate(data, "data", time_len)?;
        let dims = match &input.dims {
            Some(dims) => validate_dims(dims)?,
            None => DEFAULT_POPOVER_DIMS,
        };
        Ok(Self {
            kind,
            data,
            dims,
            label: input.label.clone(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> PopoverKind {
        self.kind
    }

    #[must_use]
    pub fn data(&self) -> &NdArray<f64> {
        &self.data
    }

    #[must_use]
    pub fn dims(&self) -> [f64; 2] {
        self.dims
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn to_input(&self) -> PopoverInput {
        PopoverInput {
            data: Some(self.data.to_value()),
            dims: Some(Value::from(self.dims.to_vec())),
            label: self.label.clone(),
        }
    }
}

fn validate_dims(dims: &Value) -> VisResult<[f64; 2]> {
    let dims = validate_array::<f64>(dims, "dims", Some(1), Some(1), Some(2))?;
    match dims.values() {
        &[width, height] if [width, height].iter().all(|d| d.is_finite() && *d > 0.0) => {
            Ok([width, height])
        }
        _ => Err(VisError::range("dims", "both dimensions must be finite and positive")),
    }
}
