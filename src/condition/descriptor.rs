use serde_json::Value;

use crate::core::{ArrayElement, NdArray, validate_array};
use crate::error::VisResult;

/// Whether an array's first dimension is pinned to the time axis length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthBinding {
    Free,
    TimeAxis,
}

/// Declarative shape rule for one array field of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArraySpec {
    pub min_dims: usize,
    pub max_dims: usize,
    pub length: LengthBinding,
}

impl ArraySpec {
    #[must_use]
    pub const fn time_bound(min_dims: usize, max_dims: usize) -> Self {
        Self {
            min_dims,
            max_dims,
            length: LengthBinding::TimeAxis,
        }
    }

    #[must_use]
    pub const fn free(min_dims: usize, max_dims: usize) -> Self {
        Self {
            min_dims,
            max_dims,
            length: LengthBinding::Free,
        }
    }

    pub fn validate<T: ArrayElement>(
        self,
        value: &Value,
        name: &str,
        time_len: usize,
    ) -> VisResult<NdArray<T>> {
        let dim0 = match self.length {
            LengthBinding::TimeAxis => Some(time_len),
            LengthBinding::Free => None,
        };
        validate_array(value, name, Some(self.min_dims), Some(self.max_dims), dim0)
    }
}

/// One value per time step.
pub const SERIES_1D: ArraySpec = ArraySpec::time_bound(1, 1);
/// One value or one row of values per time step.
pub const SERIES_1D_OR_2D: ArraySpec = ArraySpec::time_bound(1, 2);
/// Time steps × zones (or segments).
pub const SERIES_2D: ArraySpec = ArraySpec::time_bound(2, 2);
/// Time steps × rows × columns.
pub const SERIES_3D: ArraySpec = ArraySpec::time_bound(3, 3);
/// Plain list, unrelated to the time axis.
pub const LIST_1D: ArraySpec = ArraySpec::free(1, 1);

pub const DATA: &str = "data";
pub const COLOR_DATA: &str = "color_data";
pub const COLOR_SCALE: &str = "color_scale";
pub const COLOR_LEVELS: &str = "color_levels";
pub const MIN_HEIGHT: &str = "min_height";
pub const MAX_HEIGHT: &str = "max_height";
pub const COLOR: &str = "color";
pub const TRUE_COLOR: &str = "true_color";
pub const FALSE_COLOR: &str = "false_color";
pub const TABULAR_DATA: &str = "tabular_data";
pub const HEADERS: &str = "headers";
