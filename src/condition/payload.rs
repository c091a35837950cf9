use serde::Serialize;
use serde_json::Value;

use super::descriptor::{
    self, COLOR, COLOR_DATA, COLOR_LEVELS, COLOR_SCALE, DATA, FALSE_COLOR, HEADERS, MAX_HEIGHT,
    MIN_HEIGHT, TABULAR_DATA, TRUE_COLOR,
};
use super::input::ConditionInput;
use super::kind::ConditionKind;
use crate::core::{
    ColorScale, NdArray, validate_color, validate_color_scale, validate_heights,
};
use crate::error::{VisError, VisResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoData {
    pub data: NdArray<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundData {
    pub data: NdArray<f64>,
    #[serde(flatten)]
    pub scale: ColorScale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticLevelData {
    pub data: NdArray<f64>,
    pub color: String,
    pub min_height: f64,
    pub max_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicLevelData {
    pub data: NdArray<f64>,
    pub color_data: NdArray<f64>,
    #[serde(flatten)]
    pub scale: ColorScale,
    pub min_height: f64,
    pub max_height: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color_data_description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color_data_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalData {
    pub data: NdArray<f64>,
    pub true_color: String,
    pub false_color: String,
}

/// Time steps × zones of level data with a matching color series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZonalYData {
    pub data: NdArray<f64>,
    pub color_data: NdArray<f64>,
    #[serde(flatten)]
    pub scale: ColorScale,
    pub min_height: f64,
    pub max_height: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color_data_description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color_data_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EqualYData {
    pub data: NdArray<f64>,
    #[serde(flatten)]
    pub scale: ColorScale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectData {
    pub data: NdArray<f64>,
    #[serde(flatten)]
    pub scale: ColorScale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowHideData {
    pub data: NdArray<f64>,
}

/// One independently shaped table per time step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabularInfoData {
    pub data: Vec<NdArray<String>>,
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScaleData {
    #[serde(flatten)]
    pub scale: ColorScale,
}

/// Validated, variant-specific data of a condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionPayload {
    Info(InfoData),
    Background(BackgroundData),
    StaticLevel(StaticLevelData),
    DynamicLevel(DynamicLevelData),
    Logical(LogicalData),
    ZonalY(ZonalYData),
    EqualY(EqualYData),
    Rect(RectData),
    ShowHide(ShowHideData),
    TabularInfo(TabularInfoData),
    ColorScale(ColorScaleData),
}

struct FieldSource<'a> {
    kind: ConditionKind,
    input: &'a ConditionInput,
    time_len: usize,
}

impl FieldSource<'_> {
    fn require(&self, name: &'static str) -> VisResult<&Value> {
        self.input.field(name).ok_or(VisError::MissingField {
            field: name,
            kind: self.kind.name(),
        })
    }

    fn series(&self, name: &'static str, spec: descriptor::ArraySpec) -> VisResult<NdArray<f64>> {
        spec.validate(self.require(name)?, name, self.time_len)
    }

    fn color(&self, name: &'static str) -> VisResult<String> {
        validate_color(self.require(name)?, name)
    }

    fn scale(&self) -> VisResult<ColorScale> {
        validate_color_scale(self.require(COLOR_SCALE)?, self.require(COLOR_LEVELS)?)
    }

    fn heights(&self) -> VisResult<(f64, f64)> {
        validate_heights(self.require(MIN_HEIGHT)?, self.require(MAX_HEIGHT)?)
    }
}

impl ConditionPayload {
    pub(crate) fn build(
        kind: ConditionKind,
        input: &ConditionInput,
        time_len: usize,
    ) -> VisResult<Self> {
        let fields = FieldSource {
            kind,
            input,
            time_len,
        };
        for &name in kind.required_fields() {
            fields.require(name)?;
        }

        let payload = match kind {
            ConditionKind::Info => Self::Info(InfoData {
                data: fields.series(DATA, descriptor::SERIES_1D_OR_2D)?,
            }),
            ConditionKind::Background => Self::Background(BackgroundData {
                data: fields.series(DATA, descriptor::SERIES_1D)?,
                scale: fields.scale()?,
            }),
            ConditionKind::StaticLevel => {
                let data = fields.series(DATA, descriptor::SERIES_1D)?;
                let color = fields.color(COLOR)?;
                let (min_height, max_height) = fields.heights()?;
                Self::StaticLevel(StaticLevelData {
                    data,
                    color,
                    min_height,
                    max_height,
                })
            }
            ConditionKind::DynamicLevel => {
                let data = fields.series(DATA, descriptor::SERIES_1D)?;
                let color_data = fields.series(COLOR_DATA, descriptor::SERIES_1D)?;
                let scale = fields.scale()?;
                let (min_height, max_height) = fields.heights()?;
                Self::DynamicLevel(DynamicLevelData {
                    data,
                    color_data,
                    scale,
                    min_height,
                    max_height,
                    color_data_description: input.color_data_description.clone(),
                    color_data_unit: input.color_data_unit.clone(),
                })
            }
            ConditionKind::Logical => Self::Logical(LogicalData {
                data: fields.series(DATA, descriptor::SERIES_1D)?,
                true_color: fields.color(TRUE_COLOR)?,
                false_color: fields.color(FALSE_COLOR)?,
            }),
            ConditionKind::ZonalY => {
                let data = fields.series(DATA, descriptor::SERIES_2D)?;
                let color_data = fields.series(COLOR_DATA, descriptor::SERIES_2D)?;
                let zones = data.shape()[1];
                let color_zones = color_data.shape()[1];
                if zones != color_zones {
                    return Err(VisError::LengthMismatch {
                        left: DATA.to_owned(),
                        left_len: zones,
                        right: COLOR_DATA.to_owned(),
                        right_len: color_zones,
                    });
                }
                let scale = fields.scale()?;
                let (min_height, max_height) = fields.heights()?;
                Self::ZonalY(ZonalYData {
                    data,
                    color_data,
                    scale,
                    min_height,
                    max_height,
                    color_data_description: input.color_data_description.clone(),
                    color_data_unit: input.color_data_unit.clone(),
                })
            }
            ConditionKind::EqualY => Self::EqualY(EqualYData {
                data: fields.series(DATA, descriptor::SERIES_2D)?,
                scale: fields.scale()?,
            }),
            ConditionKind::Rect => Self::Rect(RectData {
                data: fields.series(DATA, descriptor::SERIES_3D)?,
                scale: fields.scale()?,
            }),
            ConditionKind::ShowHide => Self::ShowHide(ShowHideData {
                data: fields.series(DATA, descriptor::SERIES_1D)?,
            }),
            ConditionKind::TabularInfo => {
                let slices = crate::core::validate_array_slices::<String>(
                    fields.require(TABULAR_DATA)?,
                    TABULAR_DATA,
                )?;
                if slices.len() != time_len {
                    return Err(VisError::shape(
                        TABULAR_DATA,
                        format!(
                            "expected one slice per time step ({time_len}), found {}",
                            slices.len()
                        ),
                    ));
                }
                for (index, slice) in slices.iter().enumerate() {
                    if !(1..=2).contains(&slice.ndim()) {
                        return Err(VisError::shape(
                            format!("{TABULAR_DATA}[{index}]"),
                            format!("expected 1 or 2 dimensions, found {}", slice.ndim()),
                        ));
                    }
                }
                let headers = descriptor::LIST_1D
                    .validate::<String>(fields.require(HEADERS)?, HEADERS, time_len)?;
                Self::TabularInfo(TabularInfoData {
                    data: slices,
                    headers: headers.into_values(),
                })
            }
            ConditionKind::ColorScale => Self::ColorScale(ColorScaleData {
                scale: fields.scale()?,
            }),
        };
        Ok(payload)
    }

    #[must_use]
    pub fn kind(&self) -> ConditionKind {
        match self {
            Self::Info(_) => ConditionKind::Info,
            Self::Background(_) => ConditionKind::Background,
            Self::StaticLevel(_) => ConditionKind::StaticLevel,
            Self::DynamicLevel(_) => ConditionKind::DynamicLevel,
            Self::Logical(_) => ConditionKind::Logical,
            Self::ZonalY(_) => ConditionKind::ZonalY,
            Self::EqualY(_) => ConditionKind::EqualY,
            Self::Rect(_) => ConditionKind::Rect,
            Self::ShowHide(_) => ConditionKind::ShowHide,
            Self::TabularInfo(_) => ConditionKind::TabularInfo,
            Self::ColorScale(_) => ConditionKind::ColorScale,
        }
    }

    /// Primary numeric series, if the variant has one.
    #[must_use]
    pub fn data(&self) -> Option<&NdArray<f64>> {
        match self {
            Self::Info(InfoData { data })
            | Self::Background(BackgroundData { data, .. })
            | Self::StaticLevel(StaticLevelData { data, .. })
            | Self::DynamicLevel(DynamicLevelData { data, .. })
            | Self::Logical(LogicalData { data, .. })
            | Self::ZonalY(ZonalYData { data, .. })
            | Self::EqualY(EqualYData { data, .. })
            | Self::Rect(RectData { data, .. })
            | Self::ShowHide(ShowHideData { data }) => Some(data),
            Self::TabularInfo(_) | Self::ColorScale(_) => None,
        }
    }

    #[must_use]
    pub fn color_scale(&self) -> Option<&ColorScale> {
        match self {
            Self::Background(BackgroundData { scale, .. })
            | Self::DynamicLevel(DynamicLevelData { scale, .. })
            | Self::ZonalY(ZonalYData { scale, .. })
            | Self::EqualY(EqualYData { scale, .. })
            | Self::Rect(RectData { scale, .. })
            | Self::ColorScale(ColorScaleData { scale }) => Some(scale),
            _ => None,
        }
    }

    /// Color series plus its label, when a companion `Info` should be derived.
    pub(crate) fn companion_source(&self) -> Option<(&NdArray<f64>, &str, &str)> {
        let (color_data, description, unit) = match self {
            Self::DynamicLevel(level) => (
                &level.color_data,
                &level.color_data_description,
                &level.color_data_unit,
            ),
            Self::ZonalY(zonal) => (
                &zonal.color_data,
                &zonal.color_data_description,
                &zonal.color_data_unit,
            ),
            _ => return None,
        };
        if description.is_empty() && unit.is_empty() {
            return None;
        }
        Some((color_data, description, unit))
    }

    /// Writes the payload back as raw fields; the inverse of [`Self::build`].
    pub(crate) fn write_fields(&self, input: &mut ConditionInput) {
        fn scale_fields(input: &mut ConditionInput, scale: &ColorScale) {
            input.color_scale = Some(Value::from(scale.colors().to_vec()));
            input.color_levels = Some(Value::from(scale.levels().to_vec()));
        }

        if let Some(data) = self.data() {
            input.data = Some(data.to_value());
        }
        if let Some(scale) = self.color_scale() {
            scale_fields(input, scale);
        }
        match self {
            Self::StaticLevel(level) => {
                input.color = Some(Value::from(level.color.clone()));
                input.min_height = Some(Value::from(level.min_height));
                input.max_height = Some(Value::from(level.max_height));
            }
            Self::DynamicLevel(DynamicLevelData {
                color_data,
                min_height,
                max_height,
                color_data_description,
                color_data_unit,
                ..
            })
            | Self::ZonalY(ZonalYData {
                color_data,
                min_height,
                max_height,
                color_data_description,
                color_data_unit,
                ..
            }) => {
                input.color_data = Some(color_data.to_value());
                input.min_height = Some(Value::from(*min_height));
                input.max_height = Some(Value::from(*max_height));
                input.color_data_description = color_data_description.clone();
                input.color_data_unit = color_data_unit.clone();
            }
            Self::Logical(logical) => {
                input.true_color = Some(Value::from(logical.true_color.clone()));
                input.false_color = Some(Value::from(logical.false_color.clone()));
            }
            Self::TabularInfo(table) => {
                input.tabular_data = Some(Value::Array(
                    table.data.iter().map(NdArray::to_value).collect(),
                ));
                input.headers = Some(Value::from(table.headers.clone()));
            }
            Self::Info(_)
            | Self::Background(_)
            | Self::EqualY(_)
            | Self::Rect(_)
            | Self::ShowHide(_)
            | Self::ColorScale(_) => {}
        }
    }
}
