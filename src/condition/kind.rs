use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::descriptor::{
    COLOR, COLOR_DATA, COLOR_LEVELS, COLOR_SCALE, DATA, FALSE_COLOR, HEADERS, MAX_HEIGHT,
    MIN_HEIGHT, TABULAR_DATA, TRUE_COLOR,
};
use crate::error::{VisError, VisResult};

/// Closed set of condition variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    Info,
    Background,
    StaticLevel,
    DynamicLevel,
    Logical,
    ZonalY,
    EqualY,
    Rect,
    ShowHide,
    TabularInfo,
    ColorScale,
}

impl ConditionKind {
    pub const ALL: [Self; 11] = [
        Self::Info,
        Self::Background,
        Self::StaticLevel,
        Self::DynamicLevel,
        Self::Logical,
        Self::ZonalY,
        Self::EqualY,
        Self::Rect,
        Self::ShowHide,
        Self::TabularInfo,
        Self::ColorScale,
    ];

    /// Tag written to the `type` field of serialized conditions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Background => "background",
            Self::StaticLevel => "static_level",
            Self::DynamicLevel => "dynamic_level",
            Self::Logical => "logical",
            Self::ZonalY => "zonal_y",
            Self::EqualY => "equal_y",
            Self::Rect => "rect",
            Self::ShowHide => "show_hide",
            Self::TabularInfo => "tabular_info",
            Self::ColorScale => "color_scale",
        }
    }

    /// Fields that must be present before any validation runs, in report order.
    #[must_use]
    pub const fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::Info | Self::ShowHide => &[DATA],
            Self::Background | Self::EqualY | Self::Rect => &[DATA, COLOR_SCALE, COLOR_LEVELS],
            Self::StaticLevel => &[DATA, COLOR, MIN_HEIGHT, MAX_HEIGHT],
            Self::DynamicLevel | Self::ZonalY => &[
                DATA,
                COLOR_DATA,
                COLOR_SCALE,
                COLOR_LEVELS,
                MIN_HEIGHT,
                MAX_HEIGHT,
            ],
            Self::Logical => &[DATA, TRUE_COLOR, FALSE_COLOR],
            Self::TabularInfo => &[TABULAR_DATA, HEADERS],
            Self::ColorScale => &[COLOR_SCALE, COLOR_LEVELS],
        }
    }

    /// Variants whose color series is mirrored into a companion `Info` condition.
    #[must_use]
    pub const fn spawns_companion(self) -> bool {
        matches!(self, Self::DynamicLevel | Self::ZonalY)
    }

    /// Resolves a kind name case-insensitively; `_`, `-` and spaces are ignored,
    /// so `ZonalY`, `zonal_y` and `zonaly` are equivalent. The legacy names
    /// `level_static`, `level_dynamic` and `sections_equal` are accepted too.
    pub fn parse(name: &str) -> VisResult<Self> {
        let wanted = normalize(name);
        let legacy = match wanted.as_str() {
            "levelstatic" => Some(Self::StaticLevel),
            "leveldynamic" => Some(Self::DynamicLevel),
            "sectionsequal" => Some(Self::EqualY),
            _ => None,
        };
        legacy
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|kind| normalize(kind.name()) == wanted)
            })
            .ok_or_else(|| VisError::UnsupportedKind {
                family: "condition",
                name: name.to_owned(),
            })
    }
}

pub(crate) fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for ConditionKind {
    type Err = VisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
