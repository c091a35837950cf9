use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::descriptor::{
    COLOR, COLOR_DATA, COLOR_LEVELS, COLOR_SCALE, DATA, FALSE_COLOR, HEADERS, MAX_HEIGHT,
    MIN_HEIGHT, TABULAR_DATA, TRUE_COLOR,
};
use crate::core::ArrayInput;

/// Raw fields for one condition, as supplied by a caller or a description.
///
/// Common fields have defaults. Variant fields stay `None` until set, so a
/// missing required field is reported by name when the condition is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionInput {
    pub description: String,
    pub unit: String,
    pub opacity: f64,
    pub report: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<String>,
    pub section_label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ArrayInput>,
    #[serde(alias = "data_dynamic", skip_serializing_if = "Option::is_none")]
    pub color_data: Option<ArrayInput>,
    #[serde(alias = "description_dynamic", skip_serializing_if = "String::is_empty")]
    pub color_data_description: String,
    #[serde(alias = "unit_dynamic", skip_serializing_if = "String::is_empty")]
    pub color_data_unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale: Option<ArrayInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_levels: Option<ArrayInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub true_color: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub false_color: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tabular_data: Option<ArrayInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<ArrayInput>,
}

impl Default for ConditionInput {
    fn default() -> Self {
        Self {
            description: String::new(),
            unit: String::new(),
            opacity: 1.0,
            report: true,
            overlay: None,
            section_label: "Zone".to_owned(),
            data: None,
            color_data: None,
            color_data_description: String::new(),
            color_data_unit: String::new(),
            color_scale: None,
            color_levels: None,
            min_height: None,
            max_height: None,
            color: None,
            true_color: None,
            false_color: None,
            tabular_data: None,
            headers: None,
        }
    }
}

impl ConditionInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks a variant field up by its serialized name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        match name {
            DATA => self.data.as_ref(),
            COLOR_DATA => self.color_data.as_ref(),
            COLOR_SCALE => self.color_scale.as_ref(),
            COLOR_LEVELS => self.color_levels.as_ref(),
            MIN_HEIGHT => self.min_height.as_ref(),
            MAX_HEIGHT => self.max_height.as_ref(),
            COLOR => self.color.as_ref(),
            TRUE_COLOR => self.true_color.as_ref(),
            FALSE_COLOR => self.false_color.as_ref(),
            TABULAR_DATA => self.tabular_data.as_ref(),
            HEADERS => self.headers.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_report(mut self, report: bool) -> Self {
        self.report = report;
        self
    }

    #[must_use]
    pub fn with_overlay(mut self, overlay: impl Into<String>) -> Self {
        self.overlay = Some(overlay.into());
        self
    }

    #[must_use]
    pub fn with_section_label(mut self, label: impl Into<String>) -> Self {
        self.section_label = label.into();
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: impl Into<ArrayInput>) -> Self {
        self.data = Some(data.into());
        self
    }

    #[must_use]
    pub fn with_color_data(mut self, data: impl Into<ArrayInput>) -> Self {
        self.color_data = Some(data.into());
        self
    }

    /// Label of the color series; a non-empty description or unit makes
    /// dynamic-level and zonal conditions derive a companion `Info`.
    #[must_use]
    pub fn with_color_data_label(
        mut self,
        description: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        self.color_data_description = description.into();
        self.color_data_unit = unit.into();
        self
    }

    #[must_use]
    pub fn with_color_scale(
        mut self,
        colors: impl Into<ArrayInput>,
        levels: impl Into<ArrayInput>,
    ) -> Self {
        self.color_scale = Some(colors.into());
        self.color_levels = Some(levels.into());
        self
    }

    #[must_use]
    pub fn with_heights(mut self, min: impl Into<Value>, max: impl Into<Value>) -> Self {
        self.min_height = Some(min.into());
        self.max_height = Some(max.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<Value>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_logical_colors(
        mut self,
        true_color: impl Into<Value>,
        false_color: impl Into<Value>,
    ) -> Self {
        self.true_color = Some(true_color.into());
        self.false_color = Some(false_color.into());
        self
    }

    #[must_use]
    pub fn with_table(mut self, rows: impl Into<ArrayInput>, headers: impl Into<ArrayInput>) -> Self {
        self.tabular_data = Some(rows.into());
        self.headers = Some(headers.into());
        self
    }
}
