use serde::{Deserialize, Serialize};

use crate::error::{VisError, VisResult};

fn default_title() -> String {
    "My Simulation".to_owned()
}

fn default_font_size() -> f64 {
    12.0
}

fn default_fragment_height() -> f64 {
    500.0
}

fn default_runtime_src() -> String {
    "ssv.js".to_owned()
}

/// Presentation settings of a visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Height in pixels of the embeddable fragment.
    #[serde(default = "default_fragment_height")]
    pub fragment_height: f64,
    /// URL of the playback script loaded by the generated page.
    #[serde(default = "default_runtime_src")]
    pub runtime_src: String,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            font_size: default_font_size(),
            fragment_height: default_fragment_height(),
            runtime_src: default_runtime_src(),
        }
    }
}

impl VisConfig {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    #[must_use]
    pub fn with_fragment_height(mut self, height: f64) -> Self {
        self.fragment_height = height;
        self
    }

    #[must_use]
    pub fn with_runtime_src(mut self, src: impl Into<String>) -> Self {
        self.runtime_src = src.into();
        self
    }

    pub fn validate(&self) -> VisResult<()> {
        validate_size("font_size", self.font_size)?;
        validate_size("fragment_height", self.fragment_height)?;
        Ok(())
    }
}

pub(crate) fn validate_size(field: &str, value: f64) -> VisResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(VisError::type_mismatch(field, "a finite number greater than 0"));
    }
    Ok(value)
}
