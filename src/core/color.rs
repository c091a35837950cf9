use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{VisError, VisResult};

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}){1,2}$").expect("hex color pattern is valid")
});

/// `#RGB` or `#RRGGBB`, case-insensitive.
#[must_use]
pub fn is_hex_color(candidate: &str) -> bool {
    HEX_COLOR.is_match(candidate)
}

/// Parallel hex colors and numeric thresholds for piecewise color mapping.
///
/// Always holds the same number of colors and levels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    color_scale: Vec<String>,
    color_levels: Vec<f64>,
}

impl ColorScale {
    pub fn new(colors: Vec<String>, levels: Vec<f64>) -> VisResult<Self> {
        if let Some(bad) = colors.iter().find(|color| !is_hex_color(color)) {
            return Err(VisError::ColorFormat {
                field: "color_scale".to_owned(),
                value: bad.clone(),
            });
        }
        if colors.len() != levels.len() {
            return Err(VisError::LengthMismatch {
                left: "color_scale".to_owned(),
                left_len: colors.len(),
                right: "color_levels".to_owned(),
                right_len: levels.len(),
            });
        }
        Ok(Self {
            color_scale: colors,
            color_levels: levels,
        })
    }

    #[must_use]
    pub fn colors(&self) -> &[String] {
        &self.color_scale
    }

    #[must_use]
    pub fn levels(&self) -> &[f64] {
        &self.color_levels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.color_scale.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.color_scale.is_empty()
    }
}
