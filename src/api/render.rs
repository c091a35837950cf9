use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use askama::Template;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::Diagnostic;
use crate::error::{VisError, VisResult};

const OVERLAY_PATTERNS_JSON: &str = include_str!("../../data/overlays.json");

/// Output flavour; both share the same payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Standalone HTML page.
    #[default]
    Full,
    /// Fixed-height snippet meant to be embedded in another page.
    Fragment,
}

impl RenderMode {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Fragment => "fragment",
        }
    }
}

impl FromStr for RenderMode {
    type Err = VisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "html" | "fragment" => Ok(Self::Fragment),
            _ => Err(VisError::UnsupportedKind {
                family: "render mode",
                name: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Data handed to the playback runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPayload {
    pub title: String,
    /// Time values formatted as `d.dddde±XX`.
    pub x_series: Vec<String>,
    pub x_series_unit: String,
    pub font_size: f64,
    /// Serialized elements grouped by kind name; every kind is present.
    pub element_data: IndexMap<String, Vec<Value>>,
    /// Annotated image markup.
    pub sim_visual: String,
    /// Named pattern definitions referenced by condition overlays.
    pub svg_overlays: IndexMap<String, String>,
}

impl RenderPayload {
    /// JSON safe to inline in a `<script>` element.
    pub fn to_script_json(&self) -> VisResult<String> {
        let json = serde_json::to_string(self)
            .map_err(|err| VisError::Serialization(format!("failed to serialize payload: {err}")))?;
        Ok(json.replace("</", "<\\/"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub mode: RenderMode,
    pub document: String,
    pub payload: RenderPayload,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Template)]
#[template(path = "vis_full.html")]
struct FullPage<'a> {
    title: &'a str,
    container_id: &'a str,
    runtime_src: &'a str,
    font_size: f64,
    sim_visual: &'a str,
    payload_json: &'a str,
}

#[derive(Template)]
#[template(path = "vis_fragment.html")]
struct FragmentPage<'a> {
    container_id: &'a str,
    runtime_src: &'a str,
    height: f64,
    font_size: f64,
    sim_visual: &'a str,
    payload_json: &'a str,
}

fn template_error(err: askama::Error) -> VisError {
    VisError::Serialization(format!("failed to render template: {err}"))
}

pub(crate) fn overlay_patterns() -> VisResult<IndexMap<String, String>> {
    serde_json::from_str(OVERLAY_PATTERNS_JSON)
        .map_err(|err| VisError::Serialization(format!("invalid overlay table: {err}")))
}

pub(crate) fn render_document(
    mode: RenderMode,
    payload: &RenderPayload,
    runtime_src: &str,
    height: f64,
) -> VisResult<String> {
    // Element ids must not start with a digit.
    let container_id = format!("s{}", uuid::Uuid::new_v4().simple());
    let payload_json = payload.to_script_json()?;
    let document = match mode {
        RenderMode::Full => FullPage {
            title: &payload.title,
            container_id: &container_id,
            runtime_src,
            font_size: payload.font_size,
            sim_visual: &payload.sim_visual,
            payload_json: &payload_json,
        }
        .render(),
        RenderMode::Fragment => FragmentPage {
            container_id: &container_id,
            runtime_src,
            height,
            font_size: payload.font_size,
            sim_visual: &payload.sim_visual,
            payload_json: &payload_json,
        }
        .render(),
    }
    .map_err(template_error)?;
    debug!(mode = %mode, bytes = document.len(), "document rendered");
    Ok(document)
}

/// Appends `.html` unless the path already ends in `.html`/`.htm` or has no
/// file name component.
#[must_use]
pub fn output_path(path: &Path) -> PathBuf {
    let has_html_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));
    if has_html_extension || path.file_name().is_none() {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".html");
    PathBuf::from(name)
}

pub(crate) fn write_document(path: &Path, document: &str) -> VisResult<PathBuf> {
    let target = output_path(path);
    std::fs::write(&target, document)?;
    info!(path = %target.display(), bytes = document.len(), "visualization saved");
    Ok(target)
}
