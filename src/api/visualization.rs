use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::validate_size;
use super::render::{self, RenderMode, RenderOutput, RenderPayload};
use super::{Diagnostic, DiagnosticKind, VisConfig};
use crate::core::{ArrayInput, TimeSeries};
use crate::element::{Element, ElementIds, ElementKind, ElementOptions};
use crate::error::{VisError, VisResult};
use crate::image::ImageDocument;

/// Where the image markup came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    Path(PathBuf),
    Markup(String),
}

impl ImageSource {
    fn load(&self) -> VisResult<String> {
        match self {
            Self::Path(path) => Ok(std::fs::read_to_string(path)?),
            Self::Markup(markup) => Ok(markup.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisState {
    #[default]
    Building,
    /// At least one render has run; edits are still accepted.
    Rendered,
}

type ElementHandle = u64;

/// Top-level composer: owns the time axis, the image and the element registry.
///
/// Every element id is unique across the composer. Failed calls leave the
/// registry untouched.
#[derive(Debug, Clone)]
pub struct Visualization {
    time: TimeSeries,
    config: VisConfig,
    source: ImageSource,
    image: ImageDocument,
    elements: IndexMap<ElementHandle, Element>,
    reserved: IndexMap<String, ElementHandle>,
    next_handle: ElementHandle,
    diagnostics: Vec<Diagnostic>,
    state: VisState,
}

impl Visualization {
    /// Validates the time axis and config, then loads and parses the image.
    ///
    /// Root attributes other than `viewBox` and namespace declarations are
    /// dropped; a missing `viewBox` is reported as a diagnostic.
    pub fn new(
        x_series: &ArrayInput,
        x_series_unit: impl Into<String>,
        image: ImageSource,
        config: VisConfig,
    ) -> VisResult<Self> {
        let time = TimeSeries::new(x_series, x_series_unit)?;
        config.validate()?;
        let mut document = ImageDocument::parse(&image.load()?)?;
        document.strip_root_attributes();

        let mut diagnostics = Vec::new();
        if !document.has_view_box() {
            let diagnostic = Diagnostic::missing_view_box();
            warn!(message = %diagnostic.message, "image diagnostic");
            diagnostics.push(diagnostic);
        }
        debug!(time_len = time.len(), title = %config.title, "visualization created");

        Ok(Self {
            time,
            config,
            source: image,
            image: document,
            elements: IndexMap::new(),
            reserved: IndexMap::new(),
            next_handle: 0,
            diagnostics,
            state: VisState::Building,
        })
    }

    /// Convenience constructor over inline markup.
    pub fn from_markup(
        x_series: &ArrayInput,
        x_series_unit: impl Into<String>,
        markup: impl Into<String>,
        config: VisConfig,
    ) -> VisResult<Self> {
        Self::new(x_series, x_series_unit, ImageSource::Markup(markup.into()), config)
    }

    /// Registers a new element of kind `kind_name` under `ids`.
    ///
    /// Fails with `DuplicateId` if any id is already taken; nothing is
    /// reserved unless the element is built successfully.
    pub fn add_element(
        &mut self,
        kind_name: &str,
        ids: impl Into<ElementIds>,
        description: &str,
        options: &ElementOptions,
    ) -> VisResult<&mut Element> {
        let kind = ElementKind::parse(kind_name)?;
        let mut ids = ids.into().validated()?;
        let mut seen = IndexSet::new();
        ids.retain(|id| seen.insert(id.clone()));
        if let Some(taken) = ids.iter().find(|id| self.reserved.contains_key(id.as_str())) {
            return Err(VisError::DuplicateId { id: taken.clone() });
        }

        let element = Element::new(kind, ids.clone(), description, options, self.time.len())?;
        let handle = self.next_handle;
        self.next_handle += 1;
        for id in &ids {
            self.reserved.insert(id.clone(), handle);
        }
        debug!(kind = %kind, ids = ?ids, "element registered");
        let (index, _) = self.elements.insert_full(handle, element);
        Ok(&mut self.elements[index])
    }

    /// Releases `id`; the element holding it is dropped once it has no ids
    /// left. Returns `false` for unknown ids.
    pub fn delete_element(&mut self, id: &str) -> bool {
        let Some(handle) = self.reserved.shift_remove(id) else {
            return false;
        };
        let emptied = match self.elements.get_mut(&handle) {
            Some(element) => {
                element.release_id(id);
                element.bound_ids().is_empty()
            }
            None => false,
        };
        if emptied {
            self.elements.shift_remove(&handle);
        }
        debug!(id, dropped = emptied, "element id released");
        true
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        let handle = self.reserved.get(id)?;
        self.elements.get(handle)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        let handle = self.reserved.get(id)?;
        self.elements.get_mut(handle)
    }

    /// Elements in registration order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn reserved_ids(&self) -> impl Iterator<Item = &str> {
        self.reserved.keys().map(String::as_str)
    }

    #[must_use]
    pub fn time_series(&self) -> &TimeSeries {
        &self.time
    }

    #[must_use]
    pub fn config(&self) -> &VisConfig {
        &self.config
    }

    #[must_use]
    pub fn image_source(&self) -> &ImageSource {
        &self.source
    }

    /// The parsed image before annotation.
    #[must_use]
    pub fn image(&self) -> &ImageDocument {
        &self.image
    }

    #[must_use]
    pub fn state(&self) -> VisState {
        self.state
    }

    /// Diagnostics raised while constructing the visualization.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Renders with the configured fragment height.
    pub fn render(&mut self, mode: RenderMode) -> VisResult<RenderOutput> {
        let height = self.config.fragment_height;
        self.render_model(mode, height)
    }

    /// Annotates a fresh copy of the image, drops elements whose ids bind to
    /// nothing and serializes the result. A failed render leaves the registry
    /// as it was.
    pub fn render_model(&mut self, mode: RenderMode, height: f64) -> VisResult<RenderOutput> {
        let height = validate_size("height", height)?;
        self.rollback_on_error(|vis| vis.render_annotated(mode, height))
    }

    fn rollback_on_error<T>(&mut self, step: impl FnOnce(&mut Self) -> VisResult<T>) -> VisResult<T> {
        let elements = self.elements.clone();
        let reserved = self.reserved.clone();
        let result = step(self);
        if result.is_err() {
            self.elements = elements;
            self.reserved = reserved;
        }
        result
    }

    fn render_annotated(&mut self, mode: RenderMode, height: f64) -> VisResult<RenderOutput> {
        let mut diagnostics = self.diagnostics.clone();
        let image = self.annotate(&mut diagnostics);

        let mut element_data: IndexMap<String, Vec<serde_json::Value>> = ElementKind::ALL
            .into_iter()
            .map(|kind| (kind.name().to_owned(), Vec::new()))
            .collect();
        for element in self.elements.values() {
            if let Some(bucket) = element_data.get_mut(element.kind().name()) {
                bucket.push(element.to_value()?);
            }
        }

        let payload = RenderPayload {
            title: self.config.title.clone(),
            x_series: self.time.formatted(),
            x_series_unit: self.time.unit().to_owned(),
            font_size: self.config.font_size,
            element_data,
            sim_visual: image.to_markup(),
            svg_overlays: render::overlay_patterns()?,
        };
        let document =
            render::render_document(mode, &payload, &self.config.runtime_src, height)?;
        self.state = VisState::Rendered;
        Ok(RenderOutput {
            mode,
            document,
            payload,
            diagnostics,
        })
    }

    /// Writes the full document to `path`, adding `.html` when needed, and
    /// returns the path written.
    pub fn save(&mut self, path: impl AsRef<Path>) -> VisResult<PathBuf> {
        let output = self.render(RenderMode::Full)?;
        render::write_document(path.as_ref(), &output.document)
    }

    fn annotate(&mut self, diagnostics: &mut Vec<Diagnostic>) -> ImageDocument {
        let mut image = self.image.clone();
        image.prepare_layers();

        let mut worklist: IndexSet<String> = self.reserved.keys().cloned().collect();
        for element in self.elements.values() {
            if !element.report_id().is_empty() {
                worklist.insert(element.report_id().to_owned());
            }
        }

        for id in worklist {
            if image.bind_id(&id) > 0 {
                continue;
            }
            if self.delete_element(&id) {
                let diagnostic = Diagnostic::unbound(DiagnosticKind::UnboundElementId, &id);
                warn!(id = %id, message = %diagnostic.message, "element dropped");
                diagnostics.push(diagnostic);
            }
            let mut cleared = false;
            for element in self.elements.values_mut() {
                if !element.kind().binds_by_report_id() && element.report_id() == id {
                    element.clear_report_id();
                    cleared = true;
                }
            }
            if cleared {
                let diagnostic = Diagnostic::unbound(DiagnosticKind::UnboundReportId, &id);
                warn!(id = %id, message = %diagnostic.message, "report id cleared");
                diagnostics.push(diagnostic);
            }
        }
        image
    }
}
