use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The image root has no `viewBox`, so it will not scale to its container.
    MissingViewBox,
    /// No drawable carries an element id; the element was dropped.
    UnboundElementId,
    /// No drawable carries a cell's report id; the report id was cleared.
    UnboundReportId,
}

/// Non-fatal finding surfaced alongside a successful operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub id: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn missing_view_box() -> Self {
        Self {
            kind: DiagnosticKind::MissingViewBox,
            id: None,
            message: "image root has no viewBox attribute; it will not scale to fit its container"
                .to_owned(),
        }
    }

    pub(crate) fn unbound(kind: DiagnosticKind, id: &str) -> Self {
        let consequence = match kind {
            DiagnosticKind::UnboundReportId => "the report id was cleared",
            _ => "no data will be bound to it",
        };
        Self {
            kind,
            id: Some(id.to_owned()),
            message: format!("no path, circle, rect or ellipse carries id `{id}`; {consequence}"),
        }
    }
}
