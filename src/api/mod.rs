//! Composer facade: builds, renders and saves a visualization.

mod config;
mod description;
mod diagnostics;
mod render;
mod visualization;

pub use config::VisConfig;
pub use description::{
    ConditionDescription, ElementDescription, PopoverDescription, VIS_DESCRIPTION_JSON_SCHEMA_V1,
    VisDescription, VisDescriptionJsonContractV1,
};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use render::{RenderMode, RenderOutput, RenderPayload, output_path};
pub use visualization::{ImageSource, VisState, Visualization};
