//! ssv-rs: binds time-indexed simulation data onto named regions of an SVG
//! image and serializes the result for an external playback runtime.
//!
//! Elements (cells, lines, heatmaps, ...) own conditions; each condition
//! validates its arrays against the shared time axis before it is attached.

pub mod api;
pub mod condition;
pub mod core;
pub mod element;
pub mod error;
pub mod extensions;
pub mod image;
pub mod telemetry;

pub use api::{
    Diagnostic, DiagnosticKind, ImageSource, RenderMode, RenderOutput, RenderPayload, VisConfig,
    VisDescription, VisState, Visualization,
};
pub use condition::{Condition, ConditionInput, ConditionKind};
pub use element::{Element, ElementIds, ElementKind, ElementOptions};
pub use error::{ErrorCategory, VisError, VisResult};
pub use extensions::{Popover, PopoverInput, PopoverKind};
pub use image::ImageDocument;
