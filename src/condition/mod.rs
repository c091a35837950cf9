//! Conditions: one validated data series (or pair of series) bound to an element.
//!
//! A condition is built from a [`ConditionInput`] by [`Condition::create`],
//! which resolves the kind name, checks that every required field is present
//! and validates each one against its [`ArraySpec`](descriptor::ArraySpec).

pub mod descriptor;
mod input;
mod kind;
mod payload;

pub use descriptor::{ArraySpec, LengthBinding};
pub use input::ConditionInput;
pub use kind::ConditionKind;
pub use payload::{
    BackgroundData, ColorScaleData, ConditionPayload, DynamicLevelData, EqualYData, InfoData,
    LogicalData, RectData, ShowHideData, StaticLevelData, TabularInfoData, ZonalYData,
};

pub(crate) use kind::normalize as normalize_kind_name;

use serde::Serialize;

use crate::core::validate_opacity;
use crate::error::VisResult;

/// Fields shared by every condition variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionCommon {
    pub description: String,
    pub unit: String,
    pub opacity: f64,
    pub report: bool,
    pub overlay: Option<String>,
    pub section_label: String,
}

impl ConditionCommon {
    fn from_input(input: &ConditionInput) -> VisResult<Self> {
        Ok(Self {
            description: input.description.clone(),
            unit: input.unit.clone(),
            opacity: validate_opacity(input.opacity)?,
            report: input.report,
            overlay: input.overlay.clone(),
            section_label: input.section_label.clone(),
        })
    }
}

/// How a condition came to be attached to its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionOrigin {
    /// Added through `add_condition` or a description.
    #[default]
    Caller,
    /// Derived from the color series of a dynamic-level or zonal condition.
    Companion,
    /// Attached by a table or legend element when it was constructed.
    Construction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    id: String,
    #[serde(flatten)]
    common: ConditionCommon,
    #[serde(flatten)]
    payload: ConditionPayload,
    #[serde(skip)]
    origin: ConditionOrigin,
}

/// A freshly built condition and the companion it may have derived.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionBuild {
    pub condition: Condition,
    pub companion: Option<Condition>,
}

impl Condition {
    /// Resolves `kind_name` and validates `input` against a time axis of
    /// `time_len` steps. The returned conditions have no id yet.
    pub fn create(kind_name: &str, time_len: usize, input: &ConditionInput) -> VisResult<ConditionBuild> {
        Self::create_kind(ConditionKind::parse(kind_name)?, time_len, input)
    }

    pub fn create_kind(
        kind: ConditionKind,
        time_len: usize,
        input: &ConditionInput,
    ) -> VisResult<ConditionBuild> {
        let common = ConditionCommon::from_input(input)?;
        let payload = ConditionPayload::build(kind, input, time_len)?;
        let companion = payload
            .companion_source()
            .map(|(color_data, description, unit)| Self {
                id: String::new(),
                common: ConditionCommon {
                    description: description.to_owned(),
                    unit: unit.to_owned(),
                    opacity: 1.0,
                    report: true,
                    overlay: None,
                    section_label: common.section_label.clone(),
                },
                payload: ConditionPayload::Info(InfoData {
                    data: color_data.clone(),
                }),
                origin: ConditionOrigin::Companion,
            });
        Ok(ConditionBuild {
            condition: Self {
                id: String::new(),
                common,
                payload,
                origin: ConditionOrigin::Caller,
            },
            companion,
        })
    }

    pub(crate) fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    pub(crate) fn mark_origin(&mut self, origin: ConditionOrigin) {
        self.origin = origin;
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> ConditionKind {
        self.payload.kind()
    }

    #[must_use]
    pub fn common(&self) -> &ConditionCommon {
        &self.common
    }

    #[must_use]
    pub fn payload(&self) -> &ConditionPayload {
        &self.payload
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.common.description
    }

    #[must_use]
    pub fn origin(&self) -> ConditionOrigin {
        self.origin
    }

    /// Raw fields that rebuild an equal condition through [`Condition::create`].
    #[must_use]
    pub fn to_input(&self) -> ConditionInput {
        let mut input = ConditionInput {
            description: self.common.description.clone(),
            unit: self.common.unit.clone(),
            opacity: self.common.opacity,
            report: self.common.report,
            overlay: self.common.overlay.clone(),
            section_label: self.common.section_label.clone(),
            ..ConditionInput::default()
        };
        self.payload.write_fields(&mut input);
        input
    }
}
