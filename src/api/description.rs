//! Declarative, serializable form of a visualization's build steps.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::error::Category;

use super::{ImageSource, VisConfig, Visualization};
use crate::condition::{Condition, ConditionInput, ConditionOrigin};
use crate::element::{ElementIds, ElementOptions};
use crate::error::{VisError, VisResult};
use crate::extensions::PopoverInput;

pub const VIS_DESCRIPTION_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDescription {
    #[serde(rename = "type")]
    pub kind: String,
    /// Saved condition id; derived from the element ids when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Saved id of the derived companion `Info`, if one follows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companion_id: Option<String>,
    #[serde(flatten)]
    pub fields: ConditionInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopoverDescription {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub fields: PopoverInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDescription {
    #[serde(rename = "type")]
    pub kind: String,
    pub ids: ElementIds,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub options: ElementOptions,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popover: Option<PopoverDescription>,
    /// Prefix of condition ids, which outlives partially deleted ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_condition: Option<usize>,
}

/// Everything needed to rebuild an equivalent [`Visualization`].
///
/// Companion conditions and the conditions tables and legends attach at
/// construction are not listed; they are derived again on rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisDescription {
    pub x_series: Vec<f64>,
    #[serde(default)]
    pub x_series_unit: String,
    pub image: ImageSource,
    #[serde(flatten)]
    pub config: VisConfig,
    #[serde(default)]
    pub elements: Vec<ElementDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisDescriptionJsonContractV1 {
    pub schema_version: u32,
    pub description: VisDescription,
}

fn json_error(context: &str, err: &serde_json::Error) -> VisError {
    match err.classify() {
        Category::Data => VisError::type_mismatch(context, err.to_string()),
        Category::Io | Category::Syntax | Category::Eof => {
            VisError::Serialization(format!("failed to parse {context} json: {err}"))
        }
    }
}

impl VisDescription {
    pub fn to_json_pretty(&self) -> VisResult<String> {
        let payload = VisDescriptionJsonContractV1 {
            schema_version: VIS_DESCRIPTION_JSON_SCHEMA_V1,
            description: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|err| {
            VisError::Serialization(format!("failed to serialize description contract v1: {err}"))
        })
    }

    /// Accepts the versioned wrapper written by [`Self::to_json_pretty`] or a
    /// bare description.
    pub fn from_json_str(input: &str) -> VisResult<Self> {
        let value: Value =
            serde_json::from_str(input).map_err(|err| json_error("description", &err))?;
        if value.get("schema_version").is_none() {
            return serde_json::from_value(value).map_err(|err| json_error("description", &err));
        }
        let payload: VisDescriptionJsonContractV1 =
            serde_json::from_value(value).map_err(|err| json_error("description", &err))?;
        if payload.schema_version != VIS_DESCRIPTION_JSON_SCHEMA_V1 {
            return Err(VisError::Serialization(format!(
                "unsupported description schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.description)
    }
}

/// Caller conditions only; companions are recorded through their parent.
fn describe_conditions(conditions: &[Condition]) -> Vec<ConditionDescription> {
    conditions
        .iter()
        .enumerate()
        .filter(|(_, condition)| condition.origin() == ConditionOrigin::Caller)
        .map(|(index, condition)| ConditionDescription {
            kind: condition.kind().name().to_owned(),
            id: Some(condition.id().to_owned()),
            companion_id: conditions
                .get(index + 1)
                .filter(|next| next.origin() == ConditionOrigin::Companion)
                .map(|next| next.id().to_owned()),
            fields: condition.to_input(),
        })
        .collect()
}

impl Visualization {
    /// Builds a visualization by replaying a description.
    pub fn from_description(description: &VisDescription) -> VisResult<Self> {
        let x_series = Value::from(description.x_series.clone());
        let mut vis = Self::new(
            &x_series,
            description.x_series_unit.clone(),
            description.image.clone(),
            description.config.clone(),
        )?;
        for entry in &description.elements {
            let element = vis.add_element(
                &entry.kind,
                entry.ids.clone(),
                &entry.description,
                &entry.options,
            )?;
            element.restore_condition_ids(entry.condition_prefix.as_deref(), None);
            for condition in &entry.conditions {
                element.restore_condition(
                    &condition.kind,
                    &condition.fields,
                    condition.id.as_deref(),
                    condition.companion_id.as_deref(),
                )?;
            }
            element.restore_condition_ids(None, entry.next_condition);
            if let Some(popover) = &entry.popover {
                element.add_popover(&popover.kind, &popover.fields)?;
            }
        }
        Ok(vis)
    }

    #[must_use]
    pub fn description(&self) -> VisDescription {
        let elements = self
            .elements()
            .map(|element| ElementDescription {
                kind: element.kind().name().to_owned(),
                ids: ElementIds::from(element.bound_ids().to_vec()),
                description: element.description().to_owned(),
                options: element.options(),
                conditions: describe_conditions(element.conditions()),
                popover: element.popover().map(|popover| PopoverDescription {
                    kind: popover.kind().name().to_owned(),
                    fields: popover.to_input(),
                }),
                condition_prefix: Some(element.condition_prefix().to_owned()),
                next_condition: Some(element.next_condition()),
            })
            .collect();
        VisDescription {
            x_series: self.time_series().values().to_vec(),
            x_series_unit: self.time_series().unit().to_owned(),
            image: self.image_source().clone(),
            config: self.config().clone(),
            elements,
        }
    }
}
