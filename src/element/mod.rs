//! Elements: id-bound visual targets owning an ordered list of conditions.

mod kind;

pub use kind::{ConditionPolicy, ElementKind};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::condition::{Condition, ConditionInput, ConditionKind, ConditionOrigin};
use crate::core::ArrayInput;
use crate::error::{VisError, VisResult};
use crate::extensions::{Popover, PopoverInput, PopoverKind};

/// One or more element ids; a single string is accepted wherever a list is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ElementIds(Vec<String>);

impl ElementIds {
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Requires at least one id and no empty ids.
    pub(crate) fn validated(self) -> VisResult<Vec<String>> {
        if self.0.is_empty() || self.0.iter().any(String::is_empty) {
            return Err(VisError::type_mismatch(
                "element_ids",
                "one or more non-empty strings",
            ));
        }
        Ok(self.0)
    }
}

impl From<&str> for ElementIds {
    fn from(id: &str) -> Self {
        Self(vec![id.to_owned()])
    }
}

impl From<String> for ElementIds {
    fn from(id: String) -> Self {
        Self(vec![id])
    }
}

impl From<Vec<String>> for ElementIds {
    fn from(ids: Vec<String>) -> Self {
        Self(ids)
    }
}

impl From<Vec<&str>> for ElementIds {
    fn from(ids: Vec<&str>) -> Self {
        Self(ids.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for ElementIds {
    fn from(ids: &[&str]) -> Self {
        Self(ids.iter().map(|id| (*id).to_owned()).collect())
    }
}

impl<'de> Deserialize<'de> for ElementIds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(String),
            Many(Vec<String>),
        }

        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(id) => Self(vec![id]),
            OneOrMany::Many(ids) => Self(ids),
        })
    }
}

/// Construction-time fields of an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementOptions {
    /// Image node showing this element's report; ignored by kinds bound
    /// through their report id.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub report_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tabular_data: Option<ArrayInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<ArrayInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale: Option<ArrayInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_levels: Option<ArrayInput>,
}

impl ElementOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_report_id(mut self, report_id: impl Into<String>) -> Self {
        self.report_id = report_id.into();
        self
    }

    #[must_use]
    pub fn with_table(mut self, rows: impl Into<ArrayInput>, headers: impl Into<ArrayInput>) -> Self {
        self.tabular_data = Some(rows.into());
        self.headers = Some(headers.into());
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

    fn construction_input(&self, description: &str) -> ConditionInput {
        ConditionInput {
            description: description.to_owned(),
            tabular_data: self.tabular_data.clone(),
            headers: self.headers.clone(),
            color_scale: self.color_scale.clone(),
            color_levels: self.color_levels.clone(),
            ..ConditionInput::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    #[serde(rename = "type")]
    kind: ElementKind,
    ids: Vec<String>,
    description: String,
    report_id: String,
    conditions: Vec<Condition>,
    popover: Option<Popover>,
    #[serde(skip)]
    bound_ids: Vec<String>,
    #[serde(skip)]
    time_len: usize,
    /// Ids as joined at construction; condition ids keep it after ids are released.
    #[serde(skip)]
    condition_prefix: String,
    /// Never decreases, so removed conditions do not free their ids.
    #[serde(skip)]
    next_condition: usize,
}

/// Where `attach_condition` placed a condition.
struct Attached {
    position: usize,
    companion: bool,
}

impl Element {
    /// Builds an element over a time axis of `time_len` steps. `ids` must
    /// already be validated; table and legend elements attach their single
    /// condition here.
    pub(crate) fn new(
        kind: ElementKind,
        ids: Vec<String>,
        description: impl Into<String>,
        options: &ElementOptions,
        time_len: usize,
    ) -> VisResult<Self> {
        let description = description.into();
        let (own_ids, report_id) = if kind.binds_by_report_id() {
            (vec![String::new()], ids.first().cloned().unwrap_or_default())
        } else {
            (ids.clone(), options.report_id.clone())
        };

        let condition_prefix = own_ids.join("_");
        let mut element = Self {
            kind,
            ids: own_ids,
            description,
            report_id,
            conditions: Vec::new(),
            popover: None,
            bound_ids: ids,
            time_len,
            condition_prefix,
            next_condition: 0,
        };

        if let Some(condition_kind) = kind.construction_condition() {
            let input = options.construction_input(&element.description);
            let built = Condition::create_kind(condition_kind, time_len, &input)?;
            let mut condition = built.condition;
            condition.mark_origin(ConditionOrigin::Construction);
            element.insert_condition(condition);
        }
        Ok(element)
    }

    /// Validates and attaches a condition named `kind_name`.
    ///
    /// Beyond the kind's cap a new condition goes in front of the last entry
    /// instead of after it. Dynamic-level and zonal conditions with a labelled
    /// color series are followed by a derived `Info` condition. Nothing is
    /// attached when validation fails.
    pub fn add_condition(&mut self, kind_name: &str, input: &ConditionInput) -> VisResult<&Condition> {
        let attached = self.attach_condition(kind_name, input)?;
        Ok(&self.conditions[attached.position])
    }

    /// Attaches a described condition, keeping the ids it was saved with.
    pub(crate) fn restore_condition(
        &mut self,
        kind_name: &str,
        input: &ConditionInput,
        id: Option<&str>,
        companion_id: Option<&str>,
    ) -> VisResult<()> {
        let attached = self.attach_condition(kind_name, input)?;
        if let Some(id) = id {
            self.conditions[attached.position].assign_id(id.to_owned());
        }
        if let (true, Some(id)) = (attached.companion, companion_id) {
            self.conditions[attached.position + 1].assign_id(id.to_owned());
        }
        Ok(())
    }

    /// Restores the id prefix and counter of a described element.
    pub(crate) fn restore_condition_ids(&mut self, prefix: Option<&str>, next: Option<usize>) {
        if let Some(prefix) = prefix {
            self.condition_prefix = prefix.to_owned();
        }
        if let Some(next) = next {
            self.next_condition = self.next_condition.max(next);
        }
    }

    fn attach_condition(&mut self, kind_name: &str, input: &ConditionInput) -> VisResult<Attached> {
        let policy = self.kind.policy();
        if policy.locked {
            return Err(VisError::ConditionsLocked {
                element: self.kind.name(),
            });
        }
        let condition_kind = ConditionKind::parse(kind_name)?;
        if !self.kind.allows(condition_kind) {
            return Err(VisError::ConditionNotAllowed {
                element: self.kind.name(),
                condition: condition_kind.name(),
            });
        }

        let built = Condition::create_kind(condition_kind, self.time_len, input)?;
        let position = self.insert_condition(built.condition);
        let companion = built.companion.is_some();
        if let Some(mut companion) = built.companion {
            companion.assign_id(self.next_condition_id());
            self.conditions.insert(position + 1, companion);
        }
        debug!(
            element = %self.kind,
            ids = ?self.bound_ids,
            condition = %condition_kind,
            count = self.conditions.len(),
            "condition attached"
        );
        Ok(Attached {
            position,
            companion,
        })
    }

    fn next_condition_id(&mut self) -> String {
        let id = format!("{}_{}", self.condition_prefix, self.next_condition);
        self.next_condition += 1;
        id
    }

    fn insert_condition(&mut self, mut condition: Condition) -> usize {
        condition.assign_id(self.next_condition_id());
        let len = self.conditions.len();
        let position = match self.kind.policy().max_conditions {
            Some(max) if max > 0 && len > max => len - 1,
            _ => len,
        };
        self.conditions.insert(position, condition);
        position
    }

    /// Resolves `kind_name` and attaches a popover, replacing any previous one.
    pub fn add_popover(&mut self, kind_name: &str, input: &PopoverInput) -> VisResult<&Popover> {
        let kind = PopoverKind::parse(kind_name)?;
        let popover = Popover::create(kind, self.time_len, input)?;
        Ok(&*self.popover.insert(popover))
    }

    pub fn remove_condition(&mut self, index: usize) -> VisResult<Condition> {
        if index >= self.conditions.len() {
            return Err(VisError::NotFound {
                what: "condition index",
                key: index.to_string(),
            });
        }
        Ok(self.conditions.remove(index))
    }

    pub fn remove_popover(&mut self) -> Option<Popover> {
        self.popover.take()
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Ids as serialized; `[""]` for kinds bound through their report id.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Ids reserved in the composer for this element.
    #[must_use]
    pub fn bound_ids(&self) -> &[String] {
        &self.bound_ids
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    #[must_use]
    pub fn condition(&self, index: usize) -> Option<&Condition> {
        self.conditions.get(index)
    }

    #[must_use]
    pub fn popover(&self) -> Option<&Popover> {
        self.popover.as_ref()
    }

    #[must_use]
    pub fn time_len(&self) -> usize {
        self.time_len
    }

    pub(crate) fn condition_prefix(&self) -> &str {
        &self.condition_prefix
    }

    pub(crate) fn next_condition(&self) -> usize {
        self.next_condition
    }

    /// Construction options that rebuild this element.
    #[must_use]
    pub fn options(&self) -> ElementOptions {
        let mut options = ElementOptions::default();
        if !self.kind.binds_by_report_id() {
            options.report_id = self.report_id.clone();
        }
        let construction = self
            .conditions
            .iter()
            .find(|condition| condition.origin() == ConditionOrigin::Construction);
        if let Some(condition) = construction {
            let input = condition.to_input();
            options.tabular_data = input.tabular_data;
            options.headers = input.headers;
            options.color_scale = input.color_scale;
            options.color_levels = input.color_levels;
        }
        options
    }

    pub(crate) fn release_id(&mut self, id: &str) {
        self.bound_ids.retain(|bound| bound != id);
        if !self.kind.binds_by_report_id() {
            self.ids.retain(|own| own != id);
        }
    }

    pub(crate) fn clear_report_id(&mut self) {
        self.report_id.clear();
    }

    /// Serialized form consumed by the runtime.
    pub fn to_value(&self) -> VisResult<Value> {
        serde_json::to_value(self).map_err(|err| VisError::Serialization(err.to_string()))
    }
}
