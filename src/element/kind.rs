use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::condition::{ConditionKind, normalize_kind_name};
use crate::error::{VisError, VisResult};

/// Closed set of bindable element variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Cell,
    Line,
    Heatmap,
    Toggle,
    Report,
    Table,
    Legend,
}

/// Static condition policy of one element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionPolicy {
    pub allowed: &'static [ConditionKind],
    /// `None` means unbounded.
    pub max_conditions: Option<usize>,
    /// The single condition is attached at construction; later additions fail.
    pub locked: bool,
}

const CELL_POLICY: ConditionPolicy = ConditionPolicy {
    allowed: &[
        ConditionKind::Info,
        ConditionKind::Background,
        ConditionKind::StaticLevel,
        ConditionKind::DynamicLevel,
        ConditionKind::Logical,
        ConditionKind::ZonalY,
    ],
    max_conditions: None,
    locked: false,
};

const LINE_POLICY: ConditionPolicy = ConditionPolicy {
    allowed: &[ConditionKind::EqualY],
    max_conditions: Some(1),
    locked: false,
};

const HEATMAP_POLICY: ConditionPolicy = ConditionPolicy {
    allowed: &[ConditionKind::Rect],
    max_conditions: Some(1),
    locked: false,
};

const TOGGLE_POLICY: ConditionPolicy = ConditionPolicy {
    allowed: &[ConditionKind::Info, ConditionKind::ShowHide],
    max_conditions: Some(1),
    locked: false,
};

const REPORT_POLICY: ConditionPolicy = ConditionPolicy {
    allowed: &[ConditionKind::Info],
    max_conditions: None,
    locked: false,
};

const TABLE_POLICY: ConditionPolicy = ConditionPolicy {
    allowed: &[ConditionKind::TabularInfo],
    max_conditions: Some(1),
    locked: true,
};

const LEGEND_POLICY: ConditionPolicy = ConditionPolicy {
    allowed: &[ConditionKind::ColorScale],
    max_conditions: Some(1),
    locked: true,
};

impl ElementKind {
    pub const ALL: [Self; 7] = [
        Self::Cell,
        Self::Line,
        Self::Heatmap,
        Self::Toggle,
        Self::Report,
        Self::Table,
        Self::Legend,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cell => "cell",
            Self::Line => "line",
            Self::Heatmap => "heatmap",
            Self::Toggle => "toggle",
            Self::Report => "report",
            Self::Table => "table",
            Self::Legend => "legend",
        }
    }

    #[must_use]
    pub const fn policy(self) -> ConditionPolicy {
        match self {
            Self::Cell => CELL_POLICY,
            Self::Line => LINE_POLICY,
            Self::Heatmap => HEATMAP_POLICY,
            Self::Toggle => TOGGLE_POLICY,
            Self::Report => REPORT_POLICY,
            Self::Table => TABLE_POLICY,
            Self::Legend => LEGEND_POLICY,
        }
    }

    #[must_use]
    pub fn allows(self, condition: ConditionKind) -> bool {
        self.policy().allowed.contains(&condition)
    }

    /// Kinds bound to the image through `report_id` only; their own id list
    /// is a single empty placeholder.
    #[must_use]
    pub const fn binds_by_report_id(self) -> bool {
        matches!(self, Self::Report | Self::Table | Self::Legend)
    }

    /// Condition attached automatically when the element is constructed.
    #[must_use]
    pub const fn construction_condition(self) -> Option<ConditionKind> {
        match self {
            Self::Table => Some(ConditionKind::TabularInfo),
            Self::Legend => Some(ConditionKind::ColorScale),
            _ => None,
        }
    }

    /// Case-insensitive lookup by name.
    pub fn parse(name: &str) -> VisResult<Self> {
        let wanted = normalize_kind_name(name);
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| VisError::UnsupportedKind {
                family: "element",
                name: name.to_owned(),
            })
    }
}

impl FromStr for ElementKind {
    type Err = VisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_cells_and_reports_are_unbounded() {
        for kind in ElementKind::ALL {
            let unbounded = kind.policy().max_conditions.is_none();
            assert_eq!(unbounded, matches!(kind, ElementKind::Cell | ElementKind::Report));
        }
    }

    #[test]
    fn locked_kinds_have_a_construction_condition() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.policy().locked, kind.construction_condition().is_some());
            if let Some(condition) = kind.construction_condition() {
                assert!(kind.allows(condition));
            }
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(ElementKind::parse("HeatMap").ok(), Some(ElementKind::Heatmap));
        assert!(matches!(
            ElementKind::parse("gauge"),
            Err(VisError::UnsupportedKind { family: "element", .. })
        ));
    }
}
