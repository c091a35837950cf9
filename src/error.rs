use thiserror::Error;

pub type VisResult<T> = Result<T, VisError>;

#[derive(Debug, Error)]
pub enum VisError {
    #[error("`{field}` has the wrong type: expected {expected}")]
    TypeMismatch { field: String, expected: String },

    #[error("`{field}` contains `{value}`, which cannot be cast to {target}")]
    TypeCast {
        field: String,
        target: &'static str,
        value: String,
    },

    #[error("`{field}` has an invalid shape: {reason}")]
    Shape { field: String, reason: String },

    #[error("`{field}` must be iterable")]
    Iteration { field: String },

    #[error("`{left}` has length {left_len} but `{right}` has length {right_len}")]
    LengthMismatch {
        left: String,
        left_len: usize,
        right: String,
        right_len: usize,
    },

    #[error("`{field}` is out of range: {reason}")]
    Range { field: String, reason: String },

    #[error("`{field}` contains `{value}`, which is not a hex color")]
    ColorFormat { field: String, value: String },

    #[error("field `{field}` is required for condition kind `{kind}`")]
    MissingField {
        field: &'static str,
        kind: &'static str,
    },

    #[error("{family} kind `{name}` is not a supported type")]
    UnsupportedKind { family: &'static str, name: String },

    #[error("condition kind `{condition}` is not allowed on `{element}` elements")]
    ConditionNotAllowed {
        element: &'static str,
        condition: &'static str,
    },

    #[error("`{element}` elements receive their condition at construction")]
    ConditionsLocked { element: &'static str },

    #[error("element id `{id}` already exists")]
    DuplicateId { id: String },

    #[error("{what} `{key}` not found")]
    NotFound { what: &'static str, key: String },

    #[error("invalid image document: {0}")]
    DocumentParse(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Error kinds independent of the concrete variant carrying the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    TypeMismatch,
    TypeCast,
    Shape,
    Iteration,
    LengthMismatch,
    Range,
    ColorFormat,
    MissingField,
    UnsupportedKind,
    DuplicateId,
    NotFound,
    DocumentParse,
    Serialization,
    Io,
}

impl VisError {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TypeMismatch { .. } => ErrorCategory::TypeMismatch,
            Self::TypeCast { .. } => ErrorCategory::TypeCast,
            Self::Shape { .. } => ErrorCategory::Shape,
            Self::Iteration { .. } => ErrorCategory::Iteration,
            Self::LengthMismatch { .. } => ErrorCategory::LengthMismatch,
            Self::Range { .. } => ErrorCategory::Range,
            Self::ColorFormat { .. } => ErrorCategory::ColorFormat,
            Self::MissingField { .. } => ErrorCategory::MissingField,
            Self::UnsupportedKind { .. }
            | Self::ConditionNotAllowed { .. }
            | Self::ConditionsLocked { .. } => ErrorCategory::UnsupportedKind,
            Self::DuplicateId { .. } => ErrorCategory::DuplicateId,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::DocumentParse(_) => ErrorCategory::DocumentParse,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Io(_) => ErrorCategory::Io,
        }
    }

    pub(crate) fn type_mismatch(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
        }
    }

    pub(crate) fn shape(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Shape {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn range(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Range {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
