use crate::template::{ScreenId, TemplateId};
use thiserror::Error;

/// Errors raised while constructing or re-checking a conversation template.
///
/// These are always reported before any script text is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Template name is required")]
    MissingName,

    #[error("Template '{0}' must contain at least one screen")]
    NoScreens(String),

    #[error("Screen {0} has no name")]
    MissingScreenName(ScreenId),

    #[error("Screen id {id} is used by both '{first}' and '{second}'")]
    DuplicateScreenId {
        id: ScreenId,
        first: String,
        second: String,
    },

    #[error("Screen name '{name}' is used by both {first} and {second}")]
    DuplicateScreenName {
        name: String,
        first: ScreenId,
        second: ScreenId,
    },

    #[error("Screen '{screen}' has trigger action '{action}' but no reaction")]
    MissingReaction { screen: String, action: String },
}

/// Errors that can occur while encoding an STF string table.
#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Row count {0} does not fit in a 4-byte field")]
    RowCountOverflow(usize),

    #[error("Row {row} has a {section} of {length} characters, which does not fit in a 4-byte field")]
    LengthOverflow {
        row: usize,
        section: &'static str,
        length: usize,
    },

    #[error("Failed to write string table: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when collecting or converting localized strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocalizationError {
    #[error("Template '{0}' is not in localization mode")]
    NotLocalized(String),

    #[error("{owner} has no localization key")]
    MissingKey { owner: String },

    #[error("'{reference}' is not a valid localization reference (expected <file>:<key>)")]
    MalformedKey { reference: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors reported by a [`TemplateSource`](crate::source::TemplateSource).
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Template {0} not found")]
    NotFound(TemplateId),

    #[error("Could not read template {id}: {source}")]
    Io {
        id: TemplateId,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse template JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stored template is invalid: {0}")]
    Invalid(#[from] ValidationError),
}

/// Errors surfaced by the [`Workbench`](crate::workbench::Workbench) orchestrator.
#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Localization(#[from] LocalizationError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
