use std::path::PathBuf;

use thiserror::Error;

use crate::template::TemplateFormat;

pub type Result<T> = std::result::Result<T, Error>;

/// The template source could not be turned into a [`crate::Template`].
///
/// Fatal to a run: without a template there is nothing to extract.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported template format: {0:?} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    #[error("failed to parse {format} template: {message}")]
    Parse {
        format: TemplateFormat,
        message: String,
    },

    #[error("template must map keywords to field trees")]
    NotAMapping,

    #[error("field name {field:?} under keyword {keyword:?} is reserved")]
    ReservedFieldName { keyword: String, field: String },
}

/// A field tree or keyword could not be applied to text.
///
/// Raised when patterns are compiled, which happens on first use rather
/// than at template load.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("pattern {pattern:?} must have exactly one capture group, found {found}")]
    CaptureGroups { pattern: String, found: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}
