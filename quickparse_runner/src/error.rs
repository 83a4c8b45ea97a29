use std::path::PathBuf;

use quickparse_core::{ExtractionError, TemplateError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RunError>;

/// Failures that abort a folder run.
///
/// Reference files define ground truth, so every problem with them lands
/// here. Problems with individual target files are recorded in the report
/// instead.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("keywords in the template cannot be searched for: {0}")]
    Keywords(#[source] ExtractionError),

    #[error("patterns for keyword {keyword:?} failed to compile: {source}")]
    Patterns {
        keyword: String,
        #[source]
        source: ExtractionError,
    },

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("folder path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),

    #[error("no files in {folder} can be parsed (looked for {extensions})")]
    NoFiles { folder: PathBuf, extensions: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "no keyword found in reference file {file}; check that a keyword from the pattern file appears in it"
    )]
    ReferenceWithoutKeyword { file: String },

    #[error("duplicate reference files for keyword {keyword:?}: {first} and {second}")]
    DuplicateReference {
        keyword: String,
        first: String,
        second: String,
    },

    #[error("failed to parse reference file {file}: nothing was extracted")]
    EmptyReference { file: String },

    #[error("failed to parse reference file {file}: no match for {}", .fields.join(", "))]
    IncompleteReference { file: String, fields: Vec<String> },

    #[error("failed to start worker pool: {0}")]
    Pool(String),

    #[error("failed to render report as {format}: {message}")]
    Render {
        format: crate::options::ReportFormat,
        message: String,
    },
}
