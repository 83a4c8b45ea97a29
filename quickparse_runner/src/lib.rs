#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

//! Folder orchestration around `quickparse_core`.
//!
//! Scans folders for log files, classifies and extracts them on a bounded
//! worker pool, validates the reference corpus, diffs targets against it,
//! and builds the brief and detailed reports.

pub mod error;
pub mod options;
pub mod pipeline;
pub mod pool;
pub mod report;
mod runner;
pub mod scan;

pub use error::{Result, RunError};
pub use options::{ReportFormat, RunOptions};
pub use report::{Report, Summary, Verdict};
pub use runner::{ERRORS_KEY, Runner};
