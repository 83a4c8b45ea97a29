#![deny(
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
    clippy::missing_errors_doc
)]

//! Pattern-driven field extraction and structural diffing.
//!
//! A [`Template`] maps keywords (device families, log flavours) to field
//! trees of regex patterns. [`Discoverer`] picks the keyword a text belongs
//! to, [`CompiledFieldTree`] pulls the fields out of it, and [`compare`]
//! diffs a reference extraction against a target extraction.
//!
//! Everything here is pure: no logging, no shared mutable state, and no file
//! access apart from [`Template::load`].

pub mod compare;
pub mod discover;
pub mod error;
pub mod extract;
pub mod template;
pub mod tree;
pub mod value;

pub use compare::{Comparison, compare};
pub use discover::{Discoverer, discover};
pub use error::{Error, ExtractionError, Result, TemplateError};
pub use extract::{CompiledFieldTree, extract, extract_fields};
pub use template::{FieldSpec, FieldTree, Template, TemplateFormat};
pub use tree::{flatten_leaves, prune, prune_in_place};
pub use value::{DEFAULT_KEYWORD_LABEL, NOT_FOUND, Tree, Value, WILDCARD};
