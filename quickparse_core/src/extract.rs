//! Recursive field extraction.
//!
//! Each leaf of a field tree is compiled once into a list of regex
//! alternatives (a single pattern is a list of one). Extraction searches the
//! whole text with each alternative in declared order and keeps capture
//! group 1 of the first one that matches, trimmed of surrounding whitespace.
//! Patterns are compiled in multi-line mode so `^` and `$` anchor to
//! physical lines.

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};

use crate::error::ExtractionError;
use crate::template::{FieldSpec, FieldTree, Template};
use crate::tree::prune;
use crate::value::{Tree, Value};

#[derive(Debug, Clone)]
enum CompiledSpec {
    Alternatives(Vec<Regex>),
    Nested(CompiledFieldTree),
}

/// A field tree whose patterns have been compiled and checked.
///
/// Immutable once built, so one instance can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct CompiledFieldTree {
    fields: IndexMap<String, CompiledSpec>,
}

impl CompiledFieldTree {
    /// Compile every pattern in `tree`.
    ///
    /// Fails on the first pattern that is not a valid regex or that does not
    /// have exactly one capture group.
    pub fn compile(tree: &FieldTree) -> Result<Self, ExtractionError> {
        let mut fields = IndexMap::with_capacity(tree.len());
        for (name, spec) in tree {
            let compiled = match spec {
                FieldSpec::Pattern(pattern) => {
                    CompiledSpec::Alternatives(vec![compile_pattern(pattern)?])
                }
                FieldSpec::Alternatives(patterns) => CompiledSpec::Alternatives(
                    patterns
                        .iter()
                        .map(|p| compile_pattern(p))
                        .collect::<Result<_, _>>()?,
                ),
                FieldSpec::Nested(child) => CompiledSpec::Nested(Self::compile(child)?),
            };
            fields.insert(name.clone(), compiled);
        }
        Ok(Self { fields })
    }

    /// Compile the field tree of `keyword`.
    ///
    /// A keyword that is missing from the template, or whose field tree is
    /// null, compiles to an empty tree that extracts nothing.
    pub fn for_keyword(template: &Template, keyword: &str) -> Result<Self, ExtractionError> {
        template
            .field_tree(keyword)
            .map_or_else(|| Ok(Self::default()), Self::compile)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Extract without pruning.
    ///
    /// The result mirrors the field tree exactly. Unmatched leaves hold
    /// `Null` when `collapse` is set and the `"NOT FOUND"` sentinel otherwise.
    #[must_use]
    pub fn extract_raw(&self, text: &str, collapse: bool) -> Tree {
        self.fields
            .iter()
            .map(|(name, spec)| {
                let value = match spec {
                    CompiledSpec::Nested(child) => Value::Map(child.extract_raw(text, collapse)),
                    CompiledSpec::Alternatives(patterns) => first_capture(patterns, text)
                        .map_or_else(
                            || {
                                if collapse {
                                    Value::Null
                                } else {
                                    Value::not_found()
                                }
                            },
                            Value::from,
                        ),
                };
                (name.clone(), value)
            })
            .collect()
    }

    /// Extract and prune. Sentinels survive pruning; `Null` leaves do not.
    #[must_use]
    pub fn extract(&self, text: &str, collapse: bool) -> Tree {
        prune(self.extract_raw(text, collapse))
    }
}

pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, ExtractionError> {
    let re = RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .map_err(|e| ExtractionError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

    // captures_len counts the implicit whole-match group
    let found = re.captures_len() - 1;
    if found != 1 {
        return Err(ExtractionError::CaptureGroups {
            pattern: pattern.to_string(),
            found,
        });
    }
    Ok(re)
}

/// Group 1 of the first pattern that matches. A group that did not take
/// part in the match reads as the empty string.
fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures(text).map(|caps| {
            caps.get(1)
                .map_or("", |m| m.as_str())
                .trim()
                .to_string()
        })
    })
}

/// Compile `tree` and extract it from `text`, pruned.
///
/// `None` stands for a keyword without a field tree and yields an empty tree.
pub fn extract_fields(
    tree: Option<&FieldTree>,
    text: &str,
    collapse: bool,
) -> Result<Tree, ExtractionError> {
    match tree {
        Some(tree) => Ok(CompiledFieldTree::compile(tree)?.extract(text, collapse)),
        None => Ok(Tree::new()),
    }
}

/// Extract the fields `template` defines for `keyword` from `text`.
pub fn extract(
    text: &str,
    template: &Template,
    keyword: &str,
    collapse: bool,
) -> Result<Tree, ExtractionError> {
    extract_fields(template.field_tree(keyword), text, collapse)
}
