//! Loading of pattern templates.
//!
//! A template maps each keyword to a field tree. Leaves of a field tree are
//! either a single regex or an ordered list of regex alternatives, and every
//! regex carries exactly one capture group:
//!
//! ```yaml
//! '*':
//!   Generic Version: 'Version (.*)'
//! Cisco IOS XE:
//!   Version:
//!     - 'Cisco IOS XE Software, Version (.*)'
//!     - 'Cisco IOS XE Software Version (\S+)'
//!   Interfaces:
//!     Management: 'mgmt0\s+(\S+)'
//! ```
//!
//! YAML and JSON documents of the same shape load to identical templates.
//! YAML anchors and merge keys are resolved, so keywords can share fields.
//! Patterns are not compiled here; see [`crate::extract`].
//!
//! Patterns use the syntax of the `regex` crate. Lookaround and
//! backreferences are not supported; a pattern that uses them fails to
//! compile with [`ExtractionError::InvalidPattern`].

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, TemplateError};
use crate::extract::compile_pattern;
use crate::value::WILDCARD;

/// Field name to pattern(s) for one keyword.
pub type FieldTree = IndexMap<String, FieldSpec>;

/// What a single field of a field tree extracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    /// One regex with one capture group.
    Pattern(String),
    /// Regexes tried in order; the first that matches wins.
    Alternatives(Vec<String>),
    /// A nested group of fields.
    Nested(FieldTree),
}

/// Serialized syntaxes a template can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateFormat {
    Yaml,
    Json,
}

impl TemplateFormat {
    /// Resolve a format from a file extension, with or without leading dot.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim().trim_start_matches('.').to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, TemplateError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext).ok_or_else(|| TemplateError::UnsupportedFormat(ext.to_string()))
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for TemplateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword to field tree, in document order.
///
/// Loaded once per run and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template {
    keywords: IndexMap<String, Option<FieldTree>>,
}

impl Template {
    /// Load a template from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let format = TemplateFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, format)
    }

    /// Parse a template document.
    ///
    /// The document must be a mapping at the top level; an empty document,
    /// a scalar or a sequence yields [`TemplateError::NotAMapping`]. YAML
    /// merge keys (`<<: *anchor`) are expanded before the shape is read.
    pub fn parse(content: &str, format: TemplateFormat) -> Result<Self, TemplateError> {
        let parse_err = |message: String| TemplateError::Parse { format, message };

        match format {
            TemplateFormat::Yaml => {
                let mut doc: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?;
                if !doc.is_mapping() {
                    return Err(TemplateError::NotAMapping);
                }
                doc.apply_merge().map_err(|e| parse_err(e.to_string()))?;
                serde_yaml::from_value(doc).map_err(|e| parse_err(e.to_string()))
            }
            TemplateFormat::Json => {
                let doc: serde_json::Value =
                    serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?;
                if !doc.is_object() {
                    return Err(TemplateError::NotAMapping);
                }
                serde_json::from_value(doc).map_err(|e| parse_err(e.to_string()))
            }
        }
    }

    /// Keywords in document order, wildcard included.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.keys().map(String::as_str)
    }

    /// The field tree for `keyword`, if the keyword exists and is non-null.
    #[must_use]
    pub fn field_tree(&self, keyword: &str) -> Option<&FieldTree> {
        self.keywords.get(keyword).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.contains_key(keyword)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Reject field names that collide with the wildcard or with `marker`,
    /// the name report builders use to tag each file with its keyword.
    pub fn validate_names(&self, marker: &str) -> Result<(), TemplateError> {
        for (keyword, tree) in &self.keywords {
            if let Some(tree) = tree {
                check_names(keyword, tree, marker)?;
            }
        }
        Ok(())
    }

    /// Compile every pattern of every keyword and collect the failures, one
    /// entry per bad pattern, in document order.
    #[must_use]
    pub fn check_patterns(&self) -> Vec<(String, ExtractionError)> {
        let mut failures = Vec::new();
        for (keyword, tree) in &self.keywords {
            if let Some(tree) = tree {
                collect_pattern_errors(keyword, tree, &mut failures);
            }
        }
        failures
    }

    /// A commented starter template.
    #[must_use]
    pub const fn scaffold() -> &'static str {
        SCAFFOLD
    }
}

impl FromIterator<(String, Option<FieldTree>)> for Template {
    fn from_iter<I: IntoIterator<Item = (String, Option<FieldTree>)>>(iter: I) -> Self {
        Self {
            keywords: iter.into_iter().collect(),
        }
    }
}

fn collect_pattern_errors(
    keyword: &str,
    tree: &FieldTree,
    failures: &mut Vec<(String, ExtractionError)>,
) {
    for spec in tree.values() {
        let patterns = match spec {
            FieldSpec::Pattern(pattern) => std::slice::from_ref(pattern),
            FieldSpec::Alternatives(patterns) => patterns.as_slice(),
            FieldSpec::Nested(child) => {
                collect_pattern_errors(keyword, child, failures);
                continue;
            }
        };
        for pattern in patterns {
            if let Err(e) = compile_pattern(pattern) {
                failures.push((keyword.to_string(), e));
            }
        }
    }
}

fn check_names(keyword: &str, tree: &FieldTree, marker: &str) -> Result<(), TemplateError> {
    for (field, spec) in tree {
        if field == WILDCARD || field == marker {
            return Err(TemplateError::ReservedFieldName {
                keyword: keyword.to_string(),
                field: field.clone(),
            });
        }
        if let FieldSpec::Nested(child) = spec {
            check_names(keyword, child, marker)?;
        }
    }
    Ok(())
}

const SCAFFOLD: &str = r"# Each top-level key is a keyword. A file belongs to the first keyword
# (in this order) that appears in it; '*' catches files matching none.
#
# Keyword:
#   Field: 'regex'          # exactly one () capture group
#   Field:                  # alternatives, first match wins
#     - 'regex one'
#     - 'regex two'
#   Group:                  # nested fields
#     Field: 'regex'
---
'*':
  Generic Version: 'Version (.*)'
C9200L:
  Version:
    - 'Cisco IOS XE Software, Version (.*)'
    - 'Cisco IOS XE Software Version (\S+)'
  MAC Address: 'MAC Address\s+:\s+(\S+)'
PA-3260:
  Version: 'sw-version:\s+(.*)'
";
