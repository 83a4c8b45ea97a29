//! Plain data returned by the engine.
//!
//! Parsed trees, comparison results and reports are all built from [`Value`],
//! which serializes to ordinary YAML/JSON mappings, sequences and scalars.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Placeholder for a field that is present in the template but did not match.
pub const NOT_FOUND: &str = "NOT FOUND";

/// Template keyword applied when no other keyword is discovered.
pub const WILDCARD: &str = "*";

/// Default name of the keyword marker that report builders add to each file.
pub const DEFAULT_KEYWORD_LABEL: &str = "Keyword";

/// An insertion-ordered mapping of names to values.
pub type Tree = IndexMap<String, Value>;

/// A node of a parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
    List(Vec<Self>),
    Map(Tree),
}

impl Value {
    /// The `"NOT FOUND"` sentinel.
    #[must_use]
    pub fn not_found() -> Self {
        Self::Text(NOT_FOUND.to_string())
    }

    /// Whether this value survives pruning.
    ///
    /// `Null`, `false`, `0`, the empty string, and empty lists or maps are
    /// falsy. The `"NOT FOUND"` sentinel is an ordinary non-empty string and
    /// therefore truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::Text(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
            Self::Map(map) => !map.is_empty(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Text(s) if s == NOT_FOUND)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&Tree> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<Tree> for Value {
    fn from(map: Tree) -> Self {
        Self::Map(map)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
