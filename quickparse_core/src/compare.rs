//! Structural comparison of two parsed trees.

use serde::{Deserialize, Serialize};

use crate::tree::prune;
use crate::value::{Tree, Value};

/// Matches and deviations between a reference tree and a target tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub matches: Tree,
    pub mismatches: Tree,
}

impl Comparison {
    /// Whether the target deviates from the reference anywhere.
    #[must_use]
    pub fn has_mismatches(&self) -> bool {
        !self.mismatches.is_empty()
    }
}

/// Compare `target` against `reference`.
///
/// Rules, applied recursively:
/// - key in both, both maps: recurse.
/// - key in both, equal values: match (target's value).
/// - key in both, otherwise: mismatch with target's value. This includes a
///   map on one side and a scalar on the other.
/// - key only in `reference`: mismatch with `"NOT FOUND"`.
/// - key only in `target`: mismatch with target's value.
///
/// Both outputs are pruned. Never fails.
#[must_use]
pub fn compare(reference: &Tree, target: &Tree) -> Comparison {
    let mut matches = Tree::new();
    let mut mismatches = Tree::new();
    compare_into(reference, target, &mut matches, &mut mismatches);

    Comparison {
        matches: prune(matches),
        mismatches: prune(mismatches),
    }
}

fn compare_into(reference: &Tree, target: &Tree, matches: &mut Tree, mismatches: &mut Tree) {
    for (key, ref_value) in reference {
        let Some(targ_value) = target.get(key) else {
            mismatches.insert(key.clone(), Value::not_found());
            continue;
        };

        match (ref_value, targ_value) {
            (Value::Map(ref_child), Value::Map(targ_child)) => {
                let mut child_matches = Tree::new();
                let mut child_mismatches = Tree::new();
                compare_into(ref_child, targ_child, &mut child_matches, &mut child_mismatches);
                matches.insert(key.clone(), Value::Map(child_matches));
                mismatches.insert(key.clone(), Value::Map(child_mismatches));
            }
            _ if ref_value == targ_value => {
                matches.insert(key.clone(), targ_value.clone());
            }
            _ => {
                mismatches.insert(key.clone(), targ_value.clone());
            }
        }
    }

    for (key, targ_value) in target {
        if !reference.contains_key(key) {
            mismatches.insert(key.clone(), targ_value.clone());
        }
    }
}
