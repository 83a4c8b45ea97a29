//! Pruning and flattening of parsed trees.

use crate::value::{Tree, Value};

/// Remove every falsy branch from `tree`, returning the pruned tree.
///
/// Nested maps are pruned first and dropped if they end up empty. Lists are
/// kept or dropped as a whole; their elements are left alone.
#[must_use]
pub fn prune(mut tree: Tree) -> Tree {
    prune_in_place(&mut tree);
    tree
}

/// In-place variant of [`prune`].
pub fn prune_in_place(tree: &mut Tree) {
    tree.retain(|_, value| {
        if let Value::Map(child) = value {
            prune_in_place(child);
        }
        value.is_truthy()
    });
}

/// Collect every non-mapping value reachable from `tree`, depth first.
///
/// Lists are expanded one level: their scalar elements are yielded
/// individually and mappings inside them are descended into.
#[must_use]
pub fn flatten_leaves(tree: &Tree) -> Vec<&Value> {
    let mut leaves = Vec::new();
    collect_leaves(tree, &mut leaves);
    leaves
}

fn collect_leaves<'a>(tree: &'a Tree, leaves: &mut Vec<&'a Value>) {
    for value in tree.values() {
        match value {
            Value::Map(child) => collect_leaves(child, leaves),
            Value::List(items) => {
                for item in items {
                    if let Value::Map(child) = item {
                        collect_leaves(child, leaves);
                    } else {
                        leaves.push(item);
                    }
                }
            }
            _ => leaves.push(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::NOT_FOUND;

    fn tree(entries: Vec<(&str, Value)>) -> Tree {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn prune_empty_is_empty() {
        assert!(prune(Tree::new()).is_empty());
    }

    #[test]
    fn prune_drops_all_null_tree() {
        let t = tree(vec![
            ("a", Value::Null),
            ("b", Value::Map(tree(vec![("c", Value::Null)]))),
        ]);
        assert!(prune(t).is_empty());
    }

    #[test]
    fn prune_keeps_sentinel_and_values() {
        let t = tree(vec![
            ("found", Value::from("1.0")),
            ("missing", Value::from(NOT_FOUND)),
            ("blank", Value::from("")),
            ("zero", Value::Integer(0)),
            ("none", Value::List(Vec::new())),
        ]);
        let pruned = prune(t);
        assert_eq!(pruned.len(), 2);
        assert_eq!(pruned["found"], Value::from("1.0"));
        assert!(pruned["missing"].is_not_found());
    }

    #[test]
    fn prune_is_idempotent() {
        let t = tree(vec![
            ("a", Value::from("x")),
            (
                "b",
                Value::Map(tree(vec![
                    ("c", Value::Null),
                    ("d", Value::Map(tree(vec![("e", Value::Bool(false))]))),
                    ("f", Value::from("y")),
                ])),
            ),
        ]);
        let once = prune(t);
        let twice = prune(once.clone());
        assert_eq!(once, twice);
        assert_eq!(
            once["b"],
            Value::Map(tree(vec![("f", Value::from("y"))]))
        );
    }

    #[test]
    fn prune_leaves_list_elements_alone() {
        let t = tree(vec![("files", Value::List(vec![Value::Null, Value::from("a")]))]);
        let pruned = prune(t.clone());
        assert_eq!(pruned, t);
    }

    #[test]
    fn flatten_collects_depth_first() {
        let t = tree(vec![
            ("a", Value::from("1")),
            (
                "b",
                Value::Map(tree(vec![
                    ("c", Value::from("2")),
                    ("d", Value::List(vec![Value::from("3"), Value::from("4")])),
                ])),
            ),
            (
                "e",
                Value::List(vec![Value::Map(tree(vec![("f", Value::from("5"))]))]),
            ),
        ]);
        let leaves: Vec<_> = flatten_leaves(&t)
            .into_iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(leaves, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn flatten_empty_tree() {
        assert!(flatten_leaves(&Tree::new()).is_empty());
    }
}
