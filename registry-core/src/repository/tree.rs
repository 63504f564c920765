//! JSON Tree Mirror
//!
//! Applies the hosted database's `put` / `patch` events to a local copy of
//! a subtree. The database has no empty objects and no nulls: writing
//! `null` deletes, and a parent left without children disappears too.

use serde_json::{Map, Value};

/// Split an event path (`"/"`, `"/gifts/abc"`) into segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Replace whatever is at `path` with `value`.
pub fn set_at(node: &mut Value, path: &[&str], value: Value) {
    match path.split_first() {
        None => *node = prune(value),
        Some((head, rest)) => {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            if let Value::Object(children) = node {
                let now_empty = {
                    let child = children.entry(head.to_string()).or_insert(Value::Null);
                    set_at(child, rest, value);
                    child.is_null()
                };
                if now_empty {
                    children.remove(*head);
                }
                if children.is_empty() {
                    *node = Value::Null;
                }
            }
        }
    }
}

/// Write each child of `update` under `path`, leaving siblings alone.
/// Keys may themselves be multi-segment paths.
pub fn merge_at(node: &mut Value, path: &[&str], update: Map<String, Value>) {
    for (key, value) in update {
        let mut target: Vec<&str> = path.to_vec();
        target.extend(split_path(&key));
        set_at(node, &target, value);
    }
}

/// Drop nulls and empty objects the way the database would on write.
fn prune(value: Value) -> Value {
    match value {
        Value::Object(children) => {
            let kept: Map<String, Value> = children
                .into_iter()
                .map(|(k, v)| (k, prune(v)))
                .filter(|(_, v)| !v.is_null())
                .collect();
            if kept.is_empty() {
                Value::Null
            } else {
                Value::Object(kept)
            }
        }
        other => other,
    }
}
