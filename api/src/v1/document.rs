//! Tree operations on a JSON document addressed by [`StorePath`].
//!
//! Objects are addressed by key and arrays by numeric index. Writing a key
//! that is not a valid index into an array turns the array into an object
//! keyed by the former indices.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::v1::StorePath;

/// Returns the value at `path`, or `None` when nothing (or `null`) is stored there.
pub fn get<'a>(root: &'a Value, path: &StorePath) -> Option<&'a Value> {
    let mut node = root;

    for segment in path.segments() {
        node = match node {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    (!node.is_null()).then_some(node)
}

/// Replaces the value at `path`, creating intermediate objects as needed.
///
/// Writing `null` deletes.
pub fn put(root: &mut Value, path: &StorePath, value: Value) {
    if value.is_null() {
        delete(root, path);
        return;
    }

    let mut node = root;
    for segment in path.segments() {
        node = child_mut(node, segment);
    }

    *node = value;
}

/// Stores `value` under a freshly generated, time-ordered key below `path`
/// and returns the key.
pub fn push(root: &mut Value, path: &StorePath, value: Value) -> String {
    let key = Uuid::now_v7().simple().to_string();
    put(root, &path.child(&key), value);
    key
}

/// Removes the value at `path`, returning whether anything was there.
pub fn delete(root: &mut Value, path: &StorePath) -> bool {
    let Some((last, parents)) = path.segments().split_last() else {
        let existed = !root.is_null();
        *root = Value::Null;
        return existed;
    };

    let mut node = root;
    for segment in parents {
        node = match node {
            Value::Object(map) => match map.get_mut(segment) {
                Some(child) => child,
                None => return false,
            },
            Value::Array(items) => match segment.parse::<usize>().ok() {
                Some(index) if index < items.len() => &mut items[index],
                _ => return false,
            },
            _ => return false,
        };
    }

    match node {
        Value::Object(map) => map.remove(last).is_some_and(|old| !old.is_null()),
        Value::Array(items) => match last.parse::<usize>() {
            Ok(index) if index < items.len() => !items[index].take().is_null(),
            _ => false,
        },
        _ => false,
    }
}

fn child_mut<'a>(node: &'a mut Value, key: &str) -> &'a mut Value {
    let slot = match (&*node, key.parse::<usize>()) {
        (Value::Array(items), Ok(index)) if index <= items.len() => Some(index),
        _ => None,
    };

    match (node, slot) {
        (Value::Array(items), Some(index)) => {
            if index == items.len() {
                items.push(Value::Null);
            }

            &mut items[index]
        }
        (node, _) => object_mut(node)
            .entry(key.to_owned())
            .or_insert(Value::Null),
    }
}

fn object_mut(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        let map = match node.take() {
            Value::Array(items) => indexed(items),
            _ => Map::new(),
        };

        *node = Value::Object(map);
    }

    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was replaced by an object"),
    }
}

fn indexed(items: Vec<Value>) -> Map<String, Value> {
    (items.into_iter().enumerate())
        .filter(|(_, item)| !item.is_null())
        .map(|(index, item)| (index.to_string(), item))
        .collect()
}
