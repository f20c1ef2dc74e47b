//! Dotted-path access into JSON maps
//!
//! Option and parameter names may address nested values: `a.b` refers to key
//! `b` of the object stored under `a`.

use serde_json::{Map, Value};

/// Sets `value` at `path`, creating (or replacing non-object) intermediate values.
pub(crate) fn set(map: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments = path.split('.').peekable();
    let mut current = map;

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), value);
            return;
        }

        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }

        let Value::Object(inner) = entry else {
            return;
        };

        current = inner;
    }
}

/// Returns the value stored at `path`, if any.
pub(crate) fn get<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let (parents, last) = split(path);
    let mut current = map;

    for segment in parents {
        current = current.get(segment)?.as_object()?;
    }

    current.get(last)
}

/// Checks whether a value is stored at `path`.
pub(crate) fn has(map: &Map<String, Value>, path: &str) -> bool {
    get(map, path).is_some()
}

/// Removes the value stored at `path`. Missing intermediate keys are ignored.
pub(crate) fn forget(map: &mut Map<String, Value>, path: &str) {
    let (parents, last) = split(path);
    let mut current = map;

    for segment in parents {
        current = match current.get_mut(segment).and_then(Value::as_object_mut) {
            Some(inner) => inner,
            None => return,
        };
    }

    current.remove(last);
}

fn split(path: &str) -> (Vec<&str>, &str) {
    match path.rsplit_once('.') {
        Some((parents, last)) => (parents.split('.').collect(), last),
        None => (Vec::new(), path),
    }
}
