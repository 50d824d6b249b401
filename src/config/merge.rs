//! Fix-ups applied to the document figment produces from all layers.
//!
//! Figment merges mappings key by key and replaces everything else, which
//! is the override rule documents rely on. Two things stay local: a `null`
//! in a later layer deletes the key, and environment keys, which always
//! arrive lower-cased, are folded onto keys spelled with capitals
//! (`CORS_origins`).

use serde_json::{Map, Value};

/// Removes null values from every mapping, at any depth. Lists are left
/// as they are.
pub(crate) fn remove_nulls(map: &mut Map<String, Value>) {
    map.retain(|_, value| !value.is_null());
    for value in map.values_mut() {
        if let Value::Object(child) = value {
            remove_nulls(child);
        }
    }
}

/// Moves the value at a lower-cased `path` onto a sibling key that differs
/// only in case, if the document has one.
pub(crate) fn align_key_case(map: &mut Map<String, Value>, path: &[&str]) {
    let Some((segment, rest)) = path.split_first() else {
        return;
    };

    let canonical = map
        .keys()
        .find(|k| k.as_str() != *segment && k.eq_ignore_ascii_case(segment))
        .cloned();

    let key = match canonical {
        Some(canonical) if rest.is_empty() => {
            if let Some(value) = map.remove(*segment) {
                map.insert(canonical, value);
            }
            return;
        }
        Some(canonical) if !map.contains_key(*segment) => canonical,
        _ => (*segment).to_string(),
    };

    if let Some(Value::Object(child)) = map.get_mut(&key) {
        align_key_case(child, rest);
    }
}

/// Returns true if `path` names a key in `value`, ignoring ASCII case.
pub(crate) fn resolves(value: &Value, path: &[&str]) -> bool {
    let Some((segment, rest)) = path.split_first() else {
        return true;
    };
    let Value::Object(map) = value else {
        return false;
    };
    map.iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case(segment))
        .any(|(_, child)| resolves(child, rest))
}
