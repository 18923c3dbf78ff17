//! Deep merge of configuration trees.
//!
//! Mappings are merged key by key, recursively. Everything else is replaced
//! by the later value: sequences are never merged element-wise, and an
//! explicit `null` in a later file replaces what came before.

use serde_json::{Map, Value};

/// Deep merge two values, with `overlay` taking precedence over `base`.
///
/// # Example
/// ```
/// use serde_json::json;
/// use chimera_config::config::deep_merge;
///
/// let base = json!({
///     "service": { "port": 8080, "host": "localhost" },
///     "agents": ["planner", "worker"]
/// });
/// let overlay = json!({
///     "service": { "port": 9000 },
///     "agents": ["judge"]
/// });
/// let result = deep_merge(base, overlay);
/// assert_eq!(
///     result,
///     json!({
///         "service": { "port": 9000, "host": "localhost" },
///         "agents": ["judge"]
///     })
/// );
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            merge_into(&mut base_map, overlay_map);
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Merge `overlay` into `base` in place.
pub fn merge_into(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, overlay_value) in overlay {
        let merged = match base.remove(&key) {
            Some(base_value) => deep_merge(base_value, overlay_value),
            None => overlay_value,
        };
        base.insert(key, merged);
    }
}

/// Merge mappings in order, later mappings taking precedence.
pub fn deep_merge_all(maps: impl IntoIterator<Item = Map<String, Value>>) -> Value {
    let merged = maps.into_iter().fold(Map::new(), |mut acc, map| {
        merge_into(&mut acc, map);
        acc
    });
    Value::Object(merged)
}
