//! `${NAME}` placeholder resolution.
//!
//! Placeholders are replaced with environment values in every string of the
//! tree. Names follow `[A-Za-z_][A-Za-z0-9_]*`; anything else that merely
//! looks like `${...}` is left as written. Substituted text is not rescanned.

use crate::env::Environment;
use crate::error::{ConfigError, Result};
use regex_lite::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
});

/// Resolve placeholders throughout a tree.
///
/// Fails on the first placeholder whose variable is not set; no partially
/// resolved tree is returned.
pub fn resolve_placeholders<E: Environment + ?Sized>(value: Value, env: &E) -> Result<Value> {
    resolve_at(value, env, &mut String::new())
}

/// Resolve placeholders in a single string.
pub fn resolve_str<E: Environment + ?Sized>(s: &str, env: &E) -> Result<String> {
    substitute(s, env, "")
}

fn resolve_at<E: Environment + ?Sized>(value: Value, env: &E, path: &mut String) -> Result<Value> {
    match value {
        Value::String(s) => {
            if s.contains("${") {
                substitute(&s, env, path).map(Value::String)
            } else {
                Ok(Value::String(s))
            }
        }
        Value::Object(map) => {
            let mut resolved = Map::with_capacity(map.len());
            for (key, child) in map {
                let len = path.len();
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(&key);
                let child = resolve_at(child, env, path)?;
                path.truncate(len);
                resolved.insert(key, child);
            }
            Ok(Value::Object(resolved))
        }
        Value::Array(items) => {
            let mut resolved = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{}]", index));
                resolved.push(resolve_at(item, env, path)?);
                path.truncate(len);
            }
            Ok(Value::Array(resolved))
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => Ok(value),
    }
}

fn substitute<E: Environment + ?Sized>(s: &str, env: &E, path: &str) -> Result<String> {
    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(s) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = env
            .get(name.as_str())
            .ok_or_else(|| ConfigError::missing_variable(name.as_str(), path))?;
        out.push_str(&s[last..whole.start()]);
        out.push_str(&value);
        last = whole.end();
    }
    out.push_str(&s[last..]);
    Ok(out)
}
