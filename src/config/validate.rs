//! Required-key validation over dot-separated paths.

use crate::error::{ConfigError, Result};
use serde_json::Value;

/// Look up a dot-separated path such as `service.api.base_url`.
///
/// Only mapping keys are addressed; there is no array indexing. A present
/// `null` is returned as `Some(&Value::Null)`.
pub fn get_by_path<'a>(config: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(config, |node, segment| node.as_object()?.get(segment))
}

/// Ensure every key in `required` is present and not null.
///
/// All missing keys are collected, in input order, into one error.
pub fn validate_required_keys<I, S>(config: &Value, required: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let missing: Vec<String> = required
        .into_iter()
        .filter(|key| matches!(get_by_path(config, key.as_ref()), None | Some(Value::Null)))
        .map(|key| key.as_ref().to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::MissingKeys(missing))
    }
}
