//! Environment variable stores.
//!
//! The dotenv step writes into an [`Environment`] and the placeholder
//! resolver reads from one. [`ProcessEnv`] is the live process environment;
//! [`MemoryEnv`] is a plain map that never touches process state.

use std::collections::BTreeMap;

/// A mutable key/value store of environment variables.
pub trait Environment {
    /// Get the value of a variable, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a variable, replacing any existing value.
    fn set(&mut self, key: &str, value: &str);

    /// Check if a variable is set.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// The process environment (`std::env`).
///
/// # Safety
///
/// [`Environment::set`] calls `std::env::set_var`. Writing the process
/// environment while another thread reads or writes it is undefined
/// behavior on most platforms, so loads through `ProcessEnv` must happen
/// before other threads start (application startup) or be serialized by the
/// caller with every other environment access. Use [`MemoryEnv`] where that
/// cannot be guaranteed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        // SAFETY: see the type-level docs; callers serialize environment
        // access or load before spawning threads.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    fn contains(&self, key: &str) -> bool {
        // Non-UTF-8 values still count as set.
        std::env::var_os(key).is_some()
    }
}

/// In-memory environment, for tests and embedders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Environment for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for MemoryEnv {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
