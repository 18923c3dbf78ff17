//! Error type for configuration loading.
//!
//! Every failure of the resolver pipeline is a [`ConfigError`]. None of them
//! are recovered locally: they are meant to abort application startup with a
//! readable message.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration could not be loaded or validated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("No YAML configuration files found in: {}", .0.display())]
    NoConfigFiles(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Top-level YAML document must be a mapping in {}", .0.display())]
    NotAMapping(PathBuf),

    /// A `${NAME}` placeholder referenced an unset variable.
    ///
    /// `path` is the dotted location of the string being resolved, empty
    /// when resolving a bare value.
    #[error("Missing environment variable for placeholder: ${{{name}}}{}", at_path(.path))]
    MissingVariable { name: String, path: String },

    #[error("Missing required configuration keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    #[error("Configuration key not found: {0}")]
    KeyNotFound(String),
}

fn at_path(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" (at {})", path)
    }
}

impl ConfigError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn missing_variable(name: &str, path: &str) -> Self {
        Self::MissingVariable {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
