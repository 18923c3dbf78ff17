//! The configuration pipeline.
//!
//! Loading runs four steps in order:
//! 1. `.env` variables are injected into the environment
//! 2. YAML files in the config directory are deep-merged
//! 3. `${NAME}` placeholders are resolved against the updated environment
//! 4. Required keys are validated
//!
//! The order matters: `.env` values are visible to placeholders, but never
//! replace variables that were already set unless override is requested.

use super::dotenv::parse_dotenv;
use super::files::load_yaml_sources;
use super::placeholders::resolve_placeholders;
use super::validate::validate_required_keys;
use crate::env::{Environment, ProcessEnv};
use crate::error::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming the config directory.
pub const CONFIG_DIR_ENV: &str = "CHIMERA_CONFIG_DIR";
/// Environment variable naming the dotenv file.
pub const DOTENV_PATH_ENV: &str = "CHIMERA_DOTENV_PATH";

pub const DEFAULT_CONFIG_DIR: &str = "config";
pub const DEFAULT_DOTENV_PATH: &str = ".env";

/// Where configuration is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// Directory holding the YAML files
    pub config_dir: PathBuf,
    /// Dotenv file; `None` skips the dotenv step
    pub dotenv_path: Option<PathBuf>,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::with_dirs(DEFAULT_CONFIG_DIR, Some(DEFAULT_DOTENV_PATH))
    }
}

impl ConfigPaths {
    /// Discover paths from `CHIMERA_CONFIG_DIR` and `CHIMERA_DOTENV_PATH`,
    /// falling back to `config/` and `.env`.
    pub fn discover() -> Self {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
        let dotenv_path = std::env::var(DOTENV_PATH_ENV)
            .unwrap_or_else(|_| DEFAULT_DOTENV_PATH.to_string());
        Self::with_dirs(config_dir, Some(dotenv_path))
    }

    /// Create paths explicitly. A leading `~/` is expanded to the home directory.
    pub fn with_dirs(config_dir: impl AsRef<Path>, dotenv_path: Option<impl AsRef<Path>>) -> Self {
        Self {
            config_dir: expand_home(config_dir.as_ref()),
            dotenv_path: dotenv_path.map(|p| expand_home(p.as_ref())),
        }
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Fully resolved configuration tree
    pub config: Value,
    /// Every key defined by the dotenv file, whether or not it took effect
    pub dotenv: BTreeMap<String, String>,
    /// YAML files in merge order
    pub files: Vec<PathBuf>,
}

/// Builder for the configuration pipeline.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    pub paths: ConfigPaths,
    required_keys: Vec<String>,
    override_dotenv: bool,
}

impl ConfigLoader {
    pub fn new(paths: ConfigPaths) -> Self {
        Self {
            paths,
            required_keys: Vec::new(),
            override_dotenv: false,
        }
    }

    /// Add dot-separated keys that must be present and non-null.
    pub fn require<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Let `.env` values replace variables that are already set.
    pub fn override_dotenv(mut self, override_dotenv: bool) -> Self {
        self.override_dotenv = override_dotenv;
        self
    }

    pub fn overrides_dotenv(&self) -> bool {
        self.override_dotenv
    }

    /// Run the pipeline against the process environment.
    pub fn load(&self) -> Result<LoadedConfig> {
        self.load_with_env(&mut ProcessEnv)
    }

    /// Run the pipeline against an explicit environment.
    pub fn load_with_env<E: Environment + ?Sized>(&self, env: &mut E) -> Result<LoadedConfig> {
        let dotenv = match self.paths.dotenv_path {
            Some(ref path) => parse_dotenv(path, self.override_dotenv, env)?,
            None => BTreeMap::new(),
        };

        let sources = load_yaml_sources(&self.paths.config_dir)?;
        let config = resolve_placeholders(sources.merged, env)?;

        if !self.required_keys.is_empty() {
            validate_required_keys(&config, &self.required_keys)?;
        }

        info!("Configuration loaded from {}", self.paths.config_dir.display());
        Ok(LoadedConfig {
            config,
            dotenv,
            files: sources.files,
        })
    }
}

/// Load, resolve and validate configuration using the process environment.
///
/// `dotenv_path` may point at a file that does not exist; that is not an error.
pub fn load_config<I, S>(
    config_dir: impl AsRef<Path>,
    dotenv_path: Option<impl AsRef<Path>>,
    required_keys: I,
    override_dotenv: bool,
) -> Result<Value>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ConfigLoader::new(ConfigPaths::with_dirs(config_dir, dotenv_path))
        .require(required_keys)
        .override_dotenv(override_dotenv)
        .load()
        .map(|loaded| loaded.config)
}
