//! Configuration resolver.
//!
//! Builds one configuration tree from a directory of YAML files:
//! 1. **Dotenv** - `KEY=VALUE` lines from `.env` seed the environment
//! 2. **Merge** - `*.yaml` / `*.yml` files deep-merge in filename order
//! 3. **Placeholders** - `${NAME}` tokens are replaced with environment values
//! 4. **Validation** - dot-separated required keys must be present and non-null
//!
//! ## Merge Strategy
//! - Mappings merge key by key, recursively
//! - Scalars, sequences and nulls from later files replace earlier values
//!
//! ## Environment Variables
//! - `CHIMERA_CONFIG_DIR` - Config directory (default: `config`)
//! - `CHIMERA_DOTENV_PATH` - Dotenv file (default: `.env`)

mod dotenv;
mod files;
mod loader;
mod merge;
mod placeholders;
mod validate;

pub use dotenv::parse_dotenv;
pub use files::{YamlSources, discover_yaml_files, load_yaml_file, load_yaml_files, load_yaml_sources};
pub use loader::{
    CONFIG_DIR_ENV, ConfigLoader, ConfigPaths, DEFAULT_CONFIG_DIR, DEFAULT_DOTENV_PATH,
    DOTENV_PATH_ENV, LoadedConfig, expand_home, load_config,
};
pub use merge::{deep_merge, deep_merge_all, merge_into};
pub use placeholders::{resolve_placeholders, resolve_str};
pub use validate::{get_by_path, validate_required_keys};
