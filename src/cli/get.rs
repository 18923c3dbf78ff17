//! Get subcommand: print a single configuration value.

use crate::config::{ConfigLoader, get_by_path};
use crate::env::Environment;
use crate::error::ConfigError;
use crate::format::{OutputFormat, render_value};
use anyhow::Result;
use clap::Args;

/// Arguments for the get subcommand
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Dot-separated key, e.g. `service.api.base_url`
    pub key: String,

    /// Output format for mappings and sequences (strings are printed raw)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

pub fn run_get<E: Environment + ?Sized>(
    loader: &ConfigLoader,
    args: &GetArgs,
    env: &mut E,
) -> Result<String> {
    let loaded = loader.load_with_env(env)?;
    let value = get_by_path(&loaded.config, &args.key)
        .ok_or_else(|| ConfigError::KeyNotFound(args.key.clone()))?;
    render_value(value, args.format)
}
