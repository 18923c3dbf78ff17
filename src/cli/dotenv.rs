//! Dotenv subcommand: report what a dotenv file defines.
//!
//! Values are never printed, only key names and whether each one took
//! effect. A key is `shadowed` when the environment already held a different
//! value and override was not requested.

use crate::config::{ConfigLoader, parse_dotenv};
use crate::env::Environment;
use anyhow::Result;
use clap::Args;
use serde::Serialize;

/// Arguments for the dotenv subcommand
#[derive(Args, Debug, Default)]
pub struct DotenvArgs {
    /// Print JSON instead of aligned text
    #[arg(long)]
    pub json: bool,
}

/// Outcome for one dotenv key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DotenvEntry {
    pub key: String,
    pub applied: bool,
}

/// Parse the configured dotenv file and report each key.
pub fn dotenv_report<E: Environment + ?Sized>(
    loader: &ConfigLoader,
    env: &mut E,
) -> Result<Vec<DotenvEntry>> {
    let Some(ref path) = loader.paths.dotenv_path else {
        return Ok(Vec::new());
    };

    let loaded = parse_dotenv(path, loader.overrides_dotenv(), env)?;
    Ok(loaded
        .into_iter()
        .map(|(key, value)| {
            let applied = env.get(&key).as_deref() == Some(value.as_str());
            DotenvEntry { key, applied }
        })
        .collect())
}

pub fn run_dotenv<E: Environment + ?Sized>(
    loader: &ConfigLoader,
    args: &DotenvArgs,
    env: &mut E,
) -> Result<String> {
    let entries = dotenv_report(loader, env)?;

    if args.json {
        let mut out = serde_json::to_string_pretty(&entries)?;
        out.push('\n');
        return Ok(out);
    }

    let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
    let mut out = String::new();
    for entry in &entries {
        let status = if entry.applied { "applied" } else { "shadowed" };
        out.push_str(&format!("{:width$}  {}\n", entry.key, status, width = width));
    }
    Ok(out)
}
