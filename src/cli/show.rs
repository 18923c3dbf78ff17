//! Show subcommand: print the fully resolved configuration.

use crate::config::ConfigLoader;
use crate::env::Environment;
use crate::format::{OutputFormat, render};
use anyhow::Result;
use clap::Args;
use serde_json::json;

/// Arguments for the show subcommand
#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Also list the YAML files that were merged, in merge order
    ///
    /// YAML output gets one `# source:` comment per file; JSON output wraps
    /// the tree as `{"sources": [...], "config": {...}}`.
    #[arg(long)]
    pub sources: bool,
}

pub fn run_show<E: Environment + ?Sized>(
    loader: &ConfigLoader,
    args: &ShowArgs,
    env: &mut E,
) -> Result<String> {
    let loaded = loader.load_with_env(env)?;

    if !args.sources {
        return render(&loaded.config, args.format);
    }

    let files: Vec<String> = loaded
        .files
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    match args.format {
        OutputFormat::Yaml => {
            let mut out = String::new();
            for file in &files {
                out.push_str(&format!("# source: {}\n", file));
            }
            out.push_str(&render(&loaded.config, OutputFormat::Yaml)?);
            Ok(out)
        }
        OutputFormat::Json => render(
            &json!({ "sources": files, "config": loaded.config }),
            OutputFormat::Json,
        ),
    }
}
