//! Output formatting for resolved configuration.

use anyhow::Result;
use clap::ValueEnum;
use serde_json::Value;

/// Output format for printed configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    #[value(alias = "yml")]
    Yaml,
    Json,
}

/// Render a tree in the given format, ending with a newline.
pub fn render(value: &Value, format: OutputFormat) -> Result<String> {
    let mut out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Render a single value for shell use.
///
/// Strings are printed raw so `$(chimera-config get key)` works; everything
/// else goes through [`render`].
pub fn render_value(value: &Value, format: OutputFormat) -> Result<String> {
    match value {
        Value::String(s) => Ok(format!("{}\n", s)),
        other => render(other, format),
    }
}
