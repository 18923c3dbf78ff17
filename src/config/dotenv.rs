//! `.env` file parsing.
//!
//! Supports `KEY=VALUE`, `KEY="value"` and `KEY='value'`. Lines starting
//! with `#` and blank lines are ignored. Values are taken literally: no
//! interpolation, no multi-line values.

use crate::env::Environment;
use crate::error::{ConfigError, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Parse a dotenv file and inject its variables into `env`.
///
/// Variables already present in `env` are left alone unless `override_existing`
/// is set. The returned map holds every key defined in the file, whether or
/// not it took effect. A missing file yields an empty map.
pub fn parse_dotenv<E: Environment + ?Sized>(
    path: &Path,
    override_existing: bool,
    env: &mut E,
) -> Result<BTreeMap<String, String>> {
    let mut loaded = BTreeMap::new();
    if !path.exists() {
        debug!("No .env file found at {}", path.display());
        return Ok(loaded);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = parse_line(line) else {
            debug!("Skipping malformed .env line {}:{}", path.display(), line_no);
            continue;
        };

        if override_existing || !env.contains(key) {
            env.set(key, value);
        }
        debug!(key, "Loaded .env variable");
        loaded.insert(key.to_string(), value.to_string());
    }

    Ok(loaded)
}

/// Split a trimmed, non-comment line into key and unquoted value.
///
/// Returns `None` for lines that cannot become an environment variable.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = strip_quotes(value.trim());

    if key.is_empty() || key.contains('\0') || value.contains('\0') {
        return None;
    }
    Some((key, value))
}

/// Strip one layer of matching single or double quotes.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemoryEnv;
    use tempfile::TempDir;

    fn write_env(temp: &TempDir, content: &str) -> std::path::PathBuf {
        let path = temp.path().join(".env");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_skips_comments_blanks_and_malformed_lines() {
        let temp = TempDir::new().unwrap();
        let path = write_env(&temp, "KEY=value\n# comment\n\nBAD_LINE_NO_EQUALS\n");
        let mut env = MemoryEnv::new();

        let loaded = parse_dotenv(&path, false, &mut env).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("KEY").map(String::as_str), Some("value"));
        assert!(!env.contains("BAD_LINE_NO_EQUALS"));
        assert_eq!(env.get("KEY").as_deref(), Some("value"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let mut env = MemoryEnv::new();
        let loaded = parse_dotenv(&temp.path().join("nope.env"), false, &mut env).unwrap();
        assert!(loaded.is_empty());
        assert!(env.is_empty());
    }

    #[test]
    fn test_quotes_and_whitespace() {
        let temp = TempDir::new().unwrap();
        let path = write_env(
            &temp,
            "  DOUBLE = \"hello world\"  \nSINGLE='x=y'\nMIXED=\"oops'\nLONE=\"\nEMPTY=\n",
        );
        let mut env = MemoryEnv::new();

        let loaded = parse_dotenv(&path, false, &mut env).unwrap();

        assert_eq!(loaded["DOUBLE"], "hello world");
        assert_eq!(loaded["SINGLE"], "x=y");
        assert_eq!(loaded["MIXED"], "\"oops'");
        assert_eq!(loaded["LONE"], "\"");
        assert_eq!(loaded["EMPTY"], "");
    }

    #[test]
    fn test_existing_variables_are_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let path = write_env(&temp, "HOST=from-file\nPORT=8080\n");
        let mut env = MemoryEnv::from([("HOST", "from-env")]);

        let loaded = parse_dotenv(&path, false, &mut env).unwrap();

        // Reported as defined even though it did not take effect
        assert_eq!(loaded["HOST"], "from-file");
        assert_eq!(env.get("HOST").as_deref(), Some("from-env"));
        assert_eq!(env.get("PORT").as_deref(), Some("8080"));
    }

    #[test]
    fn test_override_replaces_existing_variables() {
        let temp = TempDir::new().unwrap();
        let path = write_env(&temp, "HOST=from-file\n");
        let mut env = MemoryEnv::from([("HOST", "from-env")]);

        parse_dotenv(&path, true, &mut env).unwrap();

        assert_eq!(env.get("HOST").as_deref(), Some("from-file"));
    }

    #[test]
    fn test_empty_key_is_skipped() {
        let temp = TempDir::new().unwrap();
        let path = write_env(&temp, "=value\n  = other\nOK=1\n");
        let mut env = MemoryEnv::new();

        let loaded = parse_dotenv(&path, false, &mut env).unwrap();

        assert_eq!(loaded.keys().collect::<Vec<_>>(), vec!["OK"]);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_values_are_not_interpolated() {
        let temp = TempDir::new().unwrap();
        let path = write_env(&temp, "A=1\nB=${A}\n");
        let mut env = MemoryEnv::new();

        parse_dotenv(&path, false, &mut env).unwrap();

        assert_eq!(env.get("B").as_deref(), Some("${A}"));
    }
}
