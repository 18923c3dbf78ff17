//! YAML file discovery and loading.
//!
//! Every `*.yaml` / `*.yml` file in the config directory is a source. Files
//! are merged in lexicographic filename order, so later names win on
//! conflicting scalars.

use super::merge::deep_merge_all;
use crate::error::{ConfigError, Result};
use serde::de::Error as _;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Merged YAML configuration with the files that produced it.
#[derive(Debug, Clone)]
pub struct YamlSources {
    /// Contributing files in merge order.
    pub files: Vec<PathBuf>,
    /// Deep-merged tree (always a mapping).
    pub merged: Value,
}

/// Check whether a path has a YAML extension.
fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// List YAML files in a directory, sorted by file name.
pub fn discover_yaml_files(config_dir: &Path) -> Result<Vec<PathBuf>> {
    if !config_dir.is_dir() {
        return Err(ConfigError::DirectoryNotFound(config_dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(config_dir).map_err(|e| ConfigError::read(config_dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::read(config_dir, e))?;
        let path = entry.path();
        if path.is_file() && is_yaml(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if files.is_empty() {
        return Err(ConfigError::NoConfigFiles(config_dir.to_path_buf()));
    }
    Ok(files)
}

/// Load one YAML file whose top level must be a mapping.
///
/// An empty document counts as an empty mapping. Merge keys (`<<: *anchor`)
/// are expanded, and every mapping key must be a string.
pub fn load_yaml_file(path: &Path) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
    let mut doc: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::parse(path, e))?;

    match doc {
        serde_yaml::Value::Mapping(_) => {}
        serde_yaml::Value::Null => return Ok(Map::new()),
        _ => return Err(ConfigError::NotAMapping(path.to_path_buf())),
    }

    doc.apply_merge().map_err(|e| ConfigError::parse(path, e))?;
    if let Some(message) = find_non_string_key(&doc, &mut String::new()) {
        return Err(ConfigError::parse(path, serde_yaml::Error::custom(message)));
    }

    match serde_json::to_value(doc) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ConfigError::NotAMapping(path.to_path_buf())),
        Err(e) => Err(ConfigError::parse(path, serde_yaml::Error::custom(e))),
    }
}

/// Describe the first mapping key that is not a string, if any.
fn find_non_string_key(value: &serde_yaml::Value, location: &mut String) -> Option<String> {
    match value {
        serde_yaml::Value::Mapping(mapping) => {
            for (key, child) in mapping {
                let Some(name) = key.as_str() else {
                    let shown = serde_yaml::to_string(key)
                        .map(|s| s.trim_end().to_string())
                        .unwrap_or_else(|_| format!("{:?}", key));
                    let at = if location.is_empty() { "top level" } else { location.as_str() };
                    return Some(format!("mapping key `{}` at {} is not a string", shown, at));
                };
                let len = location.len();
                if !location.is_empty() {
                    location.push('.');
                }
                location.push_str(name);
                let found = find_non_string_key(child, location);
                location.truncate(len);
                if found.is_some() {
                    return found;
                }
            }
            None
        }
        serde_yaml::Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                let len = location.len();
                location.push_str(&format!("[{}]", index));
                let found = find_non_string_key(item, location);
                location.truncate(len);
                if found.is_some() {
                    return found;
                }
            }
            None
        }
        serde_yaml::Value::Tagged(tagged) => find_non_string_key(&tagged.value, location),
        _ => None,
    }
}

/// Load and deep-merge every YAML file in `config_dir`, keeping the file list.
pub fn load_yaml_sources(config_dir: &Path) -> Result<YamlSources> {
    let files = discover_yaml_files(config_dir)?;

    let maps = files
        .iter()
        .map(|file| {
            let map = load_yaml_file(file)?;
            debug!("Loaded config file: {}", file.display());
            Ok(map)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(YamlSources {
        merged: deep_merge_all(maps),
        files,
    })
}

/// Load and deep-merge every YAML file in `config_dir`.
pub fn load_yaml_files(config_dir: &Path) -> Result<Value> {
    load_yaml_sources(config_dir).map(|sources| sources.merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_later_files_win() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.yaml"), "x: 1\ny:\n  p: 1\n").unwrap();
        std::fs::write(temp.path().join("b.yaml"), "y:\n  q: 2\nx: 2\n").unwrap();

        let merged = load_yaml_files(temp.path()).unwrap();
        assert_eq!(merged, json!({"x": 2, "y": {"p": 1, "q": 2}}));
    }

    #[test]
    fn test_yml_and_yaml_sort_together() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("10-base.yml"), "level: base\n").unwrap();
        std::fs::write(temp.path().join("20-local.yaml"), "level: local\n").unwrap();
        std::fs::write(temp.path().join("30-last.yml"), "level: last\n").unwrap();

        let sources = load_yaml_sources(temp.path()).unwrap();
        let names: Vec<_> = sources
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["10-base.yml", "20-local.yaml", "30-last.yml"]);
        assert_eq!(sources.merged, json!({"level": "last"}));
    }

    #[test]
    fn test_other_files_are_ignored() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("app.yaml"), "name: chimera\n").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "not: yaml").unwrap();
        std::fs::write(temp.path().join("app.yaml.bak"), "name: stale\n").unwrap();
        std::fs::create_dir(temp.path().join("nested.yaml")).unwrap();

        let sources = load_yaml_sources(temp.path()).unwrap();
        assert_eq!(sources.files.len(), 1);
        assert_eq!(sources.merged, json!({"name": "chimera"}));
    }

    #[test]
    fn test_missing_directory() {
        let temp = TempDir::new().unwrap();
        let err = load_yaml_files(&temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, ConfigError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        let err = load_yaml_files(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NoConfigFiles(_)));
    }

    #[test]
    fn test_top_level_list_is_rejected() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("list.yaml"), "- a\n- b\n").unwrap();

        let err = load_yaml_files(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping(_)));
        assert!(err.to_string().contains("list.yaml"));
    }

    #[test]
    fn test_empty_file_is_empty_mapping() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.yaml"), "").unwrap();
        std::fs::write(temp.path().join("b.yaml"), "# only a comment\n").unwrap();
        std::fs::write(temp.path().join("c.yaml"), "k: v\n").unwrap();

        let merged = load_yaml_files(temp.path()).unwrap();
        assert_eq!(merged, json!({"k": "v"}));
    }

    #[test]
    fn test_syntax_error_names_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("good.yaml"), "a: 1\n").unwrap();
        std::fs::write(temp.path().join("broken.yaml"), "a: [1, 2\n").unwrap();

        let err = load_yaml_files(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_merge_keys_are_expanded() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("app.yaml"),
            "defaults: &d {timeout: 10, retries: 3}\nservice: {<<: *d, timeout: 30}\n",
        )
        .unwrap();

        let merged = load_yaml_files(temp.path()).unwrap();
        assert_eq!(merged["service"], json!({"retries": 3, "timeout": 30}));
        assert_eq!(merged["defaults"], json!({"retries": 3, "timeout": 10}));
    }

    #[test]
    fn test_merge_key_list_is_expanded() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("app.yaml"),
            "a: &a {x: 1}\nb: &b {y: 2}\nc:\n  <<: [*a, *b]\n  z: 3\n",
        )
        .unwrap();

        let merged = load_yaml_files(temp.path()).unwrap();
        assert_eq!(merged["c"], json!({"x": 1, "y": 2, "z": 3}));
    }

    #[test]
    fn test_non_string_keys_are_rejected() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("keys.yaml"), "1: x\ntrue: y\n").unwrap();

        let err = load_yaml_files(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        let message = err.to_string();
        assert!(message.contains("keys.yaml"));
        assert!(message.contains("not a string"));
    }

    #[test]
    fn test_nested_non_string_key_names_location() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("ports.yaml"),
            "service:\n  ports:\n    8080: http\n",
        )
        .unwrap();

        let err = load_yaml_files(temp.path()).unwrap_err();
        assert!(err.to_string().contains("service.ports"));
    }

    #[test]
    fn test_integer_beyond_64_bits_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("big.yaml"), "big: 99999999999999999999999\n").unwrap();

        let err = load_yaml_files(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("big.yaml"));
    }

    #[test]
    fn test_quoted_numeric_keys_are_strings() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("codes.yaml"), "codes:\n  \"404\": missing\n").unwrap();

        let merged = load_yaml_files(temp.path()).unwrap();
        assert_eq!(merged, json!({"codes": {"404": "missing"}}));
    }
}
