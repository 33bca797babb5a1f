//! Utilities for shared configuration packages.
//!
//! A package is a directory tree holding configuration sources, either named
//! `usagi.config.*` or suffixed `*.usagi.*`, plus helpers to inspect the
//! reusable parts of a fragment.

use crate::config::{Fragment, INSTRUCTION_SETS, RULE_COLLECTIONS};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SOURCE_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Find all configuration sources under `root`, sorted by path.
///
/// Unreadable entries are skipped.
pub fn find_config_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_config_source(entry.file_name().to_str().unwrap_or_default()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

fn is_config_source(file_name: &str) -> bool {
    SOURCE_EXTENSIONS.iter().any(|ext| {
        file_name == format!("usagi.config.{}", ext) || file_name.ends_with(&format!(".usagi.{}", ext))
    })
}

/// Instruction set name to raw template text.
///
/// Sets without a text template are reported as `[Function: name]`.
pub fn extract_instruction_sets(config: &Fragment) -> BTreeMap<String, String> {
    let Some(Value::Object(sets)) = config.get(INSTRUCTION_SETS) else {
        return BTreeMap::new();
    };

    sets.iter()
        .map(|(name, set)| {
            let text = match set.get("instructions") {
                Some(Value::String(text)) => text.clone(),
                _ => format!("[Function: {}]", name),
            };
            (name.clone(), text)
        })
        .collect()
}

/// Rule collection name to its rule identifiers.
pub fn extract_rule_collections(config: &Fragment) -> BTreeMap<String, Vec<String>> {
    let Some(Value::Object(collections)) = config.get(RULE_COLLECTIONS) else {
        return BTreeMap::new();
    };

    collections
        .iter()
        .map(|(name, collection)| {
            let rules = collection
                .get("rules")
                .and_then(Value::as_array)
                .map(|rules| {
                    rules
                        .iter()
                        .filter_map(|rule| rule.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();
            (name.clone(), rules)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn fragment(value: Value) -> Fragment {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_is_config_source() {
        assert!(is_config_source("usagi.config.yaml"));
        assert!(is_config_source("usagi.config.json"));
        assert!(is_config_source("typescript.usagi.yml"));
        assert!(!is_config_source("usagi.config.toml"));
        assert!(!is_config_source("config.yaml"));
        assert!(!is_config_source("usagi.yaml"));
    }

    #[test]
    fn test_find_config_files_recursive() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("presets").join("web");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("usagi.config.yaml"), "{}").unwrap();
        std::fs::write(nested.join("react.usagi.json"), "{}").unwrap();
        std::fs::write(nested.join("notes.md"), "").unwrap();

        let files = find_config_files(temp.path());
        assert_eq!(
            files,
            vec![
                nested.join("react.usagi.json"),
                temp.path().join("usagi.config.yaml")
            ]
        );
    }

    #[test]
    fn test_find_config_files_missing_root() {
        let temp = TempDir::new().unwrap();
        assert!(find_config_files(&temp.path().join("missing")).is_empty());
    }

    #[test]
    fn test_extract_instruction_sets() {
        let config = fragment(json!({
            "instruction_sets": {
                "security": {"description": "Sec", "instructions": "Check {{area}}"},
                "broken": {"description": "no text"}
            }
        }));
        let sets = extract_instruction_sets(&config);
        assert_eq!(sets["security"], "Check {{area}}");
        assert_eq!(sets["broken"], "[Function: broken]");
    }

    #[test]
    fn test_extract_rule_collections() {
        let config = fragment(json!({
            "rule_collections": {
                "ts": {"rules": ["no-any", "no-eval"], "packages": ["pkg"]},
                "empty": {}
            }
        }));
        let collections = extract_rule_collections(&config);
        assert_eq!(collections["ts"], vec!["no-any", "no-eval"]);
        assert!(collections["empty"].is_empty());
    }

    #[test]
    fn test_extract_without_extensions() {
        let config = fragment(json!({"language": "en-US"}));
        assert!(extract_instruction_sets(&config).is_empty());
        assert!(extract_rule_collections(&config).is_empty());
    }
}
