//! Lowering of extension fields into the target tool's schema.
//!
//! Two passes run over a merged configuration:
//! - `instruction_sets` + `enhanced_path_instructions` become plain
//!   `reviews.path_instructions` entries, rendering referenced sets through the
//!   template engine
//! - `rule_collections` contribute their packages to
//!   `reviews.tools.ast-grep.packages`; that list and `rule_dirs` are de-duplicated
//!
//! Extension fields are always removed from the result.

use super::types::{
    ENHANCED_PATH_INSTRUCTIONS, EnhancedPathInstruction, Fragment, INSTRUCTION_SETS,
    InstructionSet, InstructionSource, RULE_COLLECTIONS, RuleCollection,
};
use crate::error::{ConfigError, Result};
use crate::template;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::{debug, info};

/// Tool key receiving rule collection packages.
pub const AST_GREP: &str = "ast-grep";

/// Expand extension fields of a merged configuration.
///
/// Path instruction entries and instruction sets that cannot be decoded are
/// skipped; only a wrongly shaped container is an error.
pub fn expand(merged: Fragment) -> Result<Fragment> {
    let mut config = merged;

    let instruction_sets = take_extension(&mut config, INSTRUCTION_SETS);
    let enhanced = take_extension(&mut config, ENHANCED_PATH_INSTRUCTIONS);
    let rule_collections = take_extension(&mut config, RULE_COLLECTIONS);

    if let (Some(sets), Some(entries)) = (instruction_sets, enhanced) {
        let sets: Map<String, Value> = decode(INSTRUCTION_SETS, sets)?;
        let entries: Vec<Value> = decode(ENHANCED_PATH_INSTRUCTIONS, entries)?;
        lower_path_instructions(&mut config, &sets, entries)?;
    }

    if let Some(collections) = rule_collections {
        let collections: Map<String, Value> = decode(RULE_COLLECTIONS, collections)?;
        lower_rule_collections(&mut config, collections)?;
    }

    Ok(config)
}

fn lower_path_instructions(
    config: &mut Fragment,
    sets: &Map<String, Value>,
    entries: Vec<Value>,
) -> Result<()> {
    let reviews = mapping_entry(config, "reviews", "reviews")?;
    let path_instructions =
        list_entry(reviews, "path_instructions", "reviews.path_instructions")?;

    for raw in entries {
        let entry: EnhancedPathInstruction = match serde_json::from_value(raw) {
            Ok(entry) => entry,
            Err(error) => {
                debug!(%error, "Skipping malformed path instruction");
                continue;
            }
        };

        let instructions = match entry.instructions {
            InstructionSource::Text(text) => text,
            InstructionSource::Reference(reference) => match instruction_set(sets, &reference.set)
            {
                Some(set) => template::render(&set.instructions, &reference.params()),
                None => {
                    // TODO: surface unknown instruction set references as a warning once callers can opt in
                    debug!(
                        path = %entry.path,
                        instruction_set = %reference.set,
                        "Skipping path instruction with unknown instruction set"
                    );
                    continue;
                }
            },
        };
        path_instructions.push(json!({
            "path": entry.path,
            "instructions": instructions,
        }));
    }

    Ok(())
}

/// Look up and decode a single instruction set. Malformed sets count as missing.
fn instruction_set(sets: &Map<String, Value>, name: &str) -> Option<InstructionSet> {
    let raw = sets.get(name)?;
    match serde_json::from_value(raw.clone()) {
        Ok(set) => Some(set),
        Err(error) => {
            debug!(instruction_set = %name, %error, "Ignoring malformed instruction set");
            None
        }
    }
}

fn lower_rule_collections(
    config: &mut Fragment,
    collections: Map<String, Value>,
) -> Result<()> {
    let reviews = mapping_entry(config, "reviews", "reviews")?;
    let tools = mapping_entry(reviews, "tools", "reviews.tools")?;
    let ast_grep = mapping_entry(tools, AST_GREP, "reviews.tools.ast-grep")?;

    let mut packages = existing_list(ast_grep, "packages", "reviews.tools.ast-grep.packages")?;
    let rule_dirs = existing_list(ast_grep, "rule_dirs", "reviews.tools.ast-grep.rule_dirs")?;

    for (name, raw) in collections {
        let collection: RuleCollection = decode(RULE_COLLECTIONS, raw)?;

        if let Some(collection_packages) = collection.packages {
            packages.extend(collection_packages.into_iter().map(Value::String));
        }

        info!(
            collection = %name,
            rules = collection.rules.len(),
            "Processing rules from collection"
        );
    }

    ast_grep.insert("packages".to_string(), Value::Array(dedup(packages)));
    ast_grep.insert("rule_dirs".to_string(), Value::Array(dedup(rule_dirs)));

    Ok(())
}

/// Remove an extension field. `null` counts as absent.
fn take_extension(config: &mut Fragment, field: &str) -> Option<Value> {
    match config.shift_remove(field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

/// Decode an extension field into its typed shape.
fn decode<T: DeserializeOwned>(field: &'static str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| ConfigError::InvalidExtension { field, source })
}

/// Get a nested mapping, creating it when missing or null.
fn mapping_entry<'a>(
    map: &'a mut Fragment,
    key: &str,
    field: &'static str,
) -> Result<&'a mut Fragment> {
    let slot = map
        .entry(key)
        .or_insert_with(|| Value::Object(Fragment::new()));
    if slot.is_null() {
        *slot = Value::Object(Fragment::new());
    }
    slot.as_object_mut()
        .ok_or_else(|| ConfigError::invalid_shape(field, "a mapping"))
}

/// Get a nested list, creating it when missing or null.
fn list_entry<'a>(
    map: &'a mut Fragment,
    key: &str,
    field: &'static str,
) -> Result<&'a mut Vec<Value>> {
    let slot = map.entry(key).or_insert_with(|| Value::Array(Vec::new()));
    if slot.is_null() {
        *slot = Value::Array(Vec::new());
    }
    slot.as_array_mut()
        .ok_or_else(|| ConfigError::invalid_shape(field, "a list"))
}

/// Copy of a list already present in the mapping; empty when missing or null.
fn existing_list(map: &Fragment, key: &str, field: &'static str) -> Result<Vec<Value>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(_) => Err(ConfigError::invalid_shape(field, "a list")),
    }
}

/// Remove duplicates, keeping the first occurrence of each value.
fn dedup(values: Vec<Value>) -> Vec<Value> {
    let mut unique: Vec<Value> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
