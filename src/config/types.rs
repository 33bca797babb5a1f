//! Configuration types and structures.
//!
//! A configuration is supplied as a tree of [`ConfigItem`]s: plain fragments,
//! nested lists, and functions of the environment. Fragments are kept as raw
//! JSON mappings so that any field of the target tool's schema passes through
//! untouched; only the extension fields get typed shapes.

use crate::error::{ConfigError, Result};
use crate::template::TemplateParams;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Extension field holding reusable instruction sets.
pub const INSTRUCTION_SETS: &str = "instruction_sets";
/// Extension field holding path instructions that may reference instruction sets.
pub const ENHANCED_PATH_INSTRUCTIONS: &str = "enhanced_path_instructions";
/// Extension field holding reusable rule collections.
pub const RULE_COLLECTIONS: &str = "rule_collections";

/// All extension fields, stripped from the final configuration.
pub const EXTENSION_KEYS: [&str; 3] = [INSTRUCTION_SETS, ENHANCED_PATH_INSTRUCTIONS, RULE_COLLECTIONS];

/// A single configuration mapping. Key order follows declaration order.
pub type Fragment = Map<String, Value>;

/// Environment variables handed to function items.
pub type Environment = BTreeMap<String, String>;

/// Signature of a function-valued configuration item.
pub type ConfigFn = dyn Fn(&Environment) -> anyhow::Result<ConfigItem> + Send + Sync;

/// A node in a flat-config tree.
#[derive(Clone)]
pub enum ConfigItem {
    /// A plain configuration mapping.
    Fragment(Fragment),
    /// An ordered list of items, nested arbitrarily deep.
    List(Vec<ConfigItem>),
    /// A function of the environment producing further items.
    Function(Arc<ConfigFn>),
}

impl ConfigItem {
    /// Wrap a closure as a function item.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Environment) -> anyhow::Result<ConfigItem> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Build a list item.
    pub fn list(items: impl IntoIterator<Item = ConfigItem>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Convert a parsed document into an item.
    ///
    /// Objects become fragments and arrays become lists (recursively).
    /// Any other value is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::Fragment(map)),
            Value::Array(items) => items
                .into_iter()
                .map(Self::from_value)
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            other => Err(ConfigError::invalid_config(format!(
                "Configuration entries must be mappings or lists, found {}",
                value_kind(&other)
            ))),
        }
    }
}

impl fmt::Debug for ConfigItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigItem::Fragment(map) => f.debug_tuple("Fragment").field(map).finish(),
            ConfigItem::List(items) => f.debug_tuple("List").field(items).finish(),
            ConfigItem::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<Fragment> for ConfigItem {
    fn from(fragment: Fragment) -> Self {
        Self::Fragment(fragment)
    }
}

impl From<Vec<ConfigItem>> for ConfigItem {
    fn from(items: Vec<ConfigItem>) -> Self {
        Self::List(items)
    }
}

impl TryFrom<Value> for ConfigItem {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

/// A named, reusable block of review instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Instruction text, may contain template placeholders.
    pub instructions: String,
}

/// A path instruction whose text is either inline or taken from an instruction set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedPathInstruction {
    /// Glob pattern for matching file paths.
    pub path: String,
    pub instructions: InstructionSource,
}

/// Where a path instruction's text comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstructionSource {
    /// Literal instruction text.
    Text(String),
    /// Reference to a named instruction set.
    Reference(InstructionRef),
}

/// Reference to an instruction set with optional template parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionRef {
    /// Name of the instruction set to use.
    #[serde(rename = "use")]
    pub set: String,

    /// Template parameters. Scalars are accepted and rendered as text.
    #[serde(default, rename = "with", skip_serializing_if = "Map::is_empty")]
    pub with: Map<String, Value>,
}

impl InstructionRef {
    /// Template parameters as text, in declaration order.
    pub fn params(&self) -> TemplateParams {
        self.with
            .iter()
            .map(|(key, value)| (key.clone(), param_text(value)))
            .collect()
    }
}

fn param_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A named bundle of static-analysis rules and rule packages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Rule identifiers. Informational only; not written to the output.
    #[serde(default)]
    pub rules: Vec<String>,

    /// External packages containing rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<String>>,
}

/// Human-readable name of a JSON value's kind, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
