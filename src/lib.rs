//! Usagi: flat-config composition for `.coderabbit.yaml`.
//!
//! A configuration is an ordered list of fragments, nested lists and
//! environment-dependent functions. [`resolve`] flattens the tree, validates
//! each fragment, merges them with earlier values taking precedence, and
//! lowers the authoring extensions (`instruction_sets`,
//! `enhanced_path_instructions`, `rule_collections`) into the target schema.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod package;
pub mod presets;
pub mod template;
pub mod yaml;

pub use config::{ConfigItem, ConfigLoader, ConfigPaths, Environment, Fragment, resolve};
pub use error::{ConfigError, Result};
pub use yaml::{define_config, generate_yaml, to_yaml};
