//! Flat-config resolution engine.
//!
//! A configuration is an ordered tree of fragments, lists and environment
//! functions. Resolution runs four stages:
//! 1. **Flatten** - expand lists and invoke functions, depth-first
//! 2. **Validate** - check every fragment on its own
//! 3. **Merge** - defaults-style deep merge, earlier values win
//! 4. **Expand** - lower `instruction_sets`, `enhanced_path_instructions` and
//!    `rule_collections` into the target schema
//!
//! ## Environment Variables
//! - `USAGI_CONFIG_PATH` - Explicit configuration source (skips discovery)

mod expand;
mod flatten;
mod loader;
mod merge;
mod resolver;
mod types;
mod validate;

pub use expand::{AST_GREP, expand};
pub use flatten::flatten;
pub use loader::{
    CONFIG_FILE_NAMES, CONFIG_PATH_ENV, ConfigLoader, ConfigPaths, find_config, load_config_file,
};
pub use merge::{defaults_merge, merge_all, merge_fragment};
pub use resolver::{process_env, resolve, resolve_with_process_env};
pub use types::*;
pub use validate::validate;
