//! Resolution pipeline: flatten, validate, merge, expand.

use super::expand::expand;
use super::flatten::flatten;
use super::merge::merge_all;
use super::types::{ConfigItem, Environment, Fragment};
use super::validate::validate;
use crate::error::Result;
use tracing::debug;

/// Resolve a configuration tree into the final flat configuration.
///
/// Every flattened fragment is validated before anything is merged, so a
/// single invalid fragment aborts the whole resolution.
pub fn resolve(item: &ConfigItem, env: &Environment) -> Result<Fragment> {
    let fragments = flatten(item, env)?;

    for fragment in &fragments {
        validate(fragment)?;
    }

    let merged = merge_all(fragments);
    debug!(keys = merged.len(), "Merged configuration fragments");

    expand(merged)
}

/// Resolve against the current process environment.
pub fn resolve_with_process_env(item: &ConfigItem) -> Result<Fragment> {
    resolve(item, &process_env())
}

/// Snapshot of the process environment.
pub fn process_env() -> Environment {
    std::env::vars().collect()
}
