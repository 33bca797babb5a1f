//! Flattening of configuration trees into an ordered list of fragments.
//!
//! Lists are expanded depth-first, function items are invoked once with the
//! environment and their result is flattened in place. Fragment contents are
//! never inspected here.

use super::types::{ConfigItem, Environment, Fragment};
use crate::error::Result;
use tracing::debug;

/// Flatten an item into fragments, preserving declaration order.
pub fn flatten(item: &ConfigItem, env: &Environment) -> Result<Vec<Fragment>> {
    let mut fragments = Vec::new();
    flatten_into(item, env, &mut fragments)?;
    debug!(count = fragments.len(), "Flattened configuration items");
    Ok(fragments)
}

fn flatten_into(item: &ConfigItem, env: &Environment, out: &mut Vec<Fragment>) -> Result<()> {
    match item {
        ConfigItem::Fragment(fragment) => out.push(fragment.clone()),
        ConfigItem::List(items) => {
            for item in items {
                flatten_into(item, env, out)?;
            }
        }
        ConfigItem::Function(f) => {
            debug!(position = out.len(), "Invoking function configuration item");
            let resolved = f(env)?;
            flatten_into(&resolved, env, out)?;
        }
    }
    Ok(())
}
