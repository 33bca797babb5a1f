//! Defaults-style deep merge for configuration fragments.
//!
//! Fragments are folded left to right. A value that is already set wins over
//! every later value for the same key; later fragments can only fill gaps.
//!
//! - Mappings on both sides are merged recursively under the same rule
//! - Scalars and arrays already set are kept as-is (arrays are atomic)
//! - A missing or `null` value is replaced by the incoming value

use super::types::Fragment;
use serde_json::Value;

/// Merge `incoming` into `acc`, with values already in `acc` taking precedence.
///
/// # Example
/// ```
/// use serde_json::json;
/// use usagi::config::defaults_merge;
///
/// let acc = json!({"reviews": {"auto_review": {"enabled": false}}});
/// let incoming = json!({"reviews": {"auto_review": {"enabled": true, "drafts": true}}});
/// let result = defaults_merge(acc, incoming);
/// assert_eq!(result, json!({"reviews": {"auto_review": {"enabled": false, "drafts": true}}}));
/// ```
pub fn defaults_merge(acc: Value, incoming: Value) -> Value {
    match (acc, incoming) {
        // Both are mappings: merge key by key
        (Value::Object(acc_map), Value::Object(incoming_map)) => {
            Value::Object(merge_fragment(acc_map, incoming_map))
        }
        // Unset accumulator: take whatever arrives
        (Value::Null, incoming) => incoming,
        // Anything already set is kept
        (acc, _) => acc,
    }
}

/// Merge two fragments, keeping `acc`'s key order and appending new keys.
pub fn merge_fragment(mut acc: Fragment, incoming: Fragment) -> Fragment {
    for (key, incoming_value) in incoming {
        match acc.get_mut(&key) {
            Some(slot) => {
                let current = std::mem::take(slot);
                *slot = defaults_merge(current, incoming_value);
            }
            None => {
                acc.insert(key, incoming_value);
            }
        }
    }
    acc
}

/// Merge fragments in order, starting from an empty mapping.
pub fn merge_all(fragments: impl IntoIterator<Item = Fragment>) -> Fragment {
    fragments.into_iter().fold(Fragment::new(), merge_fragment)
}
