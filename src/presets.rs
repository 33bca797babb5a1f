//! Built-in preset fragments.

use crate::config::Fragment;
use serde_json::{Value, json};

/// Names of all built-in presets.
pub fn names() -> &'static [&'static str] {
    &["basic", "strict"]
}

/// Look up a preset by name.
pub fn by_name(name: &str) -> Option<Fragment> {
    match name {
        "basic" => Some(basic()),
        "strict" => Some(strict()),
        _ => None,
    }
}

/// Automatic reviews with tool defaults.
pub fn basic() -> Fragment {
    into_fragment(json!({
        "version": 2,
        "reviews": {
            "auto_review": {
                "enabled": true
            }
        }
    }))
}

/// Automatic reviews with an approval threshold and a test requirement.
pub fn strict() -> Fragment {
    into_fragment(json!({
        "version": 2,
        "reviews": {
            "auto_review": {
                "enabled": true,
                "approve_threshold": 90
            },
            "rules": [
                {
                    "name": "Require tests",
                    "pattern": "**/*.test.{js,ts}",
                    "condition": "required"
                }
            ]
        }
    }))
}

fn into_fragment(value: Value) -> Fragment {
    match value {
        Value::Object(map) => map,
        _ => Fragment::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validate;

    #[test]
    fn test_all_presets_resolve_by_name() {
        for name in names() {
            let preset = by_name(name).unwrap();
            assert!(validate(&preset).is_ok(), "preset {} is invalid", name);
        }
        assert!(by_name("unknown").is_none());
    }

    #[test]
    fn test_strict_preset() {
        let preset = strict();
        assert_eq!(preset["reviews"]["auto_review"]["approve_threshold"], 90);
        assert_eq!(preset["reviews"]["rules"][0]["name"], "Require tests");
    }
}
