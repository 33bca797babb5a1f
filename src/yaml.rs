//! YAML output for resolved configurations.

use crate::config::{ConfigItem, Environment, Fragment, resolve};
use crate::error::Result;

/// Compose items into a single flat-config list.
///
/// ```
/// use serde_json::json;
/// use usagi::{ConfigItem, define_config};
///
/// let config = define_config([
///     ConfigItem::from_value(json!({"language": "en-US"})).unwrap(),
///     ConfigItem::from_fn(|env| {
///         let early = env.get("NODE_ENV").is_some_and(|v| v == "development");
///         Ok(ConfigItem::from_value(json!({"early_access": early}))?)
///     }),
/// ]);
/// assert!(matches!(config, ConfigItem::List(ref items) if items.len() == 2));
/// ```
pub fn define_config(items: impl IntoIterator<Item = ConfigItem>) -> ConfigItem {
    ConfigItem::list(items)
}

/// Serialize a resolved configuration as block-style YAML.
pub fn to_yaml(config: &Fragment) -> Result<String> {
    Ok(serde_yaml::to_string(config)?)
}

/// Resolve a configuration tree and serialize the result.
pub fn generate_yaml(item: &ConfigItem, env: &Environment) -> Result<String> {
    let config = resolve(item, env)?;
    to_yaml(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_yaml_merges_in_order() {
        let config = ConfigItem::from_value(json!([
            {
                "language": "en-US",
                "reviews": {"profile": "assertive", "auto_review": {"enabled": false}}
            },
            {"reviews": {"auto_review": {"enabled": true, "drafts": true}}}
        ]))
        .unwrap();

        let yaml = generate_yaml(&config, &Environment::new()).unwrap();
        assert_eq!(
            yaml,
            "language: en-US\nreviews:\n  profile: assertive\n  auto_review:\n    enabled: false\n    drafts: true\n"
        );
    }

    #[test]
    fn test_generate_yaml_with_env_function() {
        let config = define_config([
            ConfigItem::from_value(json!({"language": "en-US"})).unwrap(),
            ConfigItem::from_fn(|env| {
                Ok(ConfigItem::from_value(
                    json!({"tone_instructions": env.get("TONE").cloned().unwrap_or_default()}),
                )?)
            }),
        ]);
        let env = Environment::from([("TONE".to_string(), "friendly".to_string())]);

        let yaml = generate_yaml(&config, &env).unwrap();
        assert_eq!(yaml, "language: en-US\ntone_instructions: friendly\n");
    }

    #[test]
    fn test_generate_yaml_rejects_invalid_version() {
        let config = ConfigItem::from_value(json!({"version": "2"})).unwrap();
        assert!(generate_yaml(&config, &Environment::new()).is_err());
    }

    #[test]
    fn test_to_yaml_lists() {
        let config = ConfigItem::from_value(json!({
            "reviews": {"path_instructions": [{"path": "**/*.ts", "instructions": "Say hi"}]}
        }))
        .unwrap();
        let ConfigItem::Fragment(fragment) = config else {
            unreachable!()
        };
        let yaml = to_yaml(&fragment).unwrap();
        assert!(yaml.starts_with("reviews:\n  path_instructions:\n"));
        assert!(yaml.contains("instructions: Say hi\n"));

        let parsed: Fragment = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, fragment);
    }
}
