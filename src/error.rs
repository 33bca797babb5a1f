//! Error types for configuration resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while loading, resolving or serializing a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A flattened fragment failed validation.
    #[error("{message}")]
    InvalidConfig { message: String },

    /// A field the expander writes into holds the wrong kind of value.
    #[error("`{field}` must be {expected}")]
    InvalidShape {
        field: &'static str,
        expected: &'static str,
    },

    /// An extension field could not be decoded.
    #[error("invalid `{field}`: {source}")]
    InvalidExtension {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Error raised by a caller-supplied function item, passed through as-is.
    #[error(transparent)]
    Fragment(#[from] anyhow::Error),

    /// A configuration source could not be located or understood.
    #[error("{message}: {}", path.display())]
    Load { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn invalid_shape(field: &'static str, expected: &'static str) -> Self {
        Self::InvalidShape { field, expected }
    }

    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for validation failures.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = ConfigError::invalid_config("Version must be a number");
        assert_eq!(err.to_string(), "Version must be a number");
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_invalid_shape_message() {
        let err = ConfigError::invalid_shape("reviews", "a mapping");
        assert_eq!(err.to_string(), "`reviews` must be a mapping");
        assert!(!err.is_invalid_config());
    }

    #[test]
    fn test_fragment_error_is_transparent() {
        let err: ConfigError = anyhow::anyhow!("boom from user code").into();
        assert_eq!(err.to_string(), "boom from user code");
    }

    #[test]
    fn test_load_error_includes_path() {
        let err = ConfigError::load("/tmp/usagi.config.yaml", "Configuration file not found");
        assert_eq!(
            err.to_string(),
            "Configuration file not found: /tmp/usagi.config.yaml"
        );
    }
}
