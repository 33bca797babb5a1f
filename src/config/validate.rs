//! Per-fragment validation.
//!
//! Only structural checks live here; full schema validation belongs to the
//! target tool.

use super::types::Fragment;
use crate::error::{ConfigError, Result};

/// Validate a single fragment.
///
/// Fails when `version` is present and is not a number. An explicit `null`
/// counts as present.
pub fn validate(fragment: &Fragment) -> Result<()> {
    if let Some(version) = fragment.get("version")
        && !version.is_number()
    {
        return Err(ConfigError::invalid_config("Version must be a number"));
    }
    Ok(())
}
