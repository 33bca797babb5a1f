//! Instruction template rendering.
//!
//! Templates support two constructs:
//! - `{{ name }}` placeholders, replaced by the parameter of the same name
//!   (whitespace inside the braces is ignored)
//! - `{{#if name}} ... {{/if}}` blocks, kept when the parameter is truthy and
//!   removed (markers included) otherwise
//!
//! Placeholders without a matching parameter are left as literal text.
//! Conditional blocks do not nest; a nested block is logged and the outer
//! block is closed by the first `{{/if}}`.

use regex_lite::{Captures, NoExpand, Regex};
use std::sync::LazyLock;
use tracing::warn;

/// Named parameters for template substitution, applied in order.
///
/// A value may itself contain a placeholder for a later parameter.
pub type TemplateParams = Vec<(String, String)>;

static CONDITIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{#if\s+([^}]+)\}\}(.*?)\{\{/if\}\}").expect("conditional pattern is valid")
});

/// Render a template with the given parameters.
pub fn render(template: &str, params: &TemplateParams) -> String {
    let mut result = template.to_string();

    for (key, value) in params {
        let pattern = [r"\{\{\s*", &regex_lite::escape(key), r"\s*\}\}"].concat();
        let Ok(placeholder) = Regex::new(&pattern) else {
            continue;
        };
        result = placeholder
            .replace_all(&result, NoExpand(value))
            .into_owned();
    }

    CONDITIONAL
        .replace_all(&result, |caps: &Captures| {
            let name = caps[1].trim();
            let body = &caps[2];
            if body.contains("{{#if") {
                warn!(condition = %name, "Nested conditional blocks are not supported");
            }
            let value = params.iter().find(|(key, _)| key == name).map(|(_, v)| v);
            if is_truthy(value) {
                body.to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// A parameter is truthy when present, non-empty and not the literal `false`.
fn is_truthy(value: Option<&String>) -> bool {
    matches!(value, Some(v) if !v.is_empty() && v != "false")
}
