//! Placeholder substitution for display text.

use serde_json::{Map, Value};

/// Replace `{key}` placeholders in `text` with setting values.
///
/// Substitution is plain ordered literal replacement: keys are applied in
/// the settings map's iteration order, each replacing every occurrence of
/// its `{key}` form. A substituted value that itself contains `{otherKey}`
/// is left as-is; there is no recursive expansion.
pub fn substitute(text: &str, settings: &Map<String, Value>) -> String {
    let mut output = text.to_string();
    for (key, value) in settings {
        let placeholder = format!("{{{key}}}");
        if output.contains(&placeholder) {
            output = output.replace(&placeholder, &scalar_text(value));
        }
    }
    output
}

/// The display form of a scalar setting value.
///
/// Strings render bare; every other scalar renders in its JSON form
/// (`true`, `42`, `null`). The same form is used to match branch-table
/// keys in conditional links.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
