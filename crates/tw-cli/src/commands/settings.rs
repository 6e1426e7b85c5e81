use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use serde_json::Value;
use tw_document::SettingsStore;
use tw_engine::interpolate::scalar_text;

pub fn show(file: &Path) -> Result<(), String> {
    let store = SettingsStore::new(super::open(file)?);
    let all = store.all().map_err(|e| e.to_string())?;

    if all.is_empty() {
        println!("  No settings.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Value"]);

    for (key, value) in &all {
        table.add_row(vec![key.clone(), scalar_text(value)]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} setting{}",
        all.len(),
        if all.len() == 1 { "" } else { "s" },
    );

    Ok(())
}

pub fn set(file: &Path, key: &str, value: &str) -> Result<(), String> {
    let store = SettingsStore::new(super::open(file)?);
    store
        .set(key, parse_scalar(value))
        .map_err(|e| e.to_string())?;
    println!("Set {key}");
    Ok(())
}

pub fn reset(file: &Path) -> Result<(), String> {
    let store = SettingsStore::new(super::open(file)?);
    store.reset().map_err(|e| e.to_string())?;
    println!("Settings cleared.");
    Ok(())
}

/// Parse a command-line value: JSON scalars become typed values, anything
/// else (including JSON arrays/objects) is stored as a plain string.
fn parse_scalar(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) if !value.is_array() && !value.is_object() => value,
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_are_typed() {
        assert_eq!(parse_scalar("true"), json!(true));
        assert_eq!(parse_scalar("42"), json!(42));
        assert_eq!(parse_scalar("1.5"), json!(1.5));
        assert_eq!(parse_scalar("null"), json!(null));
        assert_eq!(parse_scalar("\"quoted\""), json!("quoted"));
    }

    #[test]
    fn everything_else_is_a_string() {
        assert_eq!(parse_scalar("Ann"), json!("Ann"));
        assert_eq!(parse_scalar("[1, 2]"), json!("[1, 2]"));
        assert_eq!(parse_scalar("{\"a\": 1}"), json!("{\"a\": 1}"));
    }
}
