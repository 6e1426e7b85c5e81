use std::fs;
use std::path::PathBuf;

const TEMPLATE: &str = r#"{
  "setting": {},
  "scenario": {
    "start": [
      { "speaker": "Guide", "text": "Welcome, traveler." },
      { "type": "input", "text": "What is your name?", "var_name": "name" },
      { "text": "Well met, {name}.", "sleep": 0.5 },
      { "type": "select", "text": "Shall we begin?", "var_name": "begin", "choices": ["yes", "no"] },
      { "type": "link", "ref": "begin", "to": { "yes": "journey", "no": "farewell" } }
    ],
    "journey": [
      { "speaker": "Guide", "text": "Then let us be off, {name}." }
    ],
    "farewell": [
      { "text": "Another time, perhaps." }
    ]
  }
}
"#;

pub fn run(name: &str) -> Result<(), String> {
    let path = PathBuf::from(format!("{name}.json"));

    if path.exists() {
        return Err(format!("\"{}\" already exists", path.display()));
    }

    fs::write(&path, TEMPLATE).map_err(|e| format!("cannot write {}: {e}", path.display()))?;

    println!("Created scenario '{}'", path.display());
    println!();
    println!("Get started:");
    println!("  tw check {}    # Validate the document", path.display());
    println!("  tw play {}     # Play from the \"start\" chapter", path.display());

    Ok(())
}
