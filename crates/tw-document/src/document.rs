//! The in-memory document tree.

use serde_json::{Map, Value};

use crate::error::{DocumentError, DocumentResult};

/// Name of the settings section.
pub const SETTING_SECTION: &str = "setting";
/// Name of the scenario section.
pub const SCENARIO_SECTION: &str = "scenario";

/// A scenario document: an ordered key-value tree.
///
/// Key order is preserved from the file (and on write back), so loading a
/// document and saving it again never reorders sections, settings, or beat
/// fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Map<String, Value>,
}

impl Document {
    /// Build a document from an already-parsed JSON value.
    ///
    /// The root must be a JSON object.
    pub fn from_value(value: Value) -> DocumentResult<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(DocumentError::NotAnObject("document root".to_string())),
        }
    }

    /// The raw root object.
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// The `"setting"` section as an ordered map.
    ///
    /// Fails with [`DocumentError::MissingSection`] if the section is absent.
    pub fn settings(&self) -> DocumentResult<&Map<String, Value>> {
        self.section(SETTING_SECTION)?
            .ok_or_else(|| DocumentError::MissingSection(SETTING_SECTION.to_string()))
    }

    /// Mutable access to the `"setting"` section.
    ///
    /// Fails with [`DocumentError::MissingSection`] if the section is absent.
    pub fn settings_mut(&mut self) -> DocumentResult<&mut Map<String, Value>> {
        match self.root.get_mut(SETTING_SECTION) {
            None => Err(DocumentError::MissingSection(SETTING_SECTION.to_string())),
            Some(Value::Object(map)) => Ok(map),
            Some(_) => Err(DocumentError::NotAnObject(format!(
                "\"{SETTING_SECTION}\" section"
            ))),
        }
    }

    /// Replace the `"setting"` section with an empty map, creating the
    /// section if it did not exist.
    pub fn reset_settings(&mut self) {
        self.root
            .insert(SETTING_SECTION.to_string(), Value::Object(Map::new()));
    }

    /// The `"scenario"` section as an ordered map of chapter name to beat
    /// list, or `None` if the section is absent.
    pub fn scenario(&self) -> DocumentResult<Option<&Map<String, Value>>> {
        self.section(SCENARIO_SECTION)
    }

    fn section(&self, name: &str) -> DocumentResult<Option<&Map<String, Value>>> {
        match self.root.get(name) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => Err(DocumentError::NotAnObject(format!("\"{name}\" section"))),
        }
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        Value::Object(document.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::from_value(value).unwrap()
    }

    #[test]
    fn root_must_be_an_object() {
        let err = Document::from_value(json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, DocumentError::NotAnObject(_)));
    }

    #[test]
    fn settings_section() {
        let d = doc(json!({"setting": {"name": "Ann"}}));
        let settings = d.settings().unwrap();
        assert_eq!(settings.get("name"), Some(&json!("Ann")));
    }

    #[test]
    fn settings_missing_section() {
        let d = doc(json!({"scenario": {}}));
        let err = d.settings().unwrap_err();
        assert!(matches!(err, DocumentError::MissingSection(s) if s == "setting"));
    }

    #[test]
    fn settings_section_wrong_shape() {
        let d = doc(json!({"setting": "not a map"}));
        let err = d.settings().unwrap_err();
        assert!(matches!(err, DocumentError::NotAnObject(_)));
    }

    #[test]
    fn settings_mutation() {
        let mut d = doc(json!({"setting": {}}));
        d.settings_mut()
            .unwrap()
            .insert("lang".to_string(), json!("jp"));
        assert_eq!(d.settings().unwrap().get("lang"), Some(&json!("jp")));
    }

    #[test]
    fn reset_creates_missing_section() {
        let mut d = doc(json!({}));
        d.reset_settings();
        assert!(d.settings().unwrap().is_empty());
    }

    #[test]
    fn reset_clears_existing_entries() {
        let mut d = doc(json!({"setting": {"a": 1, "b": 2}}));
        d.reset_settings();
        assert!(d.settings().unwrap().is_empty());
    }

    #[test]
    fn scenario_is_optional() {
        let d = doc(json!({"setting": {}}));
        assert!(d.scenario().unwrap().is_none());
    }

    #[test]
    fn scenario_chapters_keep_order() {
        let d = doc(json!({"scenario": {"zeta": [], "alpha": [], "mid": []}}));
        let names: Vec<&String> = d.scenario().unwrap().unwrap().keys().collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }
}
