//! Persistent settings backed by the document.

use serde_json::{Map, Value};

use crate::error::DocumentResult;
use crate::scenario_file::ScenarioFile;

/// Key-value settings persisted in the document's `"setting"` section.
///
/// The store holds no state of its own: every call re-reads the document
/// from disk, and every mutation is a full read-modify-write cycle, so the
/// file always reflects the last mutating call and external edits are
/// visible immediately. Write amplification is accepted; these documents
/// are small.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    file: ScenarioFile,
}

impl SettingsStore {
    /// Create a store over the given scenario file.
    pub fn new(file: ScenarioFile) -> Self {
        Self { file }
    }

    /// The entire settings map, in document order.
    pub fn all(&self) -> DocumentResult<Map<String, Value>> {
        Ok(self.file.load()?.settings()?.clone())
    }

    /// The value stored under `key`, or `None` if unset.
    pub fn get(&self, key: &str) -> DocumentResult<Option<Value>> {
        Ok(self.file.load()?.settings()?.get(key).cloned())
    }

    /// Store `value` under `key`, creating or overwriting the entry.
    pub fn set(&self, key: &str, value: Value) -> DocumentResult<()> {
        let mut document = self.file.load()?;
        document.settings_mut()?.insert(key.to_string(), value);
        self.file.save(&document)
    }

    /// Replace the whole settings section with an empty map.
    pub fn reset(&self) -> DocumentResult<()> {
        let mut document = self.file.load()?;
        document.reset_settings();
        self.file.save(&document)
    }
}
