//! Validated file handle with load/save.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::document::Document;
use crate::error::{DocumentError, DocumentResult};

/// A validated handle to a scenario document on disk.
///
/// Construction checks that the path exists and names a `.json` file; it
/// does not parse the content. Every [`load`](ScenarioFile::load) re-reads
/// the file, so edits made between calls are visible immediately.
#[derive(Debug, Clone)]
pub struct ScenarioFile {
    path: PathBuf,
}

impl ScenarioFile {
    /// Validate `path` and build a handle to it.
    pub fn new(path: impl Into<PathBuf>) -> DocumentResult<Self> {
        let path = path.into();

        if !path.exists() {
            return Err(DocumentError::DocumentNotFound(path));
        }
        if path.extension().is_none_or(|ext| ext != "json") {
            return Err(DocumentError::NotAJsonDocument(path));
        }

        Ok(Self { path })
    }

    /// The validated path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document from disk.
    pub fn load(&self) -> DocumentResult<Document> {
        let text = fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&text)?;
        Document::from_value(value)
    }

    /// Write the document back to disk, pretty-printed.
    ///
    /// Key order is written exactly as held in the document, so a
    /// load-then-save cycle never reorders fields.
    pub fn save(&self, document: &Document) -> DocumentResult<()> {
        let mut text = serde_json::to_string_pretty(document.root())?;
        text.push('\n');
        fs::write(&self.path, text)?;
        Ok(())
    }
}
