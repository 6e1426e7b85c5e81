//! Error types for document operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors that can occur while loading, saving, or mutating a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document path does not exist.
    #[error("\"{0}\" does not exist")]
    DocumentNotFound(PathBuf),

    /// The document path does not name a JSON file.
    #[error("\"{0}\" is not a JSON document")]
    NotAJsonDocument(PathBuf),

    /// The document content is not parseable JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document root or a section has the wrong shape.
    #[error("{0} is not a JSON object")]
    NotAnObject(String),

    /// A required top-level section is absent.
    #[error("document has no \"{0}\" section")]
    MissingSection(String),

    /// The underlying file could not be read or written.
    #[error("document I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
