//! Scenario document store for Taleweber.
//!
//! A scenario lives in a single JSON file with a `"setting"` section (a flat
//! key-value map used for variable substitution and branch decisions) and a
//! `"scenario"` section (named chapters, each an ordered list of beats).
//! This crate owns everything about that file: locating and validating it,
//! loading it as an *ordered* key-value tree, writing it back without
//! reordering, and the settings store that persists every mutation.

/// The in-memory document tree.
pub mod document;
/// Error types for document operations.
pub mod error;
/// Validated file handle with load/save.
pub mod scenario_file;
/// Persistent settings backed by the document.
pub mod settings;

pub use document::Document;
pub use error::{DocumentError, DocumentResult};
pub use scenario_file::ScenarioFile;
pub use settings::SettingsStore;
