//! Error types for the engine.

use thiserror::Error;
use tw_document::DocumentError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that abort a chapter traversal.
///
/// None of these are retried: the engine surfaces the first failure to the
/// invoking context verbatim. The one local-recovery case — an empty
/// `input` answer or an out-of-list `select` answer — re-prompts in place
/// and never becomes an error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The backing document failed to load, save, or validate.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The scenario section or the named chapter is absent.
    #[error("chapter not found: \"{0}\"")]
    ChapterNotFound(String),

    /// The named chapter exists but is not a list of beats.
    #[error("chapter \"{0}\" is not a list of beats")]
    ChapterNotAList(String),

    /// A beat record is not a JSON object.
    #[error("beat record is not a JSON object")]
    BeatNotAnObject,

    /// A beat is missing one or more required fields.
    #[error("{beat} beat is missing required field(s): {}", .fields.join(", "))]
    MissingArgument {
        /// The beat type that was being decoded.
        beat: &'static str,
        /// The names of the absent fields.
        fields: Vec<&'static str>,
    },

    /// A beat field is present but has the wrong shape.
    #[error("\"{field}\" in {beat} beat must be {expected}")]
    InvalidFieldType {
        /// The beat type that was being decoded.
        beat: &'static str,
        /// The offending field.
        field: &'static str,
        /// What the field must be.
        expected: &'static str,
    },

    /// A conditional link's setting value matched no branch-table key.
    #[error("no branch for value \"{0}\"")]
    BranchNotFound(String),

    /// Console input failed (for example, end of input mid-scenario).
    #[error("console read failed: {0}")]
    Io(#[from] std::io::Error),
}
