//! Chapter-execution engine for Taleweber.
//!
//! Walks the ordered beat list of a chapter, dispatching each beat by its
//! declared type: `read` beats display interpolated text, `input` and
//! `select` beats collect answers into the settings store, and `link` beats
//! transfer control to another chapter (optionally chosen by the current
//! value of a setting). Chapter transfer is a tail transfer driven by a
//! trampoline loop, so arbitrarily long branch chains run in constant
//! stack.

/// Beat records and their validating decoder.
pub mod beat;
/// Terminal I/O seam.
pub mod console;
/// The chapter state machine.
pub mod engine;
/// Error types for the engine.
pub mod error;
/// Placeholder substitution for display text.
pub mod interpolate;

pub use beat::{Beat, LinkTarget};
pub use console::{Console, StdConsole};
pub use engine::{ChapterEngine, EngineState};
pub use error::{EngineError, EngineResult};
pub use interpolate::substitute;
