//! The chapter state machine.

use std::time::Duration;

use serde_json::Value;
use strsim::jaro_winkler;
use tw_document::{ScenarioFile, SettingsStore};

use crate::beat::{Beat, LinkTarget};
use crate::console::Console;
use crate::error::{EngineError, EngineResult};
use crate::interpolate::{scalar_text, substitute};

/// Prompt shown before every line read.
const PROMPT: &str = "> ";

/// Minimum similarity for suggesting a near-miss select answer (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Where the engine currently is in a traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// No traversal has started.
    Idle,
    /// Executing the named chapter's beats.
    RunningChapter(String),
    /// A link beat is transferring control to the named chapter.
    Branching(String),
    /// A chapter's beat list ended without a link; the run is over.
    Terminated,
    /// A beat failed; the run was aborted with the recorded message.
    Failed(String),
}

/// The chapter-execution engine.
///
/// One engine owns one scenario file, one settings store over it, and one
/// console; its run state (current chapter, tracked speaker) is scoped to a
/// single [`run_chapter`](ChapterEngine::run_chapter) call, so independent
/// engines never share state. The document is re-read at every chapter
/// entry and before every settings access, making external edits visible
/// mid-run.
pub struct ChapterEngine<C> {
    file: ScenarioFile,
    settings: SettingsStore,
    console: C,
    state: EngineState,
}

impl<C: Console> ChapterEngine<C> {
    /// Create an engine over a scenario file and a console.
    pub fn new(file: ScenarioFile, console: C) -> Self {
        let settings = SettingsStore::new(file.clone());
        Self {
            file,
            settings,
            console,
            state: EngineState::Idle,
        }
    }

    /// The engine's current state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// The settings store backing this engine.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// The console this engine drives.
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Run a scenario from the named chapter.
    ///
    /// Settings are cleared first unless `keep_settings` is set.
    pub fn run(&mut self, chapter: &str, keep_settings: bool) -> EngineResult<()> {
        if !keep_settings
            && let Err(error) = self.settings.reset()
        {
            return Err(self.fail(error.into()));
        }
        self.run_chapter(chapter)
    }

    /// Execute the named chapter, following link beats until a chapter ends
    /// without one.
    ///
    /// Link transfer is a tail transfer: the origin chapter's remaining
    /// beats are never resumed, and the trampoline loop below keeps stack
    /// depth constant however long the branch chain gets.
    pub fn run_chapter(&mut self, chapter: &str) -> EngineResult<()> {
        let mut current = chapter.to_string();
        let mut speaker: Option<String> = None;

        loop {
            self.state = EngineState::RunningChapter(current.clone());
            match self.run_beats(&current, &mut speaker) {
                Ok(Some(target)) => {
                    self.state = EngineState::Branching(target.clone());
                    current = target;
                }
                Ok(None) => {
                    self.state = EngineState::Terminated;
                    return Ok(());
                }
                Err(error) => return Err(self.fail(error)),
            }
        }
    }

    /// Run one chapter's beat list in document order.
    ///
    /// Returns the link target if a link beat fired, `None` if the list
    /// ended.
    fn run_beats(
        &mut self,
        chapter: &str,
        speaker: &mut Option<String>,
    ) -> EngineResult<Option<String>> {
        let document = self.file.load()?;
        let scenario = document
            .scenario()?
            .ok_or_else(|| EngineError::ChapterNotFound(chapter.to_string()))?;
        let beats = scenario
            .get(chapter)
            .ok_or_else(|| EngineError::ChapterNotFound(chapter.to_string()))?
            .as_array()
            .ok_or_else(|| EngineError::ChapterNotAList(chapter.to_string()))?;

        for record in beats {
            match Beat::decode(record)? {
                Beat::Read {
                    speaker: declared,
                    text,
                    sleep,
                } => self.play_read(speaker, declared, &text, sleep)?,
                Beat::Input { text, var_name } => self.play_input(&text, &var_name)?,
                Beat::Select {
                    text,
                    var_name,
                    choices,
                } => self.play_select(&text, &var_name, &choices)?,
                Beat::Link(target) => return Ok(Some(self.resolve_link(target)?)),
            }
        }

        Ok(None)
    }

    fn play_read(
        &mut self,
        current: &mut Option<String>,
        declared: Option<String>,
        text: &str,
        sleep: f64,
    ) -> EngineResult<()> {
        let settings = self.settings.all()?;

        if let Some(name) = declared
            && current.as_deref() != Some(name.as_str())
        {
            self.console.display(&format!("[{name}]"));
            *current = Some(name);
        }

        self.console.display(&substitute(text, &settings));

        if sleep > 0.0 {
            self.console.wait(Duration::from_secs_f64(sleep));
        }
        Ok(())
    }

    fn play_input(&mut self, text: &str, var_name: &str) -> EngineResult<()> {
        let settings = self.settings.all()?;
        self.console.display(&substitute(text, &settings));

        let answer = loop {
            let answer = self.console.read_line(PROMPT)?;
            if !answer.is_empty() {
                break answer;
            }
        };

        self.settings.set(var_name, Value::String(answer))?;
        Ok(())
    }

    fn play_select(&mut self, text: &str, var_name: &str, choices: &[String]) -> EngineResult<()> {
        let settings = self.settings.all()?;
        self.console.display(&substitute(text, &settings));
        self.console.display(&format!("  [{}]", choices.join(" / ")));

        let answer = loop {
            let answer = self.console.read_line(PROMPT)?;
            if choices.contains(&answer) {
                break answer;
            }
            let mut retry = format!("Please answer one of: {}.", choices.join(", "));
            if let Some(suggestion) = closest_choice(&answer, choices) {
                retry.push_str(&format!(" Did you mean \"{suggestion}\"?"));
            }
            self.console.display(&retry);
        };

        self.settings.set(var_name, Value::String(answer))?;
        Ok(())
    }

    /// Resolve a link target to a chapter name.
    ///
    /// A branch table is matched against the string form of the referenced
    /// setting's current value; an unset setting reads as `null`.
    fn resolve_link(&self, target: LinkTarget) -> EngineResult<String> {
        match target {
            LinkTarget::Chapter(chapter) => Ok(chapter),
            LinkTarget::Branch { setting, table } => {
                let value = self.settings.get(&setting)?.unwrap_or(Value::Null);
                let key = scalar_text(&value);
                table
                    .into_iter()
                    .find(|(candidate, _)| *candidate == key)
                    .map(|(_, chapter)| chapter)
                    .ok_or_else(|| EngineError::BranchNotFound(key))
            }
        }
    }

    fn fail(&mut self, error: EngineError) -> EngineError {
        self.state = EngineState::Failed(error.to_string());
        error
    }
}

/// The choice most similar to `answer`, if any is close enough to suggest.
fn closest_choice<'a>(answer: &str, choices: &'a [String]) -> Option<&'a str> {
    let answer = answer.to_lowercase();
    choices
        .iter()
        .map(|choice| (choice, jaro_winkler(&answer, &choice.to_lowercase())))
        .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(choice, _)| choice.as_str())
}
