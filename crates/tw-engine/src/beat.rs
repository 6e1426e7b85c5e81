//! Beat records and their validating decoder.
//!
//! On disk a beat is an untyped JSON object with an optional `type` field.
//! The decoder turns it into a tagged [`Beat`] at dispatch time, enforcing
//! required fields and field shapes before the engine performs any side
//! effect for the beat.

use serde_json::{Map, Value};

use crate::error::{EngineError, EngineResult};

/// One executable unit in a chapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Beat {
    /// Display interpolated text, optionally under a speaker header, then
    /// pause for `sleep` seconds.
    Read {
        /// Who says the line, if anyone.
        speaker: Option<String>,
        /// The text to display, with `{key}` placeholders.
        text: String,
        /// Seconds to pause after displaying (default 0).
        sleep: f64,
    },
    /// Prompt for a free-form answer and store it in settings.
    Input {
        /// The prompt text.
        text: String,
        /// Settings key the answer is stored under.
        var_name: String,
    },
    /// Prompt for one of a fixed set of answers and store it in settings.
    Select {
        /// The prompt text.
        text: String,
        /// Settings key the answer is stored under.
        var_name: String,
        /// The accepted answers.
        choices: Vec<String>,
    },
    /// Transfer control to another chapter.
    Link(LinkTarget),
}

/// Where a link beat transfers to.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    /// Unconditional transfer to the named chapter.
    Chapter(String),
    /// Transfer chosen by the current value of a setting.
    Branch {
        /// The settings key whose value selects the branch.
        setting: String,
        /// Candidate value → target chapter, in document order.
        table: Vec<(String, String)>,
    },
}

impl Beat {
    /// Decode one beat record.
    ///
    /// The `type` field selects the variant; a missing `type` means `read`,
    /// and unknown values also fall through to `read` — existing documents
    /// rely on that.
    pub fn decode(value: &Value) -> EngineResult<Self> {
        let record = value.as_object().ok_or(EngineError::BeatNotAnObject)?;

        match record.get("type").and_then(Value::as_str).unwrap_or("read") {
            "input" => decode_input(record),
            "select" => decode_select(record),
            "link" => decode_link(record),
            _ => decode_read(record),
        }
    }
}

fn decode_read(record: &Map<String, Value>) -> EngineResult<Beat> {
    require(record, "read", &["text"])?;
    Ok(Beat::Read {
        speaker: optional_str(record, "read", "speaker")?,
        text: required_str(record, "read", "text")?,
        sleep: match record.get("sleep") {
            None => 0.0,
            Some(value) => value.as_f64().ok_or(EngineError::InvalidFieldType {
                beat: "read",
                field: "sleep",
                expected: "a number",
            })?,
        },
    })
}

fn decode_input(record: &Map<String, Value>) -> EngineResult<Beat> {
    require(record, "input", &["text", "var_name"])?;
    Ok(Beat::Input {
        text: required_str(record, "input", "text")?,
        var_name: required_str(record, "input", "var_name")?,
    })
}

fn decode_select(record: &Map<String, Value>) -> EngineResult<Beat> {
    require(record, "select", &["text", "var_name", "choices"])?;

    let invalid_choices = EngineError::InvalidFieldType {
        beat: "select",
        field: "choices",
        expected: "an array of strings",
    };
    let choices = match record.get("choices") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<String>>>()
            .ok_or(invalid_choices)?,
        _ => return Err(invalid_choices),
    };

    Ok(Beat::Select {
        text: required_str(record, "select", "text")?,
        var_name: required_str(record, "select", "var_name")?,
        choices,
    })
}

fn decode_link(record: &Map<String, Value>) -> EngineResult<Beat> {
    require(record, "link", &["to"])?;

    let target = match optional_str(record, "link", "ref")? {
        None => match record.get("to") {
            Some(Value::String(chapter)) => LinkTarget::Chapter(chapter.clone()),
            _ => {
                return Err(EngineError::InvalidFieldType {
                    beat: "link",
                    field: "to",
                    expected: "a chapter name",
                });
            }
        },
        Some(setting) => {
            let invalid_table = EngineError::InvalidFieldType {
                beat: "link",
                field: "to",
                expected: "a map of setting values to chapter names",
            };
            let table = match record.get("to") {
                Some(Value::Object(entries)) => entries
                    .iter()
                    .map(|(value, chapter)| {
                        chapter
                            .as_str()
                            .map(|chapter| (value.clone(), chapter.to_string()))
                    })
                    .collect::<Option<Vec<(String, String)>>>()
                    .ok_or(invalid_table)?,
                _ => return Err(invalid_table),
            };
            LinkTarget::Branch { setting, table }
        }
    };

    Ok(Beat::Link(target))
}

/// Fail with [`EngineError::MissingArgument`] naming every absent field.
fn require(
    record: &Map<String, Value>,
    beat: &'static str,
    fields: &[&'static str],
) -> EngineResult<()> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|field| !record.contains_key(**field))
        .copied()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::MissingArgument {
            beat,
            fields: missing,
        })
    }
}

fn required_str(
    record: &Map<String, Value>,
    beat: &'static str,
    field: &'static str,
) -> EngineResult<String> {
    optional_str(record, beat, field)?.ok_or_else(|| EngineError::MissingArgument {
        beat,
        fields: vec![field],
    })
}

fn optional_str(
    record: &Map<String, Value>,
    beat: &'static str,
    field: &'static str,
) -> EngineResult<Option<String>> {
    match record.get(field) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(EngineError::InvalidFieldType {
            beat,
            field,
            expected: "a string",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_type_means_read() {
        let beat = Beat::decode(&json!({"text": "Hello"})).unwrap();
        assert_eq!(
            beat,
            Beat::Read {
                speaker: None,
                text: "Hello".to_string(),
                sleep: 0.0,
            }
        );
    }

    #[test]
    fn unknown_type_falls_through_to_read() {
        let beat = Beat::decode(&json!({"type": "narrate", "text": "Hello"})).unwrap();
        assert!(matches!(beat, Beat::Read { .. }));
    }

    #[test]
    fn non_string_type_falls_through_to_read() {
        let beat = Beat::decode(&json!({"type": 7, "text": "Hello"})).unwrap();
        assert!(matches!(beat, Beat::Read { .. }));
    }

    #[test]
    fn read_with_speaker_and_sleep() {
        let beat =
            Beat::decode(&json!({"speaker": "Ann", "text": "Hi", "sleep": 1.5})).unwrap();
        assert_eq!(
            beat,
            Beat::Read {
                speaker: Some("Ann".to_string()),
                text: "Hi".to_string(),
                sleep: 1.5,
            }
        );
    }

    #[test]
    fn read_missing_text() {
        let err = Beat::decode(&json!({"speaker": "Ann"})).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingArgument { beat: "read", ref fields } if *fields == ["text"]
        ));
        assert!(err.to_string().contains("text"));
    }

    #[test]
    fn read_text_must_be_a_string() {
        let err = Beat::decode(&json!({"text": 42})).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidFieldType { field: "text", .. }
        ));
    }

    #[test]
    fn read_sleep_must_be_a_number() {
        let err = Beat::decode(&json!({"text": "Hi", "sleep": "soon"})).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidFieldType { field: "sleep", .. }
        ));
    }

    #[test]
    fn input_beat() {
        let beat =
            Beat::decode(&json!({"type": "input", "text": "Name?", "var_name": "name"})).unwrap();
        assert_eq!(
            beat,
            Beat::Input {
                text: "Name?".to_string(),
                var_name: "name".to_string(),
            }
        );
    }

    #[test]
    fn input_missing_fields_are_all_named() {
        let err = Beat::decode(&json!({"type": "input"})).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingArgument { beat: "input", ref fields }
                if *fields == ["text", "var_name"]
        ));
    }

    #[test]
    fn select_beat() {
        let beat = Beat::decode(&json!({
            "type": "select",
            "text": "Continue?",
            "var_name": "answer",
            "choices": ["y", "n"],
        }))
        .unwrap();
        assert_eq!(
            beat,
            Beat::Select {
                text: "Continue?".to_string(),
                var_name: "answer".to_string(),
                choices: vec!["y".to_string(), "n".to_string()],
            }
        );
    }

    #[test]
    fn select_requires_choices() {
        let err =
            Beat::decode(&json!({"type": "select", "text": "?", "var_name": "a"})).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingArgument { beat: "select", ref fields } if *fields == ["choices"]
        ));
    }

    #[test]
    fn select_choices_must_be_strings() {
        let err = Beat::decode(&json!({
            "type": "select",
            "text": "?",
            "var_name": "a",
            "choices": ["y", 2],
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidFieldType { field: "choices", .. }
        ));
    }

    #[test]
    fn link_to_plain_chapter() {
        let beat = Beat::decode(&json!({"type": "link", "to": "chapter2"})).unwrap();
        assert_eq!(
            beat,
            Beat::Link(LinkTarget::Chapter("chapter2".to_string()))
        );
    }

    #[test]
    fn link_missing_to() {
        let err = Beat::decode(&json!({"type": "link"})).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingArgument { beat: "link", ref fields } if *fields == ["to"]
        ));
    }

    #[test]
    fn link_plain_to_must_be_a_name() {
        let err = Beat::decode(&json!({"type": "link", "to": {"en": "chEn"}})).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidFieldType { field: "to", expected: "a chapter name", .. }
        ));
    }

    #[test]
    fn link_with_ref_builds_a_branch_table() {
        let beat = Beat::decode(&json!({
            "type": "link",
            "ref": "lang",
            "to": {"en": "chEn", "jp": "chJp"},
        }))
        .unwrap();
        assert_eq!(
            beat,
            Beat::Link(LinkTarget::Branch {
                setting: "lang".to_string(),
                table: vec![
                    ("en".to_string(), "chEn".to_string()),
                    ("jp".to_string(), "chJp".to_string()),
                ],
            })
        );
    }

    #[test]
    fn link_with_ref_rejects_plain_to() {
        let err = Beat::decode(&json!({"type": "link", "ref": "lang", "to": "chEn"})).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidFieldType { field: "to", .. }
        ));
    }

    #[test]
    fn link_table_targets_must_be_strings() {
        let err = Beat::decode(&json!({
            "type": "link",
            "ref": "lang",
            "to": {"en": 1},
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidFieldType { field: "to", .. }
        ));
    }

    #[test]
    fn beat_must_be_an_object() {
        let err = Beat::decode(&json!("just text")).unwrap_err();
        assert!(matches!(err, EngineError::BeatNotAnObject));
    }
}
