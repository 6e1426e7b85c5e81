use std::path::Path;

use colored::Colorize;
use serde_json::{Map, Value};
use tw_engine::{Beat, LinkTarget};

pub fn run(file: &Path) -> Result<(), String> {
    let document = super::open(file)?.load().map_err(|e| e.to_string())?;

    let chapters = document
        .scenario()
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "document has no \"scenario\" section".to_string())?;

    let mut problems = Vec::new();
    let mut beat_count = 0usize;

    for (chapter, beats) in chapters {
        let Some(beats) = beats.as_array() else {
            problems.push(format!("chapter \"{chapter}\" is not a list of beats"));
            continue;
        };

        for (index, record) in beats.iter().enumerate() {
            beat_count += 1;
            match Beat::decode(record) {
                Ok(Beat::Link(target)) => {
                    check_link_targets(chapters, chapter, index, &target, &mut problems);
                }
                Ok(_) => {}
                Err(e) => problems.push(format!("{chapter}[{index}]: {e}")),
            }
        }
    }

    if document.settings().is_err() {
        problems.push("document has no \"setting\" section".to_string());
    }

    if problems.is_empty() {
        println!(
            "  {} {} ({} chapter{}, {} beat{})",
            "Checked".bold(),
            file.display(),
            chapters.len(),
            if chapters.len() == 1 { "" } else { "s" },
            beat_count,
            if beat_count == 1 { "" } else { "s" },
        );
        Ok(())
    } else {
        for problem in &problems {
            eprintln!("  {}", problem.red());
        }
        Err(format!(
            "{} problem{} found",
            problems.len(),
            if problems.len() == 1 { "" } else { "s" },
        ))
    }
}

/// Report link targets that name chapters the document does not have.
fn check_link_targets(
    chapters: &Map<String, Value>,
    chapter: &str,
    index: usize,
    target: &LinkTarget,
    problems: &mut Vec<String>,
) {
    match target {
        LinkTarget::Chapter(to) => {
            if !chapters.contains_key(to) {
                problems.push(format!("{chapter}[{index}]: links to missing chapter \"{to}\""));
            }
        }
        LinkTarget::Branch { table, .. } => {
            for (value, to) in table {
                if !chapters.contains_key(to) {
                    problems.push(format!(
                        "{chapter}[{index}]: branch \"{value}\" links to missing chapter \"{to}\""
                    ));
                }
            }
        }
    }
}
