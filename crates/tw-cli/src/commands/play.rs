use std::path::Path;

use colored::Colorize;

use tw_engine::{ChapterEngine, StdConsole};

pub fn run(file: &Path, chapter: &str, keep_settings: bool) -> Result<(), String> {
    let scenario_file = super::open(file)?;

    println!("  {} {}", "Playing".bold(), file.display());
    println!();

    let mut engine = ChapterEngine::new(scenario_file, StdConsole::new());
    engine
        .run(chapter, keep_settings)
        .map_err(|e| e.to_string())
}
