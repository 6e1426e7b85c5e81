pub mod check;
pub mod init;
pub mod play;
pub mod settings;

use std::path::Path;

use tw_document::ScenarioFile;

/// Open and validate a scenario path.
fn open(file: &Path) -> Result<ScenarioFile, String> {
    ScenarioFile::new(file).map_err(|e| e.to_string())
}
