//! CLI frontend for the Taleweber scenario interpreter.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tw",
    about = "Taleweber — a narrative-scenario interpreter",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a template scenario document
    Init {
        /// Scenario name (writes <name>.json)
        name: String,
    },

    /// Validate a scenario document without playing it
    Check {
        /// Path to the scenario document
        file: PathBuf,
    },

    /// Play a scenario
    Play {
        /// Path to the scenario document
        file: PathBuf,

        /// Chapter to start from
        #[arg(short, long, default_value = "start")]
        chapter: String,

        /// Keep existing settings instead of clearing them first
        #[arg(short, long)]
        keep_settings: bool,
    },

    /// Inspect or edit the document's settings section
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print all settings
    Show {
        /// Path to the scenario document
        file: PathBuf,
    },

    /// Store a value under a key
    Set {
        /// Path to the scenario document
        file: PathBuf,

        /// Settings key
        key: String,

        /// Value; JSON scalars (true, 42, 1.5, null) are stored typed,
        /// anything else as a string
        value: String,
    },

    /// Clear all settings
    Reset {
        /// Path to the scenario document
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { name } => commands::init::run(&name),
        Commands::Check { file } => commands::check::run(&file),
        Commands::Play {
            file,
            chapter,
            keep_settings,
        } => commands::play::run(&file, &chapter, keep_settings),
        Commands::Settings { action } => match action {
            SettingsAction::Show { file } => commands::settings::show(&file),
            SettingsAction::Set { file, key, value } => commands::settings::set(&file, &key, &value),
            SettingsAction::Reset { file } => commands::settings::reset(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
