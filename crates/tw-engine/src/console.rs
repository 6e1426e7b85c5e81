//! Terminal I/O seam.
//!
//! The engine talks to the player only through [`Console`], so tests can
//! script a session and the CLI can wire up real stdin/stdout.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

/// Blocking terminal primitives the engine drives.
pub trait Console {
    /// Print one line of narrative output.
    fn display(&mut self, line: &str);

    /// Show `prompt` and read one raw line, without its trailing newline.
    ///
    /// End of input mid-scenario is an error: the engine cannot finish an
    /// `input` or `select` beat without an answer.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Block for the given duration.
    fn wait(&mut self, duration: Duration);
}

/// The real console: stdout, stdin, and `thread::sleep`.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    /// Create a standard console.
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn display(&mut self, line: &str) {
        println!("{line}");
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "end of input",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn wait(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
