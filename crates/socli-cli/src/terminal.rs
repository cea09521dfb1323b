//! Terminal input and output.
//!
//! Handlers talk to a [`Terminal`] rather than stdin/stdout directly so the
//! same code drives the interactive console and scripted tests.

use std::io::{self, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Line-oriented terminal used by the shell and its handlers.
pub trait Terminal {
    /// Read one line of visible input. End of input is reported as
    /// `io::ErrorKind::UnexpectedEof`, Ctrl-C as `io::ErrorKind::Interrupted`.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Read one line without echoing it.
    fn read_secret(&mut self, prompt: &str) -> io::Result<String>;

    /// Print one line of output.
    fn print(&mut self, text: &str);

    /// Record a command line in history, if the terminal keeps one.
    fn remember(&mut self, _line: &str) {}

    /// Clear the screen.
    fn clear(&mut self) {}
}

/// The interactive terminal: rustyline for line editing, rpassword for secrets.
pub struct Console {
    editor: DefaultEditor,
}

impl Console {
    pub fn new() -> io::Result<Self> {
        let editor = DefaultEditor::new().map_err(readline_to_io)?;
        Ok(Self { editor })
    }
}

impl Terminal for Console {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.editor.readline(prompt).map_err(readline_to_io)
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        rpassword::prompt_password(prompt)
    }

    fn print(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{text}");
    }

    fn remember(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            tracing::debug!(error = %e, "Could not record history entry");
        }
    }

    fn clear(&mut self) {
        if let Err(e) = self.editor.clear_screen() {
            tracing::debug!(error = %e, "Could not clear screen");
        }
    }
}

fn readline_to_io(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Eof => io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"),
        ReadlineError::Interrupted => io::Error::new(io::ErrorKind::Interrupted, "interrupted"),
        ReadlineError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, other.to_string()),
    }
}
