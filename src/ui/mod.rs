//! User interface module - output sink and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - The [`Reporter`] sink the workflow writes to
//!
//! The workflow never prints directly; it talks to a `Reporter`, so the
//! terminal is swapped for a [`BufferReporter`] in tests.

use std::cell::RefCell;

use console::{style, Term};

pub mod formatter;

pub use formatter::{file_listing, repository_status_lines, RepositoryStatus};

/// Kind of a reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Step,
    Result,
    Success,
    Warning,
    Error,
}

/// Destination for user-facing messages
pub trait Reporter {
    fn report(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.report(Level::Info, message);
    }

    fn step(&self, message: &str) {
        self.report(Level::Step, message);
    }

    fn result(&self, message: &str) {
        self.report(Level::Result, message);
    }

    fn success(&self, message: &str) {
        self.report(Level::Success, message);
    }

    fn warning(&self, message: &str) {
        self.report(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.report(Level::Error, message);
    }
}

/// Colored terminal output; errors go to stderr, everything else to stdout.
pub struct ConsoleReporter {
    out: Term,
    err: Term,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        ConsoleReporter {
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, level: Level, message: &str) {
        let line = match level {
            Level::Info => style(format!("ℹ {}", message)).blue(),
            Level::Step => style(format!("→ {}", message)).magenta().bold(),
            Level::Result => style(format!("  {}", message)).cyan(),
            Level::Success => style(format!("✓ {}", message)).green(),
            Level::Warning => style(format!("⚠ {}", message)).yellow(),
            Level::Error => style(format!("ERROR: {}", message)).red(),
        };

        let term = if level == Level::Error {
            &self.err
        } else {
            &self.out
        };
        // A closed stdout/stderr has nowhere left to report to.
        let _ = term.write_line(&line.to_string());
    }
}

/// Collects reported lines in memory
#[derive(Default)]
pub struct BufferReporter {
    lines: RefCell<Vec<(Level, String)>>,
}

impl BufferReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.borrow().clone()
    }

    /// True if any line at `level` contains `needle`
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines
            .borrow()
            .iter()
            .any(|(l, text)| *l == level && text.contains(needle))
    }
}

impl Reporter for BufferReporter {
    fn report(&self, level: Level, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}
