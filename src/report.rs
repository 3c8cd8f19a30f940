//! Leveled message sink for user-facing diagnostics.
//!
//! Reporting never fails the caller: a reporter swallows its own output
//! errors. Developer-level tracing goes through `log` instead.

use log::debug;
use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};

/// Severity of a reported message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
    /// Printed verbatim, without a severity prefix.
    Custom,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Custom => "custom",
        };
        f.write_str(name)
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Reporter {
    fn report(&self, level: Level, message: &str);
}

/// Prints INFO and CUSTOM lines to stdout, WARNING and ERROR lines to stderr.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Write one message. Output errors (a closed pipe, a full disk) are
    /// dropped so the run carries on.
    fn write_to(&self, out: &mut dyn Write, err: &mut dyn Write, level: Level, message: &str) {
        let _ = match level {
            Level::Info | Level::Custom if self.quiet => Ok(()),
            Level::Info | Level::Custom => writeln!(out, "{}", message),
            Level::Warning => writeln!(err, "Warning: {}", message),
            Level::Error => writeln!(err, "Error: {}", message),
        };
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, level: Level, message: &str) {
        debug!("[{}] {}", level, message);
        self.write_to(
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
            level,
            message,
        );
    }
}

/// Keeps every message in memory, in order. Useful for hosts embedding the
/// reconciler that want to inspect diagnostics after a run.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    messages: RefCell<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.borrow().clone()
    }

    /// Messages reported at `level`, in order.
    pub fn at(&self, level: Level) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, level: Level, message: &str) {
        self.messages.borrow_mut().push((level, message.to_string()));
    }
}
