//! Console logger for a single run.

use colored::Colorize;
use std::fmt::Display;
#[cfg(test)]
use std::sync::{Arc, Mutex};

/// Progress and warning output, with verbosity fixed when the run starts.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    verbose: bool,
    /// Lines recorded instead of printed, for tests
    #[cfg(test)]
    captured: Option<Arc<Mutex<Vec<String>>>>,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            #[cfg(test)]
            captured: None,
        }
    }

    /// A logger that records lines (as `info: ...`, `warn: ...`) instead of printing.
    #[cfg(test)]
    pub fn captured(verbose: bool) -> Self {
        Self {
            verbose,
            captured: Some(Arc::new(Mutex::new(vec![]))),
        }
    }

    /// Lines recorded by a [`Logger::captured`] logger.
    #[cfg(test)]
    pub fn lines(&self) -> Vec<String> {
        self.captured
            .as_ref()
            .map(|c| c.lock().unwrap().clone())
            .unwrap_or_default()
    }

    #[cfg(test)]
    fn capture(&self, level: &str, msg: &dyn Display) -> bool {
        match &self.captured {
            Some(c) => {
                c.lock().unwrap().push(format!("{}: {}", level, msg));
                true
            }
            None => false,
        }
    }

    #[cfg(not(test))]
    fn capture(&self, _level: &str, _msg: &dyn Display) -> bool {
        false
    }

    /// Progress line, printed only in verbose mode.
    pub fn info(&self, msg: impl Display) {
        if self.verbose && !self.capture("info", &msg) {
            println!("{} {}", ">>".yellow(), msg);
        }
    }

    /// Detail line (commands, paths), printed only in verbose mode.
    pub fn detail(&self, msg: impl Display) {
        if self.verbose && !self.capture("detail", &msg) {
            println!("   {}", msg.to_string().dimmed());
        }
    }

    /// A file was written.
    pub fn wrote(&self, msg: impl Display) {
        if self.verbose && !self.capture("wrote", &msg) {
            println!("  {} {}", "+".green(), msg);
        }
    }

    /// Always printed, to stderr.
    pub fn warn(&self, msg: impl Display) {
        if !self.capture("warn", &msg) {
            eprintln!("{} {}", "!".yellow(), msg);
        }
    }
}
