use crate::logger;

use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Level::Info => write!(f, "info"),
            Level::Warning => write!(f, "warning"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// Receives the user-facing messages of a conversion run.
pub trait Notifier {
    fn notify(&self, level: Level, title: &str, message: &str);

    fn info(&self, title: &str, message: &str) {
        self.notify(Level::Info, title, message);
    }

    fn warning(&self, title: &str, message: &str) {
        self.notify(Level::Warning, title, message);
    }

    fn error(&self, title: &str, message: &str) {
        self.notify(Level::Error, title, message);
    }
}

/// Writes notifications to the console and, when enabled, the log file.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: Level, title: &str, message: &str) {
        logger::log(format!("[{level}] {title}: {message}"), true);
    }
}
