use lazy_static::lazy_static;
use std::sync::{Mutex, MutexGuard};
use std::{fs::File, io::prelude::*, path::Path};

pub const SPLITTER: usize = 60;

lazy_static! {
    pub static ref LOGGER: Mutex<Logger> = Mutex::new(Logger::new());
}

fn logger() -> MutexGuard<'static, Logger> {
    // The logger holds no invariants that a poisoned lock could break.
    LOGGER.lock().unwrap_or_else(|e| e.into_inner())
}

/// Enable writing to the log file at the given path. The file is truncated.
pub fn enable_file<P: AsRef<Path>>(path: P) {
    logger().open_file(path.as_ref());
}

pub fn log<S: AsRef<str>>(message: S, console: bool) {
    logger().log(message.as_ref(), console);
}

pub fn section(title: &str, console: bool) {
    log(format!("{:-^1$}", title, SPLITTER), console);
}

pub fn subsection(title: &str, console: bool) {
    log(format!("[{title}]"), console);
}

pub struct Logger {
    pub enabled: bool,
    file: Option<File>,
}

impl Logger {
    pub fn new() -> Logger {
        Self {
            enabled: false,
            file: None,
        }
    }

    fn open_file(&mut self, path: &Path) {
        match File::create(path) {
            Ok(f) => {
                self.file = Some(f);
                self.enabled = true;
            }
            Err(e) => {
                eprintln!("failed to open log file {}: {}", path.display(), e);
            }
        }
    }

    pub fn log(&mut self, message: &str, console: bool) {
        self.log_inline(&format!("{message}\r\n"), console);
    }

    pub fn log_inline(&mut self, message: &str, console: bool) {
        if console {
            print!("{message}");
            _ = std::io::stdout().flush();
        }

        #[cfg(feature = "logging")]
        {
            if !self.enabled {
                return;
            }

            if let Some(file) = &mut self.file {
                _ = write!(file, "{message}");
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
