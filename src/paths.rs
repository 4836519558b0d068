use crate::errors::PathsError;

use serde_derive::{Deserialize, Serialize};
use std::{fs, path::Path};

/// The name of the optional tool paths file, looked up in the working directory.
pub const PATHS_FILE_NAME: &str = "paths.json";

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Paths {
    /// The ffmpeg executable. A bare name is resolved through `PATH`.
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,
    /// The log file, written only when logging is enabled.
    #[serde(default = "default_log")]
    pub log: String,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            log: default_log(),
        }
    }
}

impl Paths {
    /// Load the tool paths from a JSON file. A missing file yields the defaults.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the paths data file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Paths, PathsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Paths::default());
        }

        let json = fs::read_to_string(path)?;
        let paths = serde_json::from_str::<Paths>(&json)?;

        if paths.ffmpeg.trim().is_empty() {
            return Err(PathsError::EmptyToolPath);
        }

        Ok(paths)
    }
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_log() -> String {
    "bulk-gif-conversion.log".to_string()
}
