use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors raised while loading the tool paths file.
#[derive(Debug, Error)]
pub enum PathsError {
    #[error("failed to read the paths data file: {0}")]
    Read(#[from] io::Error),

    #[error("failed to parse the paths data file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("the ffmpeg path in the paths data file is empty")]
    EmptyToolPath,
}

/// Errors raised while loading a conversion profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("the conversion profile '{0}' does not exist")]
    Missing(PathBuf),

    #[error("failed to read the conversion profile: {0}")]
    Read(#[from] io::Error),

    #[error("failed to parse the conversion profile: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid substitution pattern '{pattern}': {source}")]
    Substitution {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A parameter that could not be turned into a usable value. Any of these
/// rejects the whole batch before a single file is touched.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("{field} must be a non-negative whole number, got '{value}'")]
    InvalidInteger { field: &'static str, value: String },

    #[error("{field} must be a decimal number, got '{value}'")]
    InvalidFloat { field: &'static str, value: String },

    #[error("'{value}' is not a recognised {field}, expected one of: {expected}")]
    UnknownOption {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{field} is out of range, got {value} but expected {expected}")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("the speed factor expression must not be empty")]
    EmptySpeed,
}

/// A failed invocation of the external conversion tool.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("the tool exited with {}: {stderr}", exit_code_text(.code))]
    Exited { code: Option<i32>, stderr: String },

    #[error("failed to start the tool: {0}")]
    Spawn(#[from] io::Error),
}

fn exit_code_text(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "no status (terminated by a signal)".to_string(),
    }
}

/// Errors raised while resolving the output directory.
#[derive(Debug, Error)]
pub enum OutputDirError {
    #[error("the selected directory '{0}' does not exist")]
    Missing(PathBuf),

    #[error("the selected directory '{0}' is not writable")]
    NotWritable(PathBuf),

    #[error("unable to locate the desktop or home directory")]
    NoDesktop,

    #[error("failed to create the output directory '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that stop a batch as a whole, rather than a single file.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to create the output directory '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while gathering the input files.
#[derive(Debug, Error)]
pub enum InputListError {
    #[error("failed to read the input list '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that prevent a conversion run from starting, or stop it as a whole.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("please supply MP4 or MOV files to convert")]
    NoInputs,

    #[error("please make sure an output directory has been selected")]
    NoOutputDir,

    #[error(transparent)]
    Params(#[from] ParamError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    InputList(#[from] InputListError),

    #[error(transparent)]
    OutputDir(#[from] OutputDirError),

    #[error(transparent)]
    Batch(#[from] BatchError),
}
