use crate::{errors::OutputDirError, logger, utils};

use std::{
    fs,
    path::{Path, PathBuf},
};

/// The name of the folder that receives the converted files.
pub const OUTPUT_SUB_DIR: &str = "output";

/// Resolve and create the default output directory, `<Desktop>/output`.
pub fn default_output_dir() -> Result<PathBuf, OutputDirError> {
    let path = desktop_output_dir(dirs::desktop_dir(), dirs::home_dir())?;
    create_dir(&path)?;

    Ok(path)
}

/// Build the default output path from the platform's desktop directory,
/// falling back to a `Desktop` folder in the home directory.
///
/// # Arguments
///
/// * `desktop` - The desktop directory, if the platform defines one.
/// * `home` - The home directory, if known.
fn desktop_output_dir(
    desktop: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf, OutputDirError> {
    let desktop = desktop
        .or_else(|| home.map(|h| h.join("Desktop")))
        .ok_or(OutputDirError::NoDesktop)?;

    Ok(desktop.join(OUTPUT_SUB_DIR))
}

/// Redirect the output to a user selected directory. The directory must
/// exist and be writable; an `output` folder is created inside it.
///
/// # Arguments
///
/// * `selected` - The directory selected by the user.
pub fn select_output_dir(selected: &Path) -> Result<PathBuf, OutputDirError> {
    let selected = std::path::absolute(selected).unwrap_or_else(|_| selected.to_path_buf());
    logger::log(
        format!("Selected output directory: {}", selected.display()),
        false,
    );

    if !utils::dir_exists(&selected) {
        return Err(OutputDirError::Missing(selected));
    }

    if !utils::dir_is_writable(&selected) {
        return Err(OutputDirError::NotWritable(selected));
    }

    let output = selected.join(OUTPUT_SUB_DIR);
    if !utils::dir_exists(&output) {
        create_dir(&output)?;
        logger::log(
            format!("Created the output folder: {}", output.display()),
            false,
        );
    }

    Ok(output)
}

fn create_dir(path: &Path) -> Result<(), OutputDirError> {
    fs::create_dir_all(path).map_err(|source| OutputDirError::Create {
        path: path.to_path_buf(),
        source,
    })
}
