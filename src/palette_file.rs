use crate::logger;

use std::{
    fs,
    path::{Path, PathBuf},
};

/// A scoped handle to the intermediate palette image of a single conversion.
///
/// The file is removed when the handle is dropped, whichever way the
/// conversion ended. Removal is best-effort and never reported as an error.
pub struct PaletteFile {
    path: PathBuf,
}

impl PaletteFile {
    /// Reserve the palette path for a sanitized base name.
    ///
    /// # Arguments
    ///
    /// * `output_dir` - The directory in which the palette will be written.
    /// * `base_name` - The sanitized base name of the source file.
    pub fn new(output_dir: &Path, base_name: &str) -> Self {
        Self {
            path: PaletteFile::generate_file_path(output_dir, base_name),
        }
    }

    /// Generate the palette path.
    ///
    /// # Arguments
    ///
    /// * `output_dir` - The directory in which the palette will be written.
    /// * `base_name` - The sanitized base name of the source file.
    fn generate_file_path(output_dir: &Path, base_name: &str) -> PathBuf {
        output_dir.join(format!("{base_name}_palette.png"))
    }

    /// Get the palette file's path.
    pub fn get_path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PaletteFile {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }

        if let Err(e) = fs::remove_file(&self.path) {
            logger::log(
                format!(
                    "Unable to remove the palette file '{}': {e}",
                    self.path.display()
                ),
                false,
            );
        }
    }
}
