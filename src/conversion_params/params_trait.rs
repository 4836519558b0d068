use std::{ffi::OsString, path::Path};

/// A single invocation of the external tool, expressed as its argument list.
pub trait ConversionParams {
    fn as_ffmpeg_argument_list(&self, file_in: &Path, file_out: &Path) -> Vec<OsString>;
}
