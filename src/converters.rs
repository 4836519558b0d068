use crate::{
    conversion_params::{
        gif::GifParams, palette::PaletteParams, params_trait::ConversionParams,
        unified::ParameterSet,
    },
    errors::ToolError,
    logger,
};

use std::{
    ffi::OsString,
    path::Path,
    process::{Command, Stdio},
};

/// The number of trailing lines of the tool's diagnostic output to keep.
const STDERR_TAIL_LINES: usize = 10;

/// Something that can run the external conversion tool to completion.
pub trait ToolRunner {
    fn run(&self, args: &[OsString]) -> Result<(), ToolError>;
}

/// Runs a real ffmpeg executable as a blocking subprocess.
pub struct FfmpegRunner {
    exe: String,
}

impl FfmpegRunner {
    pub fn new<S: Into<String>>(exe: S) -> Self {
        Self { exe: exe.into() }
    }
}

impl ToolRunner for FfmpegRunner {
    fn run(&self, args: &[OsString]) -> Result<(), ToolError> {
        let output = Command::new(&self.exe)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        if output.status.success() {
            return Ok(());
        }

        Err(ToolError::Exited {
            code: output.status.code(),
            stderr: tail_lines(&String::from_utf8_lossy(&output.stderr), STDERR_TAIL_LINES),
        })
    }
}

/// Convert a video file into a GIF via an intermediate palette image.
///
/// The palette file is not removed here; the caller owns its lifetime.
///
/// # Arguments
///
/// * `runner` - The tool runner.
/// * `file_in` - The path to the source video.
/// * `palette` - The path the palette image will be written to.
/// * `file_out` - The path to the output GIF.
/// * `params` - The conversion parameters.
pub fn convert_to_gif<R: ToolRunner + ?Sized>(
    runner: &R,
    file_in: &Path,
    palette: &Path,
    file_out: &Path,
    params: &ParameterSet,
) -> Result<(), ToolError> {
    logger::log("Generating the palette image...", false);
    let args = PaletteParams::new(params).as_ffmpeg_argument_list(file_in, palette);
    runner.run(&args)?;

    logger::log("Rendering the GIF...", false);
    let args = GifParams::new(params, palette).as_ffmpeg_argument_list(file_in, file_out);
    runner.run(&args)?;

    Ok(())
}

/// Keep the last `count` non-empty lines of a block of text.
fn tail_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(count);

    lines[start..].join("\n")
}
