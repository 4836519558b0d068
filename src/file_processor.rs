use crate::{
    conversion_params::unified::ParameterSet,
    converters::{self, ToolRunner},
    errors::{BatchError, ToolError},
    input_list,
    logger,
    notifier::Notifier,
    palette_file::PaletteFile,
    substitutions::Substitutions,
    utils,
};

use core::fmt;
use hashbrown::HashMap;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

/// The accepted source file extensions, compared case-insensitively.
pub const VALID_EXTENSIONS: [&str; 2] = ["mp4", "mov"];

/// The extension of the converted files.
pub const OUTPUT_EXTENSION: &str = "gif";

/// Everything needed for one conversion run.
pub struct ConversionRequest {
    /// The candidate input paths, in the order they will be processed.
    pub input_paths: Vec<PathBuf>,
    /// The directory that receives the converted files. Created if absent.
    pub output_dir: PathBuf,
    /// The validated conversion parameters.
    pub params: ParameterSet,
    /// Substitutions applied to the output base names.
    pub substitutions: Substitutions,
}

/// The result of processing a single input file.
#[derive(Debug, PartialEq)]
pub enum ConversionOutcome {
    /// The file was converted into the given output file.
    Converted(PathBuf),
    /// The input path does not exist.
    NotFound,
    /// The input does not have an accepted extension.
    UnsupportedExtension,
    /// The tool exited unsuccessfully. Holds its diagnostic text.
    ToolFailure(String),
    /// Any other fault.
    Unknown(String),
}

impl ConversionOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ConversionOutcome::Converted(_) => OutcomeKind::Converted,
            ConversionOutcome::NotFound => OutcomeKind::NotFound,
            ConversionOutcome::UnsupportedExtension => OutcomeKind::UnsupportedExtension,
            ConversionOutcome::ToolFailure(_) => OutcomeKind::ToolFailure,
            ConversionOutcome::Unknown(_) => OutcomeKind::Unknown,
        }
    }
}

impl From<ToolError> for ConversionOutcome {
    fn from(e: ToolError) -> Self {
        match e {
            ToolError::Exited { .. } => ConversionOutcome::ToolFailure(e.to_string()),
            ToolError::Spawn(_) => ConversionOutcome::Unknown(e.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Converted,
    NotFound,
    UnsupportedExtension,
    ToolFailure,
    Unknown,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutcomeKind::Converted => write!(f, "converted"),
            OutcomeKind::NotFound => write!(f, "not found"),
            OutcomeKind::UnsupportedExtension => write!(f, "unsupported format"),
            OutcomeKind::ToolFailure => write!(f, "tool failure"),
            OutcomeKind::Unknown => write!(f, "unknown failure"),
        }
    }
}

/// The aggregate result of a conversion run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// The converted files, in processing order.
    pub outputs: Vec<PathBuf>,
    counts: HashMap<OutcomeKind, usize>,
}

impl BatchSummary {
    fn record(&mut self, outcome: ConversionOutcome) {
        *self.counts.entry(outcome.kind()).or_insert(0) += 1;

        if let ConversionOutcome::Converted(path) = outcome {
            self.outputs.push(path);
        }
    }

    /// The number of files with a given outcome.
    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or_default()
    }

    pub fn converted(&self) -> usize {
        self.count(OutcomeKind::Converted)
    }

    pub fn failed(&self) -> usize {
        self.counts
            .iter()
            .filter(|(k, _)| **k != OutcomeKind::Converted)
            .map(|(_, v)| v)
            .sum()
    }
}

pub struct FileProcessor<'a> {
    runner: &'a dyn ToolRunner,
    notifier: &'a dyn Notifier,
}

impl<'a> FileProcessor<'a> {
    pub fn new(runner: &'a dyn ToolRunner, notifier: &'a dyn Notifier) -> Self {
        Self { runner, notifier }
    }

    /// Process each of the input files in order.
    ///
    /// A failure is reported and confined to its own file. Only an output
    /// directory that cannot be created stops the run.
    ///
    /// # Arguments
    ///
    /// * `request` - The conversion request.
    pub fn process(&self, request: &ConversionRequest) -> Result<BatchSummary, BatchError> {
        fs::create_dir_all(&request.output_dir).map_err(|source| BatchError::OutputDir {
            path: request.output_dir.clone(),
            source,
        })?;

        logger::section("File Processing", true);
        logger::log(
            format!(
                "Converting into '{}' (color adjustment: {}).",
                request.output_dir.display(),
                utils::bool_to_yes_no(request.params.color_adjust)
            ),
            false,
        );

        let now = Instant::now();
        let total = request.input_paths.len();

        let mut summary = BatchSummary::default();
        for (i, path) in request.input_paths.iter().enumerate() {
            logger::subsection(&format!("File {} of {}", i + 1, total), true);

            let start = Instant::now();
            let outcome = self.process_file(path, request);
            self.report(path, &outcome);

            logger::log(
                format!(
                    "Finished '{}' ({}), in {}.",
                    path.display(),
                    outcome.kind(),
                    utils::format_duration(start.elapsed().as_secs())
                ),
                false,
            );

            summary.record(outcome);
        }

        logger::section("", true);
        self.log_summary(&summary, now.elapsed().as_secs());

        let converted = summary.converted();
        if converted > 0 {
            self.notifier.info(
                "Complete",
                &format!(
                    "Successfully converted {converted} file{}.",
                    utils::plural(converted)
                ),
            );
        } else {
            self.notifier.info("Complete", "No files were converted.");
        }

        Ok(summary)
    }

    /// Validate and convert a single input file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the input file.
    /// * `request` - The conversion request.
    pub fn process_file(&self, path: &Path, request: &ConversionRequest) -> ConversionOutcome {
        if !utils::file_exists(path) {
            return ConversionOutcome::NotFound;
        }

        if !input_list::has_valid_extension(path) {
            return ConversionOutcome::UnsupportedExtension;
        }

        let base_name = output_base_name(path, &request.substitutions);
        let output = next_output_path(
            &request.output_dir,
            &base_name,
            &request.params.output_suffix(),
        );
        let palette = PaletteFile::new(&request.output_dir, &base_name);

        logger::log(format!("Writing '{}'...", output.display()), false);

        // The palette is removed when `palette` goes out of scope.
        if let Err(e) = converters::convert_to_gif(
            self.runner,
            path,
            palette.get_path(),
            &output,
            &request.params,
        ) {
            return e.into();
        }

        if !utils::file_exists(&output) {
            return ConversionOutcome::Unknown(format!(
                "the tool reported success but '{}' was not created",
                output.display()
            ));
        }

        ConversionOutcome::Converted(output)
    }

    fn report(&self, path: &Path, outcome: &ConversionOutcome) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        match outcome {
            ConversionOutcome::Converted(out) => {
                logger::log(format!("Created '{}'.", out.display()), true);
            }
            ConversionOutcome::NotFound => {
                self.notifier.warning(
                    "Warning",
                    &format!("File '{}' does not exist.", path.display()),
                );
            }
            ConversionOutcome::UnsupportedExtension => {
                self.notifier.warning(
                    "Warning",
                    &format!(
                        "File '{}' is not an MP4 or MOV file and has been skipped.",
                        path.display()
                    ),
                );
            }
            ConversionOutcome::ToolFailure(diagnostic) => {
                self.notifier.error(
                    "Error",
                    &format!("An error occurred while processing '{name}': {diagnostic}"),
                );
            }
            ConversionOutcome::Unknown(message) => {
                self.notifier.error(
                    "Unknown error",
                    &format!("An unknown error occurred while processing '{name}': {message}"),
                );
            }
        }
    }

    fn log_summary(&self, summary: &BatchSummary, seconds: u64) {
        logger::log(
            format!(
                "{} converted, {} failed or skipped, in {}.",
                summary.converted(),
                summary.failed(),
                utils::format_duration(seconds)
            ),
            false,
        );

        for output in &summary.outputs {
            logger::log(format!("  {}", output.display()), false);
        }

        for kind in [
            OutcomeKind::NotFound,
            OutcomeKind::UnsupportedExtension,
            OutcomeKind::ToolFailure,
            OutcomeKind::Unknown,
        ] {
            let count = summary.count(kind);
            if count > 0 {
                logger::log(format!("  {kind}: {count}"), false);
            }
        }
    }
}

/// Build the sanitized base name for an input file from its file stem.
///
/// # Arguments
///
/// * `input` - The path to the input file.
/// * `substitutions` - The substitutions to be applied.
pub fn output_base_name(input: &Path, substitutions: &Substitutions) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    substitutions.apply(&stem)
}

/// Pick the output path one past the highest existing `_N` index for this
/// base name and suffix. Indices freed by deleted files are never reused.
///
/// # Arguments
///
/// * `output_dir` - The output directory.
/// * `base_name` - The sanitized base name.
/// * `suffix` - The parameter suffix.
pub fn next_output_path(output_dir: &Path, base_name: &str, suffix: &str) -> PathBuf {
    let prefix = format!("{base_name}{suffix}_");
    let extension = format!(".{OUTPUT_EXTENSION}");

    let highest = match fs::read_dir(output_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let name = e.file_name().to_string_lossy().to_string();
                name.strip_prefix(&prefix)?
                    .strip_suffix(&extension)?
                    .parse::<usize>()
                    .ok()
            })
            .max()
            .unwrap_or(0),
        Err(_) => 0,
    };

    output_dir.join(format!("{prefix}{}{extension}", highest + 1))
}
