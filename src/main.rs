mod conversion_params;
mod converters;
mod errors;
mod file_processor;
mod input_list;
mod input_profile;
mod logger;
mod notifier;
mod output_dir;
mod palette_file;
mod paths;
mod substitutions;
mod utils;

use clap::Parser;
use conversion_params::unified::{self, ParameterSet};
use converters::{FfmpegRunner, ToolRunner};
use errors::RunError;
use file_processor::{BatchSummary, ConversionRequest, FileProcessor};
use input_profile::InputProfile;
use notifier::{ConsoleNotifier, Notifier};
use paths::Paths;
use std::{path::PathBuf, process::ExitCode};

/// Converts MP4 and MOV files into animated GIFs. Directories are searched
/// for applicable files.
#[derive(Debug, Default, PartialEq, Parser)]
#[command(name = "bulk-gif-conversion", version)]
struct CliArgs {
    /// A JSON conversion profile
    #[arg(short, long, value_name = "PATH")]
    profile: Option<PathBuf>,

    /// A file listing the inputs, one per line
    #[arg(short, long, value_name = "PATH")]
    list: Option<PathBuf>,

    /// Write into an 'output' folder within DIR
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Override conversion parameters, comma separated
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Write a log file
    #[arg(long)]
    logging: bool,

    /// The files and directories to convert
    #[arg(value_name = "INPUT")]
    inputs: Vec<PathBuf>,
}

/// Validate everything up front, then convert the inputs.
fn run(
    args: &CliArgs,
    runner: &dyn ToolRunner,
    notifier: &dyn Notifier,
) -> Result<BatchSummary, RunError> {
    let profile = match &args.profile {
        Some(p) => {
            logger::log(format!("Reading the profile '{}'...", p.display()), false);
            InputProfile::from_file(p)?
        }
        None => InputProfile::default(),
    };

    let mut inputs = args.inputs.clone();
    if let Some(list) = &args.list {
        inputs.extend(input_list::read_list_file(list)?);
    }

    if inputs.is_empty() {
        return Err(RunError::NoInputs);
    }

    if args.output.is_none() && profile.output_dir.as_deref().is_some_and(|d| d.trim().is_empty())
    {
        return Err(RunError::NoOutputDir);
    }

    logger::log("Attempting to validate the conversion parameters...", false);
    let mut raw = profile.params.clone();
    for o in &args.overrides {
        unified::apply_overrides(&mut raw, o)?;
    }
    let params = ParameterSet::from_raw(&raw)?;
    logger::log("All parameters successfully validated.", false);

    let output_dir = match (&args.output, &profile.output_dir) {
        (Some(selected), _) => output_dir::select_output_dir(selected)?,
        (None, Some(dir)) => PathBuf::from(dir.trim()),
        (None, None) => output_dir::default_output_dir()?,
    };

    let request = ConversionRequest {
        input_paths: input_list::expand_inputs(inputs),
        output_dir,
        params,
        substitutions: profile.substitutions,
    };

    let summary = FileProcessor::new(runner, notifier).process(&request)?;

    Ok(summary)
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let paths = match Paths::from_file(paths::PATHS_FILE_NAME) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Do we need to enable logging?
    if args.logging {
        logger::enable_file(&paths.log);
    }

    logger::section("Initial Setup", false);

    let runner = FfmpegRunner::new(paths.ffmpeg);
    let notifier = ConsoleNotifier;

    match run(&args, &runner, &notifier) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            match e {
                RunError::NoInputs | RunError::NoOutputDir | RunError::Params(_) => {
                    notifier.warning("Warning", &e.to_string());
                }
                _ => notifier.error("Error", &e.to_string()),
            }
            ExitCode::FAILURE
        }
    }
}
