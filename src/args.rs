use clap::{ArgAction, CommandFactory, Parser};
use std::{
    ffi::OsString,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;

/// Raw arguments that spell out a help request, wherever they appear.
const HELP_ARGS: [&str; 3] = ["-?", "/?", "--help"];

#[derive(Parser, Debug)]
#[command(
    name = "build-cleaner",
    about = "Clean build outputs from source code projects.",
    disable_help_flag = true
)]
pub struct Args {
    /// The folder to clean. Defaults to the current folder.
    #[arg(value_name = "FOLDER", conflicts_with = "named_folder")]
    pub folder: Option<PathBuf>,

    /// The folder to clean, given by name instead of by position.
    #[arg(long = "folder", id = "named_folder", value_name = "FOLDER")]
    pub named_folder: Option<PathBuf>,

    /// Whether or not to show verbose logs.
    #[arg(
        short = 'v',
        long = "verbose",
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub verbose: bool,

    /// A folder that receives a copy of everything written to the console
    #[arg(long = "log-folder", value_name = "FOLDER")]
    pub log_folder: Option<PathBuf>,

    /// Show the help message for this application.
    #[arg(short = '?', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,
}

/// The arguments could not be parsed.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ArgumentError(#[from] clap::Error);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    /// Absolute folder that will be cleaned.
    pub folder: PathBuf,
    pub verbose: bool,
    pub log_folder: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Run(Parameters),
    /// Help was requested. Holds the usage text; nothing else should happen.
    Help(String),
}

/// Turns the process arguments (program name first) into the parameters of a
/// cleaning run. Relative paths are resolved against `current_dir`, which must
/// be absolute.
pub fn resolve<I, T>(raw_args: I, current_dir: &Path) -> Result<Resolution, ArgumentError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let raw_args = raw_args.into_iter().map(Into::into).collect::<Vec<OsString>>();

    if raw_args
        .iter()
        .skip(1)
        .any(|arg| HELP_ARGS.iter().any(|help| arg == help))
    {
        return Ok(Resolution::Help(usage()));
    }

    let args = Args::try_parse_from(raw_args)?;

    if args.help {
        return Ok(Resolution::Help(usage()));
    }

    let folder = args.named_folder.or(args.folder).unwrap_or_default();

    Ok(Resolution::Run(Parameters {
        folder: absolute(current_dir, &folder),
        verbose: args.verbose,
        log_folder: args
            .log_folder
            .map(|log_folder| absolute(current_dir, &log_folder)),
    }))
}

pub fn usage() -> String {
    Args::command().render_help().to_string()
}

/// Joins `path` onto `current_dir` and folds away `.` and `..` components
/// without touching the filesystem.
fn absolute(current_dir: &Path, path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in current_dir.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}
