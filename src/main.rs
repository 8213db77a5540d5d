pub mod args;
pub mod cleaner;
pub mod fs;
pub mod output;

use anyhow::{Context, Result};
use args::Resolution;
use cleaner::Cleaner;
use fs::LocalFileSystem;
use log::debug;
use output::{open_transcript, Output};
use std::{
    env::{args_os, current_dir},
    ffi::OsString,
    io::{stdout, Write},
    path::Path,
    process::exit,
    time::Instant,
};

/// Exit code when help was shown or the arguments were unusable.
const HELP_EXIT_CODE: i32 = -1;

fn main() {
    env_logger::init();

    let code = match current_dir()
        .context("Could not get the current folder!")
        .and_then(|current_dir| run(args_os(), &current_dir, stdout().lock()))
    {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:?}", err);
            1
        }
    };

    exit(code);
}

fn run<I, T, W>(raw_args: I, current_dir: &Path, writer: W) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    W: Write,
{
    let parameters = match args::resolve(raw_args, current_dir) {
        Ok(Resolution::Run(parameters)) => parameters,
        Ok(Resolution::Help(usage)) => {
            Output::new(writer, false).write(&usage)?;
            return Ok(HELP_EXIT_CODE);
        }
        Err(err) => {
            let mut output = Output::new(writer, false);
            output.write(&err.to_string())?;
            output.write(&args::usage())?;
            return Ok(HELP_EXIT_CODE);
        }
    };

    debug!(
        "Cleaning {} (verbose: {})",
        parameters.folder.display(),
        parameters.verbose
    );

    let stopwatch = Instant::now();

    let mut output = Output::new(writer, parameters.verbose);
    if let Some(log_folder) = &parameters.log_folder {
        output = output.with_mirror(open_transcript(log_folder)?);
    }

    let outcome = Cleaner::new(parameters.folder, LocalFileSystem)
        .start(&mut output)
        .context("Could not write the cleaning report!")?;

    if outcome.target_found {
        debug!(
            "Deleted {} of {} folders found",
            outcome.deleted(),
            outcome.attempted()
        );
    }

    output.write_line(&format!(
        "Done ({:.1})",
        stopwatch.elapsed().as_secs_f64()
    ))?;

    Ok(0)
}
