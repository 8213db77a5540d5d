use crate::{fs::FileSystem, output::Output};
use anyhow::Result;
use log::{debug, info, warn};
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Build output folders looked for under the folder being cleaned, in the
/// order they are reported.
pub const CANDIDATE_FOLDERS: [&str; 5] = ["outputs", "out", "target", "output", "dist"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcome {
    Missing,
    Deleted,
    /// The delete was attempted and failed with this message.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateReport {
    pub path: PathBuf,
    pub outcome: CandidateOutcome,
}

#[derive(Debug, Default)]
pub struct RunOutcome {
    pub target_found: bool,
    pub candidates: Vec<CandidateReport>,
}

impl RunOutcome {
    /// Number of candidates a delete was attempted on, successful or not.
    pub fn attempted(&self) -> usize {
        self.candidates
            .iter()
            .filter(|candidate| candidate.outcome != CandidateOutcome::Missing)
            .count()
    }

    pub fn deleted(&self) -> usize {
        self.candidates
            .iter()
            .filter(|candidate| candidate.outcome == CandidateOutcome::Deleted)
            .count()
    }
}

pub struct Cleaner<F: FileSystem> {
    folder: PathBuf,
    fs: F,
}

impl<F: FileSystem> Cleaner<F> {
    pub fn new(folder: PathBuf, fs: F) -> Self {
        Self { folder, fs }
    }

    /// Deletes every candidate folder that exists, reporting as it goes.
    ///
    /// A failed delete is reported and the scan moves on. Only failures of the
    /// output itself are returned as errors.
    pub fn start<W: Write>(&self, output: &mut Output<W>) -> Result<RunOutcome> {
        output.write_line("Cleaning...")?;

        if !self.fs.folder_exists(&self.folder) {
            output.write_line(&format!(
                "The folder {} doesn't exist.",
                self.folder.display()
            ))?;

            return Ok(RunOutcome::default());
        }

        let mut outcome = RunOutcome {
            target_found: true,
            candidates: Vec::with_capacity(CANDIDATE_FOLDERS.len()),
        };

        for name in CANDIDATE_FOLDERS {
            let path = self.folder.join(name);
            let candidate_outcome = self.clean(&path, output)?;

            outcome.candidates.push(CandidateReport {
                path,
                outcome: candidate_outcome,
            });
        }

        if outcome.attempted() == 0 {
            output.write_line("Found no folders to delete.")?;
        }

        Ok(outcome)
    }

    fn clean<W: Write>(&self, path: &Path, output: &mut Output<W>) -> Result<CandidateOutcome> {
        debug!("Checking {}", path.display());
        output.verbose_line(&format!("Checking if {} exists...", path.display()))?;

        if !self.fs.folder_exists(path) {
            output.verbose_line("Doesn't exist.")?;

            return Ok(CandidateOutcome::Missing);
        }

        output.write(&format!("Deleting folder {}...", path.display()))?;

        match self.fs.delete_folder(path) {
            Ok(()) => {
                info!("Deleted {}", path.display());
                output.write_line(" Done.")?;

                Ok(CandidateOutcome::Deleted)
            }
            Err(err) => {
                warn!("Could not delete {}: {err}", path.display());
                output.write_line(" Failed.")?;
                output.write_indented_line(1, &err.to_string())?;

                Ok(CandidateOutcome::Failed(err.to_string()))
            }
        }
    }
}
