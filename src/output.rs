use anyhow::{Context, Result};
use chrono::Local;
use log::debug;
use std::{
    fs::{create_dir_all, File},
    io::{self, Write},
    path::Path,
};

const INDENT: &str = "  ";
const VERBOSE_PREFIX: &str = "VERBOSE: ";

/// Line-oriented sink for the cleaning transcript.
///
/// Verbose lines are dropped unless verbose mode is on. When a mirror is
/// attached, every byte that reaches the console is copied to it as well.
pub struct Output<W: Write> {
    writer: W,
    mirror: Option<File>,
    verbose: bool,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W, verbose: bool) -> Self {
        Self {
            writer,
            mirror: None,
            verbose,
        }
    }

    pub fn with_mirror(mut self, mirror: File) -> Self {
        self.mirror = Some(mirror);
        self
    }

    /// Writes `text` without ending the line.
    pub fn write(&mut self, text: &str) -> io::Result<()> {
        self.emit(text)
    }

    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write_indented_line(0, text)
    }

    /// Writes `text` on its own line, `indent` levels deep.
    pub fn write_indented_line(&mut self, indent: usize, text: &str) -> io::Result<()> {
        self.emit(&format!("{}{text}\n", INDENT.repeat(indent)))
    }

    pub fn verbose_line(&mut self, text: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }

        self.write_line(&format!("{VERBOSE_PREFIX}{text}"))
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;

        if let Some(mirror) = &mut self.mirror {
            mirror.write_all(text.as_bytes())?;
        }

        Ok(())
    }
}

/// Creates a fresh, timestamped transcript file inside `log_folder`.
pub fn open_transcript(log_folder: &Path) -> Result<File> {
    create_dir_all(log_folder)
        .with_context(|| format!("Could not create log folder {}!", log_folder.display()))?;

    let path = log_folder.join(format!("{}.log", Local::now().format("%Y-%m-%d_%H-%M-%S")));
    debug!("Mirroring transcript to {}", path.display());

    File::create(&path).with_context(|| format!("Could not create log file {}!", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{read_dir, read_to_string};

    fn text(output: Output<Vec<u8>>) -> String {
        String::from_utf8(output.into_inner()).unwrap()
    }

    #[test]
    fn write_continues_the_current_line() {
        let mut output = Output::new(Vec::new(), false);

        output.write("Deleting folder /x...").unwrap();
        output.write_line(" Done.").unwrap();

        assert_eq!(text(output), "Deleting folder /x... Done.\n");
    }

    #[test]
    fn indentation_is_two_spaces_per_level() {
        let mut output = Output::new(Vec::new(), false);

        output.write_indented_line(1, "one").unwrap();
        output.write_indented_line(2, "two").unwrap();

        assert_eq!(text(output), "  one\n    two\n");
    }

    #[test]
    fn verbose_lines_need_verbose_mode() {
        let mut quiet = Output::new(Vec::new(), false);
        quiet.verbose_line("hidden").unwrap();
        assert_eq!(text(quiet), "");

        let mut verbose = Output::new(Vec::new(), true);
        verbose.verbose_line("shown").unwrap();
        assert_eq!(text(verbose), "VERBOSE: shown\n");
    }

    #[test]
    fn mirror_receives_console_text() {
        let dir = tempfile::tempdir().unwrap();
        let log_folder = dir.path().join("logs");

        let mut output =
            Output::new(Vec::new(), true).with_mirror(open_transcript(&log_folder).unwrap());
        output.write_line("Cleaning...").unwrap();
        output.verbose_line("Doesn't exist.").unwrap();
        let console = text(output);

        let logs = read_dir(&log_folder)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect::<Vec<_>>();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].extension().unwrap(), "log");
        assert_eq!(read_to_string(&logs[0]).unwrap(), console);
        assert_eq!(console, "Cleaning...\nVERBOSE: Doesn't exist.\n");
    }
}
