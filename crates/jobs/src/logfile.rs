//! Append-only log file writing shared by all jobs.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Append the given lines to the log file, one per line, creating the file
/// on demand.
///
/// # Errors
///
/// Returns `io::Error` if the file cannot be opened or written. This is
/// the only failure a job propagates; endpoint failures become log lines.
pub fn append_lines(path: &Path, lines: &[String]) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(())
}
