#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{config, error::ReportError, grade::GradeResult};

/// File name of the report artifact.
pub const REPORT_FILE_NAME: &str = "grading_results.txt";

/// Sentinel returned by [`read_report`] when no artifact exists.
pub const REPORT_MISSING: &str = "The grading_results.txt file does not exist.";

/// Location provider for the report artifact.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    /// Directory holding the artifact.
    results_dir: PathBuf,
}

impl ReportPaths {
    /// Creates a provider rooted at the given directory.
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    /// Creates a provider using the configured default location.
    pub fn from_config() -> Self {
        Self::new(config::results_dir())
    }

    /// Returns the directory holding the artifact.
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Returns the path of the report artifact.
    pub fn artifact(&self) -> PathBuf {
        self.results_dir.join(REPORT_FILE_NAME)
    }
}

/// Tracks whether the current run has written its first record, which
/// decides whether a pre-existing artifact is cleared.
#[derive(Debug)]
pub struct RunState {
    /// True until the first successful record write of the run.
    first_write: bool,
}

impl RunState {
    /// Creates run state for a fresh run.
    pub fn new() -> Self {
        Self { first_write: true }
    }

    /// Returns true if no record has been written yet this run.
    pub fn is_first_write(&self) -> bool {
        self.first_write
    }

    /// Records that a write succeeded. Flipped at most once per run.
    fn mark_written(&mut self) {
        self.first_write = false;
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends one student's record to the report artifact.
///
/// On the first write of a run a pre-existing artifact is deleted first, so
/// each run starts from a clean report. The artifact and its directory are
/// created on demand. The file handle does not outlive the call.
pub fn write_record(
    paths: &ReportPaths,
    result: &GradeResult,
    state: &mut RunState,
) -> Result<(), ReportError> {
    let artifact = paths.artifact();

    if state.is_first_write() && artifact.exists() {
        info!("Deleting prior grading report");
        std::fs::remove_file(&artifact).map_err(|source| ReportError::Remove {
            path: artifact.clone(),
            source,
        })?;
    }

    std::fs::create_dir_all(paths.results_dir()).map_err(|source| ReportError::CreateDir {
        path: paths.results_dir().to_path_buf(),
        source,
    })?;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&artifact)
        .map_err(|source| ReportError::Append {
            path: artifact.clone(),
            source,
        })?;
    file.write_all(
        format!(
            "\n\n\n\nStudent: {}\nGrade: {}",
            result.student(),
            result.feedback()
        )
        .as_bytes(),
    )
    .map_err(|source| ReportError::Append {
        path: artifact,
        source,
    })?;

    state.mark_written();
    Ok(())
}

/// Returns the report artifact's contents, or a sentinel string when the
/// artifact is absent or unreadable. Never fails.
pub fn read_report(paths: &ReportPaths) -> String {
    std::fs::read_to_string(paths.artifact()).unwrap_or_else(|_| REPORT_MISSING.to_string())
}
