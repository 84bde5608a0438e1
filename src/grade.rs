#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{
    completion::CompletionService,
    config,
    error::{FatalError, StudentError},
    prompt::build_prompt,
    report::{self, ReportPaths, RunState},
    submission::{ExtensionSet, combine_student_files},
};

/// Feedback recorded for students whose folder held nothing gradeable.
pub const NO_SUBMISSION: &str = "No assignment submitted";

#[derive(Clone, Default, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
/// One student's grading outcome, as it appears in the report
pub struct GradeResult {
    /// * `student`: name derived from the student's folder
    #[builder(getter)]
    pub(crate) student:  String,
    /// * `feedback`: feedback text from the completion service, or a
    ///   marker describing why there is none
    #[builder(getter)]
    pub(crate) feedback: String,
}

impl GradeResult {
    /// Creates a grading outcome for a student.
    pub fn new(student: impl Into<String>, feedback: impl Into<String>) -> Self {
        Self {
            student:  student.into(),
            feedback: feedback.into(),
        }
    }

    /// Returns the student's name.
    pub fn student(&self) -> &str {
        &self.student
    }

    /// Returns the recorded feedback text.
    pub fn feedback(&self) -> &str {
        &self.feedback
    }
}

impl Display for GradeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Student: {}\nGrade: {}", self.student, self.feedback)
    }
}

/// End-of-run counts surfaced to the operator.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunSummary {
    /// Student folders processed.
    pub students:       usize,
    /// Students graded by the completion service.
    pub graded:         usize,
    /// Students with nothing gradeable in their folder.
    pub no_submission:  usize,
    /// Students whose grading failed and was recorded as a failure note.
    pub failed:         usize,
    /// Records lost because the report write itself failed.
    pub write_failures: usize,
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Processed {} student(s): {} graded, {} without submissions, {} failed, {} report \
             record(s) lost to write errors",
            self.students, self.graded, self.no_submission, self.failed, self.write_failures
        )
    }
}

/// What happened for one student, before it is flattened into a record.
enum StudentOutcome {
    /// The completion service returned feedback.
    Graded(String),
    /// The folder held nothing gradeable.
    NoSubmission,
    /// Grading failed; the error is recorded in the report.
    Failed(StudentError),
}

/// Grades every student folder under `root` and writes one record per
/// student to the report artifact.
///
/// Folders are processed strictly sequentially, in sorted directory-listing
/// order. A failure while grading one student is caught at the student
/// boundary, recorded in that student's report entry, and never stops the
/// loop. Only pre-loop conditions (an unreadable root) abort the run.
pub async fn grade_assignments<S>(
    root: &Path,
    criteria: &str,
    allowed: &ExtensionSet,
    service: &S,
    paths: &ReportPaths,
) -> Result<RunSummary, FatalError>
where
    S: CompletionService + ?Sized,
{
    let folders = student_folders(root)?;
    let mut state = RunState::new();
    let mut summary = RunSummary::default();

    for folder in folders {
        let name = folder
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        summary.students += 1;

        let feedback = match grade_student(&folder, criteria, allowed, service).await {
            StudentOutcome::Graded(feedback) => {
                info!("Graded combined assignments for {name}");
                summary.graded += 1;
                feedback
            }
            StudentOutcome::NoSubmission => {
                info!("No submission found for {name}");
                summary.no_submission += 1;
                NO_SUBMISSION.to_string()
            }
            StudentOutcome::Failed(err) => {
                error!("Grading failed for {name}: {err}");
                summary.failed += 1;
                format!("Grading failed: {err}")
            }
        };

        let result = GradeResult::new(&name, feedback);
        if let Err(err) = report::write_record(paths, &result, &mut state) {
            warn!("Could not record grade for {name}: {err}");
            summary.write_failures += 1;
        }
    }

    if summary.write_failures > 0 {
        warn!(
            "{} report record(s) were lost to write errors",
            summary.write_failures
        );
    }
    info!("{summary}");
    Ok(summary)
}

/// Runs the aggregate / prompt / complete steps for one student. Every
/// failure is folded into the returned outcome.
async fn grade_student<S>(
    folder: &Path,
    criteria: &str,
    allowed: &ExtensionSet,
    service: &S,
) -> StudentOutcome
where
    S: CompletionService + ?Sized,
{
    let content = match combine_student_files(folder, allowed) {
        Ok(content) => content,
        Err(err) => return StudentOutcome::Failed(err),
    };
    if content.is_empty() {
        return StudentOutcome::NoSubmission;
    }

    let prompt = match build_prompt(criteria, &content, config::max_prompt_chars()) {
        Ok(prompt) => prompt,
        Err(err) => return StudentOutcome::Failed(err.into()),
    };

    match service.complete(prompt).await {
        Ok(feedback) => StudentOutcome::Graded(feedback),
        Err(err) => StudentOutcome::Failed(err.into()),
    }
}

/// Lists the immediate subdirectories of the assignments root in sorted
/// order. An unreadable root is fatal to the run.
fn student_folders(root: &Path) -> Result<Vec<PathBuf>, FatalError> {
    let mut folders = std::fs::read_dir(root)
        .map_err(|source| FatalError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        })?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect::<Vec<_>>();
    folders.sort();
    Ok(folders)
}
