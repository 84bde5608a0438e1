//! # gradebot
//!
//! A batch autograder: points it at a folder of per-student submissions and
//! a grading criteria file, and it sends each student's combined work to a
//! chat completion service, collects the feedback into a single report, and
//! optionally emails that report to the instructor.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// The completion-service boundary and its OpenAI-backed implementation
pub mod completion;
/// Environment-backed runtime configuration
pub mod config;
/// Typed error taxonomy: fatal, per-student, and report-write channels
pub mod error;
/// The grading orchestrator and its run summary
pub mod grade;
/// Best-effort email delivery of the finished report
pub mod notify;
/// Flattening criteria and submissions into single-turn prompts
pub mod prompt;
/// The append-only report artifact and its location provider
pub mod report;
/// Student folder aggregation and the extension allow-list
pub mod submission;

pub use completion::{CompletionService, OpenAiService};
pub use error::{CompletionError, FatalError, PromptError, ReportError, StudentError};
pub use grade::{GradeResult, NO_SUBMISSION, RunSummary, grade_assignments};
pub use prompt::{Prompt, build_prompt};
pub use report::{REPORT_MISSING, ReportPaths, RunState, read_report, write_record};
pub use submission::{ExtensionSet, combine_student_files};
