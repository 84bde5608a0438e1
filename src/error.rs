#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort the whole run before the per-student loop starts.
#[derive(Debug, Error)]
pub enum FatalError {
    /// The assignments root folder could not be listed.
    #[error("Could not read assignments folder {path}")]
    RootUnreadable {
        /// Path to the assignments root.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The grading criteria file could not be read.
    #[error("Could not read grading criteria file {path}")]
    CriteriaUnreadable {
        /// Path to the criteria file.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An entry in the extension allow-list was rejected.
    #[error("Invalid file extension {0:?} (expected something like \".txt\")")]
    InvalidExtension(String),
    /// The extension allow-list was empty.
    #[error("At least one allowed file extension is required")]
    EmptyExtensionSet,
}

/// Errors scoped to a single student. The orchestrator records these in the
/// report and moves on to the next folder.
#[derive(Debug, Error)]
pub enum StudentError {
    /// The student's folder could not be listed.
    #[error("Could not read student folder {path}")]
    FolderUnreadable {
        /// Path to the student's folder.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The prompt could not be assembled.
    #[error(transparent)]
    Prompt(#[from] PromptError),
    /// The completion service failed for this student.
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Errors raised while flattening criteria and submission content into a
/// chat message.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Flattening produced nothing to send.
    #[error("Prompt flattening produced an empty message")]
    EmptyMessage,
    /// The chat message builder rejected the payload.
    #[error("Failed to assemble chat message: {0}")]
    Message(String),
}

/// Errors crossing the completion-service boundary, translated from the
/// transport before they reach the grading loop.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Required OpenAI environment variables are missing.
    #[error("OPENAI_API_KEY must be set to grade submissions")]
    MissingConfig,
    /// The chat completion request failed.
    #[error("Chat completion request failed: {0}")]
    Request(#[from] async_openai::error::OpenAIError),
    /// The request did not complete within the configured deadline.
    #[error("Chat completion timed out after {0} seconds")]
    Timeout(u64),
    /// The response carried no message content.
    #[error("Chat completion response contained no content")]
    EmptyResponse,
}

/// Errors while writing the report artifact. Logged and counted by the
/// orchestrator, never fatal to the batch.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The prior artifact could not be removed at the start of a run.
    #[error("Could not delete prior report at {path}")]
    Remove {
        /// Path to the report artifact.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The report directory could not be created.
    #[error("Could not create report directory {path}")]
    CreateDir {
        /// Path to the report directory.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Appending a record to the artifact failed.
    #[error("Could not append to report at {path}")]
    Append {
        /// Path to the report artifact.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
