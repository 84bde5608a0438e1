#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # gradebot
//!
//! Command-line entry point for the batch autograder. Point it at an
//! assignments folder (one subfolder per student) and a grading criteria
//! file; it grades every student through a chat completion service, writes
//! a single report, and can email that report to the instructor.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bpaf::*;
use dotenvy::dotenv;
use gradebot::{
    ExtensionSet, FatalError, OpenAiService, ReportPaths, grade_assignments, notify, read_report,
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Arguments for a grading run.
#[derive(Debug, Clone)]
struct GradeArgs {
    /// Folder containing one subfolder per student.
    assignments: PathBuf,
    /// Grading criteria text file.
    criteria:    PathBuf,
    /// Allowed submission file extensions.
    extensions:  Vec<String>,
    /// Whether to email the report after the run.
    email:       bool,
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Grade every student folder under the assignments root
    Grade(GradeArgs),
    /// Print the report artifact
    Report,
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses grading-run arguments
    fn grade_args() -> impl Parser<GradeArgs> {
        let assignments = long("assignments")
            .help("Folder containing one subfolder per student")
            .argument::<PathBuf>("DIR");
        let criteria = long("criteria")
            .help("Text file with the grading criteria")
            .argument::<PathBuf>("FILE");
        let extensions = long("ext")
            .help("Allowed submission file extension, e.g. .txt (repeatable)")
            .argument::<String>("EXT")
            .many();
        let email = long("email")
            .help("Email the finished report to the configured instructor address")
            .switch();
        construct!(GradeArgs {
            assignments,
            criteria,
            extensions,
            email
        })
    }

    let grade = construct!(Cmd::Grade(grade_args()))
        .to_options()
        .command("grade")
        .help("Grade every student folder under an assignments root");

    let report = pure(Cmd::Report)
        .to_options()
        .command("report")
        .help("Print the grading report");

    let cmd = construct!([grade, report]);

    cmd.to_options()
        .descr("Batch autograder for student submissions")
        .run()
}

/// Runs a full grading batch and optionally emails the report.
async fn run_grade(args: GradeArgs) -> Result<()> {
    let criteria = std::fs::read_to_string(&args.criteria).map_err(|source| {
        FatalError::CriteriaUnreadable {
            path: args.criteria.clone(),
            source,
        }
    })?;

    let extensions = if args.extensions.is_empty() {
        vec![".txt".to_string()]
    } else {
        args.extensions
    };
    let allowed = ExtensionSet::new(extensions)?;

    let service = OpenAiService::from_config()
        .context("Completion service is not configured; check your .env file")?;
    let paths = ReportPaths::from_config();

    let summary = grade_assignments(&args.assignments, &criteria, &allowed, &service, &paths)
        .await
        .context("The grading run failed before any student was processed")?;
    println!("Grading completed! {summary}");
    println!("Report written to {}", paths.artifact().display());

    if args.email {
        notify::send_report(&read_report(&paths)).await;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    match options() {
        Cmd::Grade(args) => run_grade(args).await?,
        Cmd::Report => println!("{}", read_report(&ReportPaths::from_config())),
    }

    Ok(())
}
