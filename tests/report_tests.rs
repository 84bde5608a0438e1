use std::{fs, path::PathBuf};

use gradebot::{GradeResult, REPORT_MISSING, ReportPaths, RunState, read_report, write_record};
use uuid::Uuid;

fn temp_results_dir() -> PathBuf {
    std::env::temp_dir().join(format!("gradebot-report-{}", Uuid::new_v4()))
}

#[test]
fn first_write_creates_directory_and_record() {
    let dir = temp_results_dir();
    let paths = ReportPaths::new(&dir);
    let mut state = RunState::new();

    let result = GradeResult::new("alice", "Good work");
    write_record(&paths, &result, &mut state).expect("write should succeed");

    assert_eq!(
        read_report(&paths),
        "\n\n\n\nStudent: alice\nGrade: Good work"
    );
    assert!(!state.is_first_write());

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn first_write_truncates_a_prior_artifact() {
    let dir = temp_results_dir();
    let paths = ReportPaths::new(&dir);
    fs::create_dir_all(&dir).expect("create results dir");
    fs::write(paths.artifact(), "stale record from last run").expect("seed prior artifact");

    let mut state = RunState::new();
    let result = GradeResult::new("alice", "Fresh feedback");
    write_record(&paths, &result, &mut state).expect("write should succeed");

    let report = read_report(&paths);
    assert!(!report.contains("stale record"));
    assert!(report.contains("Student: alice"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn later_writes_append_without_truncating() {
    let dir = temp_results_dir();
    let paths = ReportPaths::new(&dir);
    let mut state = RunState::new();

    write_record(&paths, &GradeResult::new("alice", "A"), &mut state)
        .expect("first write should succeed");
    write_record(&paths, &GradeResult::new("bob", "B"), &mut state)
        .expect("second write should succeed");

    let report = read_report(&paths);
    let alice = report.find("Student: alice").expect("alice record present");
    let bob = report.find("Student: bob").expect("bob record present");
    assert!(alice < bob);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn missing_artifact_reads_as_sentinel() {
    let paths = ReportPaths::new(temp_results_dir());
    assert_eq!(read_report(&paths), REPORT_MISSING);
}

#[test]
fn artifact_lives_under_the_results_dir() {
    let dir = temp_results_dir();
    let paths = ReportPaths::new(&dir);
    assert_eq!(paths.artifact(), dir.join("grading_results.txt"));
}
