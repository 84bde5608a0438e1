use gradebot::{REPORT_MISSING, notify};

#[test]
fn the_missing_report_sentinel_is_not_worth_delivering() {
    assert!(!notify::should_deliver(REPORT_MISSING));
    assert!(notify::should_deliver("Student: alice\nGrade: Good work"));
}

#[tokio::test]
async fn send_report_skips_the_sentinel() {
    // Returns immediately: no SMTP configuration is consulted for a run
    // that produced no artifact.
    notify::send_report(REPORT_MISSING).await;
}
