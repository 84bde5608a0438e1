#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::time::Duration;

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::header::ContentType,
    transport::smtp::authentication::Credentials,
};
use tracing::{error, info, warn};

use crate::{config, config::SmtpEnv, report};

/// Delivery attempts before giving up.
const MAX_RETRIES: usize = 3;

/// Pause between delivery attempts.
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Returns whether the body is worth delivering. The missing-report
/// sentinel never is: it means the run produced no artifact to send.
pub fn should_deliver(body: &str) -> bool {
    body != report::REPORT_MISSING
}

/// Emails the report body to the configured instructor address.
///
/// Best-effort: missing SMTP settings, transport construction failures, and
/// delivery failures are logged and swallowed. Nothing here can reach back
/// into the grading loop.
pub async fn send_report(body: &str) {
    if !should_deliver(body) {
        warn!("No report artifact was produced; skipping delivery");
        return;
    }

    let Some(smtp) = config::smtp_config() else {
        warn!("SMTP settings missing; skipping report delivery");
        return;
    };

    info!("Sending grading results to {}", smtp.recipient());
    let message = match build_message(&smtp, body) {
        Ok(message) => message,
        Err(err) => {
            error!("Could not assemble report email: {err}");
            return;
        }
    };
    let mailer = match build_mailer(&smtp) {
        Ok(mailer) => mailer,
        Err(err) => {
            error!("Could not connect to SMTP relay {}: {err}", smtp.server());
            return;
        }
    };

    for attempt in 1..=MAX_RETRIES {
        match mailer.send(message.clone()).await {
            Ok(_) => {
                info!("Report delivered to {}", smtp.recipient());
                return;
            }
            Err(err) => {
                warn!(
                    "Delivery to {} failed (attempt {attempt} of {MAX_RETRIES}): {err}",
                    smtp.recipient()
                );
                if attempt < MAX_RETRIES {
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }
    error!(
        "Delivery to {} failed after {MAX_RETRIES} attempts",
        smtp.recipient()
    );
}

/// Assembles the plain-text report email.
fn build_message(smtp: &SmtpEnv, body: &str) -> anyhow::Result<Message> {
    let message = Message::builder()
        .from(smtp.sender().parse()?)
        .to(smtp.recipient().parse()?)
        .subject(format!("{}, your grading is done!", smtp.first_name()))
        .header(ContentType::TEXT_PLAIN)
        .body(format!("{body}\n\nBest,\nGrading Bot"))?;
    Ok(message)
}

/// Builds a STARTTLS SMTP transport from the configured relay settings.
fn build_mailer(smtp: &SmtpEnv) -> anyhow::Result<AsyncSmtpTransport<Tokio1Executor>> {
    let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(smtp.server())?
        .port(smtp.port())
        .credentials(Credentials::new(
            smtp.sender().to_string(),
            smtp.password().to_string(),
        ))
        .build();
    Ok(mailer)
}
