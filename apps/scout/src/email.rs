//! SMTP dispatch of the rendered HTML report.

use anyhow::{Context, Result};
use chrono::Local;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::EmailConfig;

const REPORT_FILENAME: &str = "JobEvaluations.html";

/// Sends the HTML report as an attachment. A failure here is the caller's to
/// log; the report file already exists on disk either way.
pub async fn send_report(config: &EmailConfig, report_html: &str) -> Result<()> {
    let subject = format!(
        "Job Fit Evaluations - {}",
        Local::now().format("%b %-d %-I:%M %p")
    );

    let message = Message::builder()
        .from(config.from.parse().context("invalid EMAIL_FROM address")?)
        .to(config.to.parse().context("invalid EMAIL_TO address")?)
        .subject(subject)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(
                    "Hello,\n\nPlease find the job fit evaluations attached as an HTML file.\n\n\
                     Thanks,\nJob Scout"
                        .to_string(),
                ))
                .singlepart(
                    Attachment::new(REPORT_FILENAME.to_string())
                        .body(report_html.to_string(), ContentType::TEXT_HTML),
                ),
        )
        .context("failed to build email message")?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        .context("failed to configure SMTP transport")?
        .port(config.smtp_port)
        .credentials(Credentials::new(
            config.from.clone(),
            config.password.clone(),
        ))
        .build();

    transport
        .send(message)
        .await
        .context("could not send email")?;

    info!(to = %config.to, "evaluation report emailed");
    Ok(())
}
