use askama_escape::{escape, Html};
use lettre::message::{Mailbox, Message, MultiPart};

use super::MailError;
use crate::app::{config::Config, domain::ContactSubmission};

/// Sender used when neither MAIL_FROM nor SMTP_USER is configured. Also the
/// recipient of last resort when the submitter email is not a mailbox.
pub const PLACEHOLDER_FROM: &str = "please-configure@example.com";

/// Build the email for a validated submission.
pub fn compose(config: &Config, submission: &ContactSubmission) -> Result<Message, MailError> {
    let smtp_user = config.smtp.user.as_deref();
    // Email is only checked for presence, so it may not be a usable mailbox.
    let submitter = submitter_mailbox(submission);

    let from = config
        .mail_from
        .as_deref()
        .or(smtp_user)
        .unwrap_or(PLACEHOLDER_FROM);
    let to = match config.mail_to.as_deref().or(smtp_user) {
        Some(address) => mailbox(address)?,
        None => match &submitter {
            Some(own) => own.clone(),
            None => mailbox(PLACEHOLDER_FROM)?,
        },
    };

    let mut builder = Message::builder().from(mailbox(from)?).to(to);
    if let Some(reply_to) = submitter {
        builder = builder.reply_to(reply_to);
    }

    builder
        .subject(subject(submission))
        .multipart(MultiPart::alternative_plain_html(
            text_body(submission),
            html_body(submission),
        ))
        .map_err(|e| MailError::Build(e.to_string()))
}

fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

fn submitter_mailbox(submission: &ContactSubmission) -> Option<Mailbox> {
    let address = submission.email.trim();
    match mailbox(address) {
        Ok(mailbox) => Some(mailbox),
        Err(err) => {
            tracing::warn!(%err, "submitter email is not a mailbox, omitting reply-to");
            None
        }
    }
}

fn subject(submission: &ContactSubmission) -> String {
    format!("طلب تواصل جديد من {}", submission.full_name())
}

fn project_label(submission: &ContactSubmission) -> &str {
    match submission.project_type.trim() {
        "" => "-",
        value => value,
    }
}

/// Plain-text body.
pub fn text_body(submission: &ContactSubmission) -> String {
    format!(
        "الاسم: {}\nالبريد: {}\nالهاتف: {}\nنوع المشروع: {}\n\nالرسالة:\n{}\n",
        submission.full_name(),
        submission.email.trim(),
        submission.phone.trim(),
        project_label(submission),
        submission.message.trim(),
    )
}

/// HTML body. All submitter content is escaped.
pub fn html_body(submission: &ContactSubmission) -> String {
    format!(
        concat!(
            "<div dir=\"rtl\">",
            "<h2>طلب تواصل جديد</h2>",
            "<p><strong>الاسم:</strong> {}</p>",
            "<p><strong>البريد:</strong> {}</p>",
            "<p><strong>الهاتف:</strong> {}</p>",
            "<p><strong>نوع المشروع:</strong> {}</p>",
            "<p><strong>الرسالة:</strong></p>",
            "<p style=\"white-space: pre-wrap\">{}</p>",
            "</div>"
        ),
        escape(&submission.full_name(), Html),
        escape(submission.email.trim(), Html),
        escape(submission.phone.trim(), Html),
        escape(project_label(submission), Html),
        escape(submission.message.trim(), Html),
    )
}
