use axum::{
    extract::{FromRequest, Request, State},
    http::header,
    routing::post,
    Form, Json, Router,
};
use serde::Serialize;

use crate::app::{
    domain::{validate_submission, ContactSubmission},
    error::AppError,
    mail::{self, Delivery, MailError},
    AppState,
};

/// Shown after a successful (or silently discarded) submission.
pub const SUBMITTED: &str = "تم استلام رسالتك بنجاح، سنتواصل معك قريباً";

/// Maximum accepted request body, JSON or URL-encoded.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// Where a submission ended up.
#[derive(Debug)]
pub enum ContactOutcome {
    /// Honeypot was filled in. Nothing was validated or sent.
    Acknowledged,
    /// Validated and handed to a transport.
    Dispatched(Delivery),
    /// Failed validation. Errors in rule order.
    Rejected(Vec<String>),
    /// Transport resolution or send failed.
    Failed(MailError),
}

/// Run a submission through honeypot, validation and dispatch.
pub async fn process_submission(state: &AppState, submission: &ContactSubmission) -> ContactOutcome {
    if submission.is_bot() {
        tracing::warn!("honeypot field filled, acknowledging without sending");
        return ContactOutcome::Acknowledged;
    }

    let errors = validate_submission(submission);
    if !errors.is_empty() {
        return ContactOutcome::Rejected(errors);
    }

    match mail::dispatch(&state.mail, &state.config, submission).await {
        Ok(delivery) => ContactOutcome::Dispatched(delivery),
        Err(err) => ContactOutcome::Failed(err),
    }
}

/// Contact submission body, from either a JSON or a URL-encoded form.
#[derive(Debug)]
pub struct ContactPayload(pub ContactSubmission);

impl<S> FromRequest<S> for ContactPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(submission) = Form::<ContactSubmission>::from_request(req, state)
                .await
                .map_err(|r| AppError::Rejected {
                    status: r.status(),
                    detail: r.body_text(),
                })?;
            Ok(Self(submission))
        } else {
            let Json(submission) = Json::<ContactSubmission>::from_request(req, state)
                .await
                .map_err(|r| AppError::Rejected {
                    status: r.status(),
                    detail: r.body_text(),
                })?;
            Ok(Self(submission))
        }
    }
}

/// Success response body.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub message: &'static str,
}

/// POST /api/contact
pub async fn submit(
    State(state): State<AppState>,
    ContactPayload(submission): ContactPayload,
) -> Result<Json<SubmitResponse>, AppError> {
    match process_submission(&state, &submission).await {
        ContactOutcome::Acknowledged | ContactOutcome::Dispatched(_) => Ok(Json(SubmitResponse {
            ok: true,
            message: SUBMITTED,
        })),
        ContactOutcome::Rejected(errors) => Err(AppError::Validation(errors)),
        ContactOutcome::Failed(err) => Err(AppError::Dispatch(err)),
    }
}

/// Contact routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/contact", post(submit))
}
