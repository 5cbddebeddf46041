use crate::email_clients::EmailClient;
use crate::notification::Notification;
use crate::utils::{error_chain_fmt, json_failure, json_success};
use actix_web::http::StatusCode;
use actix_web::web::{self, Either};
use actix_web::{HttpResponse, ResponseError};
use anyhow::Context;
use serde::de::DeserializeOwned;

const INVALID_FORM_MESSAGE: &str = "Invalid form data. Please check your input and try again.";

#[derive(thiserror::Error)]
pub enum SubmissionError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{user_message}")]
    DispatchError {
        user_message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl std::fmt::Debug for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubmissionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SubmissionError::DispatchError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // What went wrong stays in the logs; callers only get the generic message.
    fn error_response(&self) -> HttpResponse {
        let message = match self {
            SubmissionError::ValidationError(_) => INVALID_FORM_MESSAGE,
            SubmissionError::DispatchError { user_message, .. } => *user_message,
        };
        json_failure(self.status_code(), message)
    }
}

/// Validates a submission of kind `N`, relays it to the business inbox and
/// tells the visitor how it went. The body may be JSON or url-encoded.
#[tracing::instrument(
    name = "Relaying a form submission",
    skip_all,
    fields(kind = N::KIND, reply_domain = tracing::field::Empty)
)]
pub async fn submit<F, N>(
    payload: Result<Either<web::Json<F>, web::Form<F>>, actix_web::Error>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, SubmissionError>
where
    F: DeserializeOwned + 'static,
    N: Notification + TryFrom<F, Error = String>,
{
    let form = match payload {
        Ok(Either::Left(json)) => json.into_inner(),
        Ok(Either::Right(form)) => form.into_inner(),
        Err(e) => {
            tracing::debug!(error = %e, "Submission body could not be decoded");
            return Err(SubmissionError::ValidationError(e.to_string()));
        }
    };

    let notification = N::try_from(form).map_err(|e| {
        tracing::debug!(reason = %e, "Submission failed validation");
        SubmissionError::ValidationError(e)
    })?;
    tracing::Span::current().record("reply_domain", notification.reply_to().domain());

    send_notification(&email_client, &notification)
        .await
        .map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Failed to relay the submission");
            SubmissionError::DispatchError {
                user_message: N::FAILURE_MESSAGE,
                source: e,
            }
        })?;

    Ok(json_success(N::SUCCESS_MESSAGE))
}

#[tracing::instrument(name = "Sending the notification email", skip_all)]
async fn send_notification<N: Notification>(
    email_client: &EmailClient,
    notification: &N,
) -> Result<(), anyhow::Error> {
    let html_body = notification
        .html_body()
        .context("Failed to render the notification body.")?;

    email_client
        .send_email(notification.reply_to(), &notification.subject(), &html_body)
        .await
        .context("The mail relay did not accept the notification.")?;

    Ok(())
}
