use crate::configuration::EmailClientSettings;
use crate::domain::SubmitterEmail;
use anyhow::Context;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Relays notifications to the business inbox through the mail relay's HTTP API.
///
/// One instance is built at startup and shared by every worker; reqwest pools
/// the underlying connections.
pub struct EmailClient {
    http_client: Client,
    // the relay endpoint that accepts and delivers messages for us
    base_url: String,
    sender: SubmitterEmail,
    sender_name: String,
    recipient: SubmitterEmail,
    username: String,
    password: Secret<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: &'a str,
    html_body: &'a str,
}

impl EmailClient {
    pub fn from_settings(settings: &EmailClientSettings) -> Result<Self, anyhow::Error> {
        let sender = settings
            .sender()
            .map_err(anyhow::Error::msg)
            .context("Invalid sender email address.")?;
        let recipient = settings
            .recipient()
            .map_err(anyhow::Error::msg)
            .context("Invalid recipient email address.")?;

        if settings.accept_invalid_certs {
            tracing::warn!("TLS certificate validation is disabled for the mail relay.");
        }

        let http_client = Client::builder()
            .timeout(settings.timeout())
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()
            .context("Failed to build the mail relay HTTP client.")?;

        Ok(Self {
            http_client,
            base_url: settings.base_url(),
            sender,
            sender_name: settings.sender_name.clone(),
            recipient,
            username: settings.username.clone(),
            password: Secret::new(settings.password.expose_secret().clone()),
        })
    }

    /// Makes a single delivery attempt. A timeout, a transport error or a
    /// non-2xx answer from the relay all surface as `Err`.
    pub async fn send_email(
        &self,
        reply_to: &SubmitterEmail,
        subject: &str,
        html_content: &str,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/email", self.base_url);
        let from = format!("{} <{}>", self.sender_name, self.sender);
        let request_body = SendEmailRequest {
            from: &from,
            to: self.recipient.as_ref(),
            reply_to: reply_to.as_ref(),
            subject,
            html_body: html_content,
        };

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!(status = %response.status(), "Mail relay accepted the message.");
        Ok(())
    }
}
