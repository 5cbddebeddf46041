use crate::domain::{BookingRequest, ContactMessage, SubmitterEmail};
use crate::sanitizer::sanitize;
use crate::templating::{BookingTemplate, ContactTemplate};
use askama::Template;

/// A validated submission that can be relayed to the business inbox.
///
/// Each kind carries its own subject line, body template and the messages
/// returned to the visitor; the submission pipeline in `routes::submission`
/// is otherwise identical for every kind.
pub trait Notification {
    /// Short label used in logs.
    const KIND: &'static str;
    const SUCCESS_MESSAGE: &'static str;
    const FAILURE_MESSAGE: &'static str;

    /// The visitor's address. Validated addresses never contain angle
    /// brackets, so this is already what the sanitizer would produce.
    fn reply_to(&self) -> &SubmitterEmail;

    fn subject(&self) -> String;

    fn html_body(&self) -> Result<String, askama::Error>;
}

impl Notification for BookingRequest {
    const KIND: &'static str = "booking";
    const SUCCESS_MESSAGE: &'static str =
        "Booking request sent successfully! We will contact you shortly to confirm.";
    const FAILURE_MESSAGE: &'static str =
        "Failed to send booking request. Please try again later.";

    fn reply_to(&self) -> &SubmitterEmail {
        &self.email
    }

    fn subject(&self) -> String {
        format!(
            "📅 New Booking Request: {} {}",
            sanitize(self.first_name.as_ref()),
            sanitize(self.last_name.as_ref())
        )
    }

    fn html_body(&self) -> Result<String, askama::Error> {
        let first_name = sanitize(self.first_name.as_ref());
        let last_name = sanitize(self.last_name.as_ref());
        let email = sanitize(self.email.as_ref());
        let date = sanitize(self.date.as_ref());
        let time = sanitize(self.time.as_ref());

        BookingTemplate {
            first_name: &first_name,
            last_name: &last_name,
            email: &email,
            date: &date,
            time: &time,
        }
        .render()
    }
}

impl Notification for ContactMessage {
    const KIND: &'static str = "contact";
    const SUCCESS_MESSAGE: &'static str =
        "Message sent successfully! We will get back to you soon.";
    const FAILURE_MESSAGE: &'static str = "Failed to send message. Please try again later.";

    fn reply_to(&self) -> &SubmitterEmail {
        &self.email
    }

    fn subject(&self) -> String {
        format!("✉️ New Contact Message from {}", sanitize(self.name.as_ref()))
    }

    fn html_body(&self) -> Result<String, askama::Error> {
        let name = sanitize(self.name.as_ref());
        let email = sanitize(self.email.as_ref());
        let message = sanitize(self.message.as_ref());

        ContactTemplate {
            name: &name,
            email: &email,
            message: &message,
        }
        .render()
    }
}
