use crate::domain::booking_request::required;
use crate::domain::bounded_text::{FullName, MessageBody};
use crate::domain::submitter_email::SubmitterEmail;

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: FullName,
    pub email: SubmitterEmail,
    pub message: MessageBody,
}

impl TryFrom<ContactForm> for ContactMessage {
    type Error = String;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let name = FullName::parse(required(form.name, "name")?)?;
        let email = SubmitterEmail::parse(required(form.email, "email")?)?;
        let message = MessageBody::parse(required(form.message, "message")?)?;
        Ok(Self {
            name,
            email,
            message,
        })
    }
}
