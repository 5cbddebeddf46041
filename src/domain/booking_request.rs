use crate::domain::booking_date::BookingDate;
use crate::domain::bounded_text::{PersonName, TimeSlot};
use crate::domain::submitter_email::SubmitterEmail;

/// Raw booking payload, as posted by the landing page.
///
/// Every field is optional so that a missing field is reported through the
/// same validation path as a malformed one.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: SubmitterEmail,
    pub date: BookingDate,
    pub time: TimeSlot,
}

pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, String> {
    value.ok_or_else(|| format!("The {} field is missing.", field))
}

impl TryFrom<BookingForm> for BookingRequest {
    type Error = String;

    fn try_from(form: BookingForm) -> Result<Self, Self::Error> {
        let first_name = PersonName::parse(required(form.first_name, "firstName")?)?;
        let last_name = PersonName::parse(required(form.last_name, "lastName")?)?;
        let email = SubmitterEmail::parse(required(form.email, "email")?)?;
        let date = BookingDate::parse(required(form.date, "date")?)?;
        let time = TimeSlot::parse(required(form.time, "time")?)?;
        Ok(Self {
            first_name,
            last_name,
            email,
            date,
            time,
        })
    }
}
