use chrono::{DateTime, NaiveDate};

/// Requested day of a booking.
///
/// Accepts a plain ISO-8601 calendar date (`2026-11-03`) or a full RFC 3339
/// timestamp, which is what date pickers in some browsers submit. The
/// submitted text is kept so the notification shows what the visitor chose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDate {
    raw: String,
    date: NaiveDate,
}

impl BookingDate {
    pub fn parse(s: String) -> Result<BookingDate, String> {
        let raw = s.trim();
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
            .ok_or_else(|| format!("{} is not a valid calendar date.", s))?;

        Ok(Self {
            raw: raw.to_owned(),
            date,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl AsRef<str> for BookingDate {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
