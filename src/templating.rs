use askama::Template;

// Values are run through `sanitizer::sanitize` before they get here, so
// askama's own escaping stays off to keep the output byte-for-byte stable.

#[derive(Template)]
#[template(path = "booking.html", escape = "none")]
pub struct BookingTemplate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub date: &'a str,
    pub time: &'a str,
}

#[derive(Template)]
#[template(path = "contact.html", escape = "none")]
pub struct ContactTemplate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
}
