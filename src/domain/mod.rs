mod booking_date;
mod booking_request;
mod bounded_text;
mod contact_message;
mod submitter_email;

// expose chosen features on a sub-crate level
pub use booking_date::BookingDate;
pub use booking_request::{BookingForm, BookingRequest};
pub use bounded_text::{FullName, MessageBody, PersonName, TimeSlot};
pub use contact_message::{ContactForm, ContactMessage};
pub use submitter_email::SubmitterEmail;
