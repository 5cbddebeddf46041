mod health_check;
mod landing_page;
mod submission;

pub use health_check::health_check;
pub use landing_page::{landing_page, static_files, LandingPage};
pub use submission::{submit, SubmissionError};
