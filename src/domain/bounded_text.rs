use unicode_segmentation::UnicodeSegmentation;

/// Trims `value` and checks its length, counted in grapheme clusters,
/// against the inclusive `min..=max` range. Empty-after-trim is always invalid.
fn parse_bounded(value: String, field: &str, min: usize, max: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("The {} must not be empty.", field));
    }

    let length = trimmed.graphemes(true).count();
    if length < min {
        return Err(format!("The {} must be at least {} characters long.", field, min));
    }
    if length > max {
        return Err(format!("The {} must be at most {} characters long.", field, max));
    }

    Ok(trimmed.to_owned())
}

macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident, $field:literal, $min:expr, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            pub const MIN_LENGTH: usize = $min;
            pub const MAX_LENGTH: usize = $max;

            pub fn parse(s: String) -> Result<$name, String> {
                parse_bounded(s, $field, Self::MIN_LENGTH, Self::MAX_LENGTH).map(Self)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

bounded_text!(
    /// First or last name on a booking request.
    PersonName, "name", 1, 50
);
bounded_text!(
    /// Free-form name on a contact message.
    FullName, "name", 1, 100
);
bounded_text!(
    /// Requested time of a booking, as typed by the visitor (e.g. `14:30`).
    TimeSlot, "time", 1, 20
);
bounded_text!(MessageBody, "message", 10, 2000);
