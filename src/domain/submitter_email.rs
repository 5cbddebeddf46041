use validator::validate_email;

/// A syntactically valid address, trimmed and lower-cased.
///
/// No deliverability check is made; the value is only ever used as the
/// reply-to of an outbound notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitterEmail(String);

impl SubmitterEmail {
    pub fn parse(s: String) -> Result<SubmitterEmail, String> {
        let normalized = s.trim().to_lowercase();
        if validate_email(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(format!("{} is not a valid email address.", s))
        }
    }

    /// The part after the last `@`; safe to put in logs.
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

impl AsRef<str> for SubmitterEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubmitterEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
