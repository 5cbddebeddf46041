/// Longest value, in characters, that is ever interpolated into a notification.
pub const MAX_SANITIZED_LENGTH: usize = 500;

/// Makes a submitted value safe to drop into the notification markup.
///
/// Angle brackets become `&lt;`/`&gt;`, the result is trimmed and then cut to
/// [`MAX_SANITIZED_LENGTH`] characters. Escaping happens before truncation, so
/// a cut can land inside an entity and leave e.g. a trailing `&l`; the
/// notification templates tolerate that.
///
/// Only angle brackets are escaped. Quotes and ampersands pass through, which
/// is fine for element content but not for attribute values.
pub fn sanitize(input: &str) -> String {
    let escaped = input.replace('<', "&lt;").replace('>', "&gt;");
    escaped.trim().chars().take(MAX_SANITIZED_LENGTH).collect()
}
