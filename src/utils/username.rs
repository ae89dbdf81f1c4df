/// Normalizes a username from the request body.
///
/// Removes every `@` and surrounding whitespace. Returns `None` when
/// nothing is left.
pub fn normalize_username(raw: &str) -> Option<String> {
    let cleaned = raw.replace('@', "");
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
