/// Canonical form of a title for comparison: lower-cased, trimmed, and reduced
/// to ASCII letters and digits.
pub fn normalize_title(title: &str) -> String {
    title
        .trim()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
