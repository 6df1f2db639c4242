/// Canonical comparable form of recognized text.
///
/// Lower-cases, keeps only ASCII lowercase letters, ASCII digits and
/// whitespace, then trims. Total and idempotent.
pub fn normalize(text: &str) -> String {
    let filtered: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    filtered.trim().to_string()
}
