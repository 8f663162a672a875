/// Canonical form used before every membership or overlap test.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
