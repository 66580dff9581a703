//! Key sanitization shared by every caller that turns client input into a storage key.

/// Reduce a client-supplied name to a safe base name.
///
/// Both `/` and `\` count as separators, so `../../etc/passwd` becomes `passwd`.
/// Returns `None` when nothing usable is left.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(
            sanitize_filename("../../etc/passwd"),
            Some("passwd".to_string())
        );
        assert_eq!(
            sanitize_filename("C:\\Users\\me\\photo.png"),
            Some("photo.png".to_string())
        );
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(
            sanitize_filename("my holiday photo (1).jpg"),
            Some("my_holiday_photo__1_.jpg".to_string())
        );
    }

    #[test]
    fn test_sanitize_rejects_empty_and_dot_names() {
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename("uploads/"), None);
        assert_eq!(sanitize_filename(".."), None);
        assert_eq!(sanitize_filename(".hidden"), Some("hidden".to_string()));
    }
}
