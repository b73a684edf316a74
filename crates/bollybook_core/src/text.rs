//! Small text helpers shared by the extractor, prompts and API layer.

/// Keep at most `max_chars` characters of `text`, cutting on a char boundary.
///
/// # Examples
///
/// ```
/// use bollybook_core::truncate_chars;
///
/// assert_eq!(truncate_chars("नमस्ते", 2), "नम");
/// assert_eq!(truncate_chars("short", 50), "short");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
