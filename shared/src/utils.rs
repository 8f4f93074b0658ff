/// Cut `text` down to at most `max_chars` characters without splitting a
/// character. Counts characters, not bytes, so multi-byte text stays valid.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
