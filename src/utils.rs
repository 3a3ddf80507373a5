/// Characters that are replaced when a path becomes part of a file name
const UNSAFE_FILENAME_CHARS: [char; 7] = ['/', ':', '?', '&', '=', '#', '%'];

/// Screenshot file name for a page path, e.g. `/priser` -> `screenshot_priser.png`
pub fn screenshot_file_name(path: &str) -> String {
    format!("screenshot{}.png", sanitize_path(path))
}

/// Replace path separators and other unsafe characters with `_`
pub fn sanitize_path(path: &str) -> String {
    path.replace(UNSAFE_FILENAME_CHARS, "_")
}

/// Cut a string to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
