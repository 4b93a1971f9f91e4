//! Shared helpers for log-friendly text.

/// Cut `s` to at most `max_bytes` without splitting a UTF-8 character.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// One-line preview of user or model text for log lines.
///
/// Newlines and tabs become spaces; an ellipsis marks a cut.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let cut = truncate_str(s, max_bytes);
    let mut out: String = cut
        .chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .collect();
    if cut.len() < s.len() {
        out.push('…');
    }
    out
}
