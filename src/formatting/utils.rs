use colored::*;

/// Shorten to at most `max_len` characters, marking the cut with an ellipsis.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

pub fn admin_badge(is_admin: bool) -> ColoredString {
    if is_admin {
        "admin".yellow().bold()
    } else {
        "".normal()
    }
}

pub fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
