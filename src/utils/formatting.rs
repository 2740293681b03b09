//! Formatting utilities used for CLI output and the client views.

/// Two-decimal currency amount, e.g. `80.00`.
pub fn money(v: f64) -> String {
    format!("{:.2}", v)
}

/// Shorten long free text for table cells.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
