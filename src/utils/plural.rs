//! Count formatting for log lines.

/// Format a count with its noun, adding `s` unless the count is one.
///
/// `plural_count(0, "asset")` gives `"0 assets"`, `plural_count(1, "asset")`
/// gives `"1 asset"`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
