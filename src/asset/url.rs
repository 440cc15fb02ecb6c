//! Absolute URL detection for asset paths.
//!
//! Paths matching [`is_external_url`] are emitted verbatim; everything else is
//! treated as a file and made relative to the output root.
//!
//! The check is a syntactic heuristic, not a URL grammar:
//! - hosts need a dot, so `//localhost/x` and `https://localhost/x` are local
//! - `<`, `>` or `"` anywhere after the host makes the string local
//! - `mailto:` and `data:` are local (no `//`)

use regex::Regex;
use std::sync::LazyLock;

static EXTERNAL_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(((https|http|ftp|rtsp|mms):)?//)+[A-Za-z0-9]+\.[A-Za-z0-9]+[/=?%\-&_~`@\[\]':+!]*([^<>"])*$"#)
        .expect("external url pattern is valid")
});

/// Check if an asset path is an absolute or protocol-relative URL.
///
/// # Examples
/// ```ignore
/// assert!(is_external_url("https://cdn.example.com/lib.js"));
/// assert!(is_external_url("//cdn.example.com/lib.js"));
/// assert!(!is_external_url("dist/app.js"));
/// ```
#[inline]
pub fn is_external_url(path: &str) -> bool {
    EXTERNAL_URL.is_match(path)
}
