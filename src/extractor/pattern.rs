use regex::Regex;
use std::sync::LazyLock;

/// Permissive `local@domain` matcher. ASCII letters only, no label count
/// requirement on the domain.
pub const EMAIL_REGEX: &str = r"[A-Za-z0-9_.+-]+@[A-Za-z0-9.-]+";

pub static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_REGEX).expect("EMAIL_REGEX is a valid pattern"));

/// Non-overlapping matches in `text`, left to right, verbatim.
pub fn find_emails(text: &str) -> impl Iterator<Item = &str> {
    EMAIL_PATTERN.find_iter(text).map(|m| m.as_str())
}
