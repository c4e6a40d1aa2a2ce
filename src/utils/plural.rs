//! Pluralization for status lines.

/// Return "s" suffix for plural counts
///
/// # Examples
///
/// - `plural_s(0)` -> `"s"` (0 segments)
/// - `plural_s(1)` -> `""` (1 segment)
/// - `plural_s(5)` -> `"s"` (5 segments)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// - `plural_count(1, "icon")` -> `"1 icon"`
/// - `plural_count(5, "icon")` -> `"5 icons"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}
