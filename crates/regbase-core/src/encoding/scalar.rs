//! Interpretation of stored text as integers and booleans.

/// Parses stored text as a base-10 `i32`.
///
/// Surrounding whitespace is ignored.  Anything else that is not a complete
/// integer in range (trailing garbage, empty text, overflow) yields `None`,
/// letting the caller substitute its default.
pub fn parse_int(text: &str) -> Option<i32> {
    text.trim().parse::<i32>().ok()
}

/// Parses stored text as a boolean.
///
/// Accepts `true` / `false` in any letter case, and integers, where any
/// non-zero value is `true`.
pub fn parse_bool(text: &str) -> Option<bool> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return Some(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Some(false);
    }
    trimmed.parse::<i64>().ok().map(|n| n != 0)
}
