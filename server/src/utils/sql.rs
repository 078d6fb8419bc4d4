//! SQL utility functions

/// Escape SQL LIKE metacharacters (%, _, \) in user input
///
/// ```
/// use sieve_server::utils::sql::escape_like_pattern;
///
/// assert_eq!(escape_like_pattern("100% match_test"), "100\\% match\\_test");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// LIKE pattern matching `s` anywhere in a value. Pair with `ESCAPE '\'`.
pub fn contains_pattern(s: &str) -> String {
    format!("%{}%", escape_like_pattern(s))
}
