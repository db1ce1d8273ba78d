//! Search query normalization.

/// Default minimum number of characters before a query filters results.
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Normalizes raw search text.
///
/// Text shorter than `min_len` characters becomes the empty string, meaning
/// "unfiltered"; anything else is returned verbatim, whitespace included.
pub fn normalize_query(raw: &str, min_len: usize) -> String {
    if raw.chars().count() < min_len {
        String::new()
    } else {
        raw.to_string()
    }
}
