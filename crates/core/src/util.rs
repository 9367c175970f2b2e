//! Small shared helpers: clock and tag normalization

use chrono::Utc;

/// Current time as Unix epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Trim every tag and drop the blank ones
///
/// Order and duplicates are kept as given.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Split a comma-separated tag string ("blog, content,,seo")
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(','))
}

/// Key used when counting or matching tags
pub fn tag_key(tag: &str) -> String {
    tag.trim().to_lowercase()
}
