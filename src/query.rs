//! Canonical query string construction
//!
//! The service recomputes the token from the query it receives, so client
//! and server must agree on every byte: which keys are sent, their order,
//! and how they are escaped.

use crate::options::Options;

/// Key that is never part of the signed query.
pub const FORMAT_KEY: &str = "format";

/// Key under which the target page is injected.
pub const URL_KEY: &str = "url";

/// Serialize options into the canonical, escaped query string.
///
/// Drops `format` and unset values, sorts the rest by key byte order and
/// escapes key and value separately. Returns an empty string when nothing
/// survives.
///
/// # Examples
///
/// ```rust
/// use capture_tool::{canonical_query, Options};
///
/// let options = Options::new().with("width", 1920).with("height", 1080);
/// assert_eq!(canonical_query(&options), "height=1080&width=1920");
/// ```
pub fn canonical_query(options: &Options) -> String {
    let mut pairs: Vec<(&str, String)> = options
        .iter()
        .filter(|(key, value)| *key != FORMAT_KEY && !value.is_unset())
        .map(|(key, value)| (key, value.canonical()))
        .collect();

    pairs.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Query-component escaping: unreserved characters pass through, space
/// becomes `+`, everything else is percent-encoded.
pub fn encode_component(input: &str) -> String {
    // A literal '%' is escaped to "%25", so "%20" can only come from a space.
    urlencoding::encode(input).replace("%20", "+")
}
