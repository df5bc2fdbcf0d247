//! The matched instance.

use std::collections::BTreeMap;

use serde::Serialize;
use url::Url;

use crate::matcher::key::CaptureKey;
use crate::matcher::pattern::Pattern;

/// A URL together with the values captured from it by a pattern.
///
/// ```
/// use matcha::{Matcha, Url};
///
/// let url = Url::parse("https://example.com/path/to/glory").unwrap();
///
/// assert!(Matcha::with_pattern(&url, "https://example.com/").is_none());
/// assert!(Matcha::with_pattern(&url, "https://example.com/path/to/glory").is_some());
/// assert!(Matcha::with_pattern(&url, "/path/to/glory").is_some());
///
/// let matched = Matcha::with_pattern(&url, "/{A}/{B}/{C}/").unwrap();
/// assert_eq!(matched.value_at(1), Some("to"));
/// assert_eq!(matched.value_of("C"), Some("glory"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matcha {
    url: Url,
    #[serde(rename = "named")]
    by_name: BTreeMap<String, String>,
    #[serde(rename = "positional")]
    by_index: Vec<String>,
}

impl Matcha {
    /// A matcher with no captures. `url` is stored as given.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            by_name: BTreeMap::new(),
            by_index: Vec::new(),
        }
    }

    /// Match `url` against `pattern`, which uses `{name}` placeholders for
    /// whole path segments.
    ///
    /// Patterns starting with `/` match any host; other patterns must name
    /// the target's host. Returns `None` when the pattern does not apply.
    pub fn with_pattern(url: &Url, pattern: &str) -> Option<Self> {
        Pattern::parse(pattern)?.match_url(url)
    }

    pub(crate) fn from_parts(
        url: Url,
        by_name: BTreeMap<String, String>,
        by_index: Vec<String>,
    ) -> Self {
        Self {
            url,
            by_name,
            by_index,
        }
    }

    /// Value captured for the placeholder `name`.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Value captured by the `index`-th placeholder (0-based).
    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.by_index.get(index).map(String::as_str)
    }

    /// Look up a capture by name or by position.
    ///
    /// ```
    /// use matcha::{Matcha, Url};
    ///
    /// let url = Url::parse("https://example.com/users/42").unwrap();
    /// let matched = Matcha::with_pattern(&url, "/{kind}/{id}").unwrap();
    ///
    /// assert_eq!(matched.get("id"), Some("42"));
    /// assert_eq!(matched.get(0), Some("users"));
    /// assert_eq!(matched.get(-1), None);
    /// ```
    pub fn get<K: CaptureKey>(&self, key: K) -> Option<&str> {
        key.lookup(self)
    }

    /// Match `pattern` against this matcher's stored URL.
    pub fn matched(&self, pattern: &str) -> Option<Self> {
        Self::with_pattern(&self.url, pattern)
    }

    /// Like [`Matcha::matched`] with an already compiled pattern.
    pub fn matched_pattern(&self, pattern: &Pattern) -> Option<Self> {
        pattern.match_url(&self.url)
    }

    /// The matched URL; normalized to end with `/` unless built with
    /// [`Matcha::new`].
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Captured values in placeholder order.
    pub fn captures(&self) -> &[String] {
        &self.by_index
    }

    /// Captured values keyed by placeholder name, sorted by name.
    pub fn named_captures(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.by_name.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of positional captures.
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

impl From<Url> for Matcha {
    fn from(url: Url) -> Self {
        Self::new(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glory() -> Url {
        Url::parse("https://example.com/path/to/glory").unwrap()
    }

    #[test]
    fn test_bare_url_is_not_normalized() {
        let matcha = Matcha::new(glory());
        assert_eq!(matcha.url().as_str(), "https://example.com/path/to/glory");
        assert!(matcha.is_empty());
        assert_eq!(matcha.value_at(0), None);
        assert_eq!(matcha.value_of("A"), None);
    }

    #[test]
    fn test_matched_url_is_normalized() {
        let matcha = Matcha::with_pattern(&glory(), "/path/to/glory").unwrap();
        assert_eq!(matcha.url().as_str(), "https://example.com/path/to/glory/");
        assert!(matcha.is_empty());
    }

    #[test]
    fn test_get_by_name_and_index() {
        let matcha = Matcha::with_pattern(&glory(), "/{A}/{B}/{C}/").unwrap();
        assert_eq!(matcha.get("A"), Some("path"));
        assert_eq!(matcha.get(String::from("B")), Some("to"));
        assert_eq!(matcha.get(2usize), Some("glory"));
        assert_eq!(matcha.get(3usize), None);
        assert_eq!(matcha.get(-1i64), None);
        assert_eq!(matcha.len(), 3);
    }

    #[test]
    fn test_named_captures_sorted() {
        let matcha = Matcha::with_pattern(&glory(), "/{c}/{b}/{a}").unwrap();
        let named: Vec<(&str, &str)> = matcha.named_captures().collect();
        assert_eq!(named, vec![("a", "glory"), ("b", "to"), ("c", "path")]);
    }

    #[test]
    fn test_matched_uses_stored_url() {
        let first = Matcha::with_pattern(&glory(), "/{A}/to/{C}").unwrap();
        let refined = first.matched("/to/{C}").unwrap();
        assert_eq!(refined.url(), first.url());
        assert_eq!(refined.captures(), &["glory".to_string()]);
    }

    #[test]
    fn test_matched_pattern_equals_matched() {
        let first = Matcha::new(glory());
        let pattern = Pattern::parse("/{x}/glory").unwrap();
        assert_eq!(first.matched_pattern(&pattern), first.matched("/{x}/glory"));
    }

    #[test]
    fn test_from_url() {
        assert_eq!(Matcha::from(glory()), Matcha::new(glory()));
    }

    #[test]
    fn test_serialize_shape() {
        let matcha = Matcha::with_pattern(&glory(), "/{A}/{B}/glory").unwrap();
        let json = serde_json::to_value(&matcha).unwrap();
        assert_eq!(json["url"], "https://example.com/path/to/glory/");
        assert_eq!(json["named"]["B"], "to");
        assert_eq!(json["positional"][0], "path");
    }
}
