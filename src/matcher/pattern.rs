//! Pattern compilation and application.
//!
//! # Responsibilities
//! - Split a pattern into its host and path components
//! - Classify path segments as literals or `{name}` placeholders
//! - Compile the segments into one suffix-anchored regex
//! - Apply the compiled regex to a target URL and collect captures
//!
//! # Design Decisions
//! - Literal segments are spliced into the regex unescaped
//! - The expression is anchored with `$` only, so a pattern matches any
//!   path that ends with its segments
//! - Compilation failures are logged and collapsed to `None`

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};

use percent_encoding::percent_decode_str;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace};
use url::Url;

use crate::matcher::target::{match_path, trailing_slashed};
use crate::matcher::Matcha;

/// Reasons a pattern cannot be compiled. Internal only.
#[derive(Debug, Error)]
pub(crate) enum PatternError {
    #[error("pattern is not a valid URL reference: {0}")]
    Url(#[from] url::ParseError),

    #[error("path segment {0:?} does not decode to UTF-8")]
    Encoding(String),

    #[error("compiled expression rejected: {0}")]
    Regex(#[from] regex::Error),
}

/// One classified path segment of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Placeholder(String),
}

impl Segment {
    /// A segment is a placeholder when it starts with `{` and ends with `}`.
    pub(crate) fn classify(component: &str) -> Self {
        match component.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
            Some(name) => Segment::Placeholder(name.to_string()),
            None => Segment::Literal(component.to_string()),
        }
    }
}

/// A placeholder and the regex group its value is read from.
///
/// `group` differs from `name` only for repeated names, which the regex
/// engine cannot declare twice.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Placeholder {
    name: String,
    group: String,
}

/// Host and raw path of a parsed pattern.
#[derive(Debug)]
struct PatternComponents {
    host: Option<String>,
    path: String,
}

impl PatternComponents {
    /// The host comes from the parsed URL; the path is taken from the
    /// pattern text as written, so dot segments stay literal.
    fn parse(pattern: &str) -> Result<Self, PatternError> {
        match Url::parse(pattern) {
            Ok(url) => {
                let hier_part = pattern.split_once(':').map_or("", |(_, rest)| rest);
                Ok(Self {
                    host: url.host_str().map(str::to_string),
                    path: raw_path(hier_part).to_string(),
                })
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => Self::parse_relative(pattern),
            Err(e) => Err(e.into()),
        }
    }

    fn parse_relative(pattern: &str) -> Result<Self, PatternError> {
        // Network-path reference: the authority carries a host.
        let host = if pattern.starts_with("//") {
            let url = Url::parse(&format!("http:{}", pattern))?;
            url.host_str().map(str::to_string)
        } else {
            None
        };

        Ok(Self {
            host,
            path: raw_path(pattern).to_string(),
        })
    }
}

/// Path text of a reference: after the authority (if any), before the
/// query or fragment.
fn raw_path(reference: &str) -> &str {
    let reference = reference.split(['?', '#']).next().unwrap_or_default();

    match reference.strip_prefix("//") {
        Some(authority_and_path) => authority_and_path
            .find('/')
            .map_or("", |start| &authority_and_path[start..]),
        None => reference,
    }
}

/// Split a path into components: a root `/` when the path is absolute,
/// followed by every non-empty segment, percent-decoded.
fn path_components(path: &str) -> Result<Vec<String>, PatternError> {
    let root = path.starts_with('/').then(|| "/".to_string());
    let segments = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(decode_segment);

    root.into_iter().map(Ok).chain(segments).collect()
}

fn decode_segment(segment: &str) -> Result<String, PatternError> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| PatternError::Encoding(segment.to_string()))
}

/// Build `/<segments joined by '/'>$` and the ordered placeholder list.
fn build_expression(segments: &[Segment]) -> (String, Vec<Placeholder>) {
    let names: HashSet<&str> = segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
        .collect();

    let mut groups: HashSet<String> = HashSet::new();
    let mut placeholders = Vec::new();
    let mut parts = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => parts.push(text.clone()),
            Segment::Placeholder(name) => {
                let group = group_name(name, &names, &groups);
                parts.push(format!("(?<{}>.+)", group));
                groups.insert(group.clone());
                placeholders.push(Placeholder {
                    name: name.clone(),
                    group,
                });
            }
        }
    }

    (format!("/{}$", parts.join("/")), placeholders)
}

/// First occurrence uses the name itself; repeats get `name__N` with the
/// smallest N that collides with neither a declared group nor another name.
fn group_name(name: &str, names: &HashSet<&str>, groups: &HashSet<String>) -> String {
    if !groups.contains(name) {
        return name.to_string();
    }

    (2usize..)
        .map(|occurrence| format!("{}__{}", name, occurrence))
        .find(|alias| !groups.contains(alias) && !names.contains(alias.as_str()))
        .unwrap_or_else(|| name.to_string())
}

/// A compiled URL pattern.
///
/// Compiling once and calling [`Pattern::match_url`] repeatedly is
/// equivalent to calling [`Matcha::with_pattern`] with the same text each
/// time.
///
/// ```
/// use matcha::{Pattern, Url};
///
/// let pattern = Pattern::parse("/users/{id}").unwrap();
/// let url = Url::parse("https://example.com/api/users/42").unwrap();
///
/// let matched = pattern.match_url(&url).unwrap();
/// assert_eq!(matched.value_of("id"), Some("42"));
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    path_only: bool,
    host: Option<String>,
    regex: Regex,
    placeholders: Vec<Placeholder>,
}

impl Pattern {
    /// Compile `pattern`. `None` when it cannot be parsed or compiled.
    pub fn parse(pattern: &str) -> Option<Self> {
        match Self::compile(pattern) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                debug!(pattern, error = %e, "Pattern rejected");
                None
            }
        }
    }

    pub(crate) fn compile(pattern: &str) -> Result<Self, PatternError> {
        let path_only = pattern.starts_with('/');
        let components = PatternComponents::parse(pattern)?;

        let segments: Vec<Segment> = path_components(&components.path)?
            .iter()
            .skip(1)
            .map(|component| Segment::classify(component))
            .collect();

        let (expression, placeholders) = build_expression(&segments);
        let regex = Regex::new(&expression)?;

        Ok(Self {
            source: pattern.to_string(),
            path_only,
            host: components.host,
            regex,
            placeholders,
        })
    }

    /// Match `url` against this pattern.
    ///
    /// The URL is normalized to end with `/` first; the returned [`Matcha`]
    /// stores the normalized URL.
    pub fn match_url(&self, url: &Url) -> Option<Matcha> {
        let Some(url) = trailing_slashed(url) else {
            trace!(url = %url, "Target URL cannot be normalized");
            return None;
        };

        if !self.path_only && url.host_str() != self.host.as_deref() {
            trace!(
                pattern = %self.source,
                expected = ?self.host,
                actual = ?url.host_str(),
                "Host mismatch"
            );
            return None;
        }

        let path = match_path(&url);
        let Some(captures) = self.regex.captures(&path) else {
            trace!(pattern = %self.source, path = %path, "No structural match");
            return None;
        };

        let mut by_name = BTreeMap::new();
        let mut by_index = Vec::with_capacity(self.placeholders.len());

        for placeholder in &self.placeholders {
            let Some(value) = captures
                .name(&placeholder.group)
                .map(|m| m.as_str())
                .filter(|value| !value.is_empty())
            else {
                continue;
            };

            by_name.insert(placeholder.name.clone(), value.to_string());
            by_index.push(value.to_string());
        }

        Some(Matcha::from_parts(url, by_name, by_index))
    }

    /// The pattern text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern starts with `/` and therefore skips the host check.
    pub fn is_path_only(&self) -> bool {
        self.path_only
    }

    /// Host a host-qualified pattern requires, if any.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Placeholder names in order of appearance, repeats included.
    pub fn placeholder_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.placeholders.iter().map(|p| p.name.as_str())
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_classify_segments() {
        assert_eq!(Segment::classify("{id}"), Segment::Placeholder("id".into()));
        assert_eq!(Segment::classify("users"), Segment::Literal("users".into()));
        assert_eq!(Segment::classify("{"), Segment::Literal("{".into()));
        assert_eq!(Segment::classify("foo{x}"), Segment::Literal("foo{x}".into()));
        assert_eq!(Segment::classify("{}"), Segment::Placeholder(String::new()));
    }

    #[test]
    fn test_path_components_absolute() {
        let components = path_components("/{A}/{B}/{C}/").unwrap();
        assert_eq!(components, vec!["/", "{A}", "{B}", "{C}"]);
    }

    #[test]
    fn test_path_components_relative_has_no_root() {
        let components = path_components("path/{x}").unwrap();
        assert_eq!(components, vec!["path", "{x}"]);
    }

    #[test]
    fn test_path_components_decode() {
        let components = path_components("/%7Bid%7D/a%20b").unwrap();
        assert_eq!(components, vec!["/", "{id}", "a b"]);
    }

    #[test]
    fn test_path_components_reject_bad_utf8() {
        assert!(matches!(path_components("/%FF"), Err(PatternError::Encoding(_))));
    }

    #[test]
    fn test_expression_is_suffix_anchored() {
        let pattern = Pattern::compile("/{A}/to/{C}/").unwrap();
        assert_eq!(pattern.regex.as_str(), "/(?<A>.+)/to/(?<C>.+)$");
        assert!(pattern.is_path_only());
        assert_eq!(pattern.host(), None);
    }

    #[test]
    fn test_host_qualified_components() {
        let pattern = Pattern::compile("https://Example.com/items/{id}").unwrap();
        assert!(!pattern.is_path_only());
        assert_eq!(pattern.host(), Some("example.com"));
        assert_eq!(pattern.regex.as_str(), "/items/(?<id>.+)$");
    }

    #[test]
    fn test_network_path_reference_takes_host() {
        let pattern = Pattern::compile("//example.com/a/{b}").unwrap();
        assert!(pattern.is_path_only());
        assert_eq!(pattern.host(), Some("example.com"));
        assert_eq!(pattern.regex.as_str(), "/a/(?<b>.+)$");
    }

    #[test]
    fn test_dot_segments_stay_literal_in_host_qualified_patterns() {
        let qualified = Pattern::compile("https://example.com/a/../b").unwrap();
        let path_only = Pattern::compile("/a/../b").unwrap();
        assert_eq!(qualified.regex.as_str(), "/a/../b$");
        assert_eq!(path_only.regex.as_str(), "/a/../b$");
    }

    #[test]
    fn test_raw_path() {
        assert_eq!(raw_path("//example.com/a/b?q#f"), "/a/b");
        assert_eq!(raw_path("//example.com"), "");
        assert_eq!(raw_path("/a/./b#top"), "/a/./b");
        assert_eq!(raw_path("open/x"), "open/x");
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        let pattern = Pattern::compile("/a/{b}?x=1#top").unwrap();
        assert_eq!(pattern.regex.as_str(), "/a/(?<b>.+)$");
    }

    #[test]
    fn test_repeated_names_get_aliases() {
        let pattern = Pattern::compile("/{x}/{x}/{x__2}").unwrap();
        assert_eq!(pattern.regex.as_str(), "/(?<x>.+)/(?<x__3>.+)/(?<x__2>.+)$");
        let names: Vec<&str> = pattern.placeholder_names().collect();
        assert_eq!(names, vec!["x", "x", "x__2"]);
    }

    #[test]
    fn test_illegal_group_name_fails() {
        assert!(matches!(Pattern::compile("/{not a name}"), Err(PatternError::Regex(_))));
        assert!(Pattern::parse("/{}").is_none());
    }

    #[test]
    fn test_invalid_absolute_pattern_fails() {
        assert!(matches!(Pattern::compile("https://exa mple.com/"), Err(PatternError::Url(_))));
    }

    #[test]
    fn test_match_url_collects_in_pattern_order() {
        let pattern = Pattern::parse("/{z}/{a}").unwrap();
        let matched = pattern.match_url(&url("https://example.com/first/second")).unwrap();
        assert_eq!(matched.captures(), &["first".to_string(), "second".to_string()]);
        assert_eq!(matched.value_of("z"), Some("first"));
        assert_eq!(matched.value_of("a"), Some("second"));
    }

    #[test]
    fn test_match_url_host_mismatch() {
        let pattern = Pattern::parse("https://example.com/path").unwrap();
        assert!(pattern.match_url(&url("https://other.com/path")).is_none());
        assert!(pattern.match_url(&url("https://example.com/path")).is_some());
    }

    #[test]
    fn test_display_is_source_text() {
        let pattern = Pattern::parse("/a/{b}").unwrap();
        assert_eq!(pattern.to_string(), "/a/{b}");
        assert_eq!(pattern.as_str(), "/a/{b}");
    }
}
