//! Shared helpers for integration tests.

use matcha::Url;

/// The URL used throughout the documented examples.
pub const GLORY: &str = "https://example.com/path/to/glory";

/// Parse a URL, panicking on invalid test input.
pub fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

/// Replace the host of `s`, keeping everything else.
pub fn with_host(s: &str, host: &str) -> Url {
    let mut parsed = url(s);
    parsed.set_host(Some(host)).unwrap();
    parsed
}
