//! Target URL handling.
//!
//! # Responsibilities
//! - Guarantee the target URL ends with `/` before matching
//! - Derive the path string the compiled pattern runs against
//!
//! # Design Decisions
//! - Normalization re-parses the textual form, so anything after the path
//!   (query, fragment) receives the slash instead of the path
//! - The match path is percent-decoded and drops one trailing `/`, so
//!   `/path/to/glory/` is searched as `/path/to/glory`

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use url::Url;

/// Return `url` if its text already ends with `/`, otherwise a re-parsed copy
/// with `/` appended. `None` when the appended form is not a valid URL.
pub(crate) fn trailing_slashed(url: &Url) -> Option<Url> {
    if url.as_str().ends_with('/') {
        return Some(url.clone());
    }

    Url::parse(&format!("{}/", url.as_str())).ok()
}

/// The decoded path of `url` as seen by the matcher.
pub(crate) fn match_path(url: &Url) -> String {
    let decoded: Cow<'_, str> = percent_decode_str(url.path()).decode_utf8_lossy();

    if decoded.len() > 1 && decoded.ends_with('/') {
        decoded[..decoded.len() - 1].to_string()
    } else {
        decoded.into_owned()
    }
}
