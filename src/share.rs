//! Share links: the `?d=<token>` query contract between editor and viewer.
//!
//! - `share_url` builds the public link the editor copies.
//! - `extract_token` pulls the token back out of whatever URL the viewer was opened with.
//! - `alias_redirect` maps the legacy path form `/v/<data>` onto `/v?d=<data>`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tracing::trace;
use url::Url;

use crate::codec;
use crate::config::PageConfig;

/// Query parameter carrying the token.
pub const QUERY_PARAM: &str = "d";

/// Path of the public viewer.
pub const VIEWER_PATH: &str = "/v";

/// Path of the editor (call-to-action target on invalid links).
pub const EDITOR_PATH: &str = "/editor";

/// Base used to resolve relative inputs such as `/v?d=..` or `?d=..`.
const RELATIVE_BASE: &str = "http://localhost/";

/// Characters left alone by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build the public share URL for `page`, e.g. `https://bio.test/v?d=eyJ...`.
pub fn share_url(origin: &str, page: &PageConfig) -> String {
    format!(
        "{}{}?{}={}",
        origin.trim().trim_end_matches('/'),
        VIEWER_PATH,
        QUERY_PARAM,
        codec::encode(page)
    )
}

/// Extract the token from an absolute URL, a path with a query, or a bare
/// query string. Returns `None` when no non-empty `d` parameter is present.
///
/// The value is query-decoded once (so `%2B` becomes `+` and `+` becomes a
/// space); the decoder handles both.
pub fn extract_token(input: &str) -> Option<String> {
    let url = parse_loose(input.trim())?;
    let token = url
        .query_pairs()
        .find(|(key, value)| key == QUERY_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned());
    trace!(target: "linkbio::share", found = token.is_some(), "Extracted token from URL");
    token
}

/// Map the legacy `/v/<data>` route onto the query form `/v?d=<data>`.
///
/// `<data>` is percent-decoded (as a router would) and re-encoded like
/// `encodeURIComponent`. Any other path yields `None`.
pub fn alias_redirect(path: &str) -> Option<String> {
    let rest = path.trim().strip_prefix(VIEWER_PATH)?.strip_prefix('/')?;
    let segment = rest
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    if segment.is_empty() || segment.contains('/') {
        return None;
    }

    let data = percent_decode_str(segment).decode_utf8().ok()?;
    Some(format!(
        "{}?{}={}",
        VIEWER_PATH,
        QUERY_PARAM,
        utf8_percent_encode(&data, URI_COMPONENT)
    ))
}

fn parse_loose(input: &str) -> Option<Url> {
    match Url::parse(input) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(RELATIVE_BASE).ok()?.join(input).ok()
        }
        Err(_) => None,
    }
}
