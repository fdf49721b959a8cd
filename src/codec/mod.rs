#![allow(clippy::missing_errors_doc)]

/*!
Share token codec.

A token is the canonical, URL-safe representation of a `PageConfig`:

```text
PageConfig --serde_json--> compact JSON --UTF-8--> bytes --base64url, no padding--> token
```

The token only contains `[A-Za-z0-9_-]`, so it is placed in the `d` query
parameter without further escaping.

Decoding walks the same pipeline backwards but accepts the legacy shapes older
editors produced (standard alphabet, `=` padding, one or two layers of
percent-encoding). See `decode` for the candidate order.

Example:
```no_run
use linkbio::codec;
use linkbio::config::PageConfig;

let page = PageConfig::default();
let token = codec::encode(&page);
assert_eq!(codec::decode_or_none(&token), Some(page));
```
*/

use thiserror::Error;

pub mod decode;
pub mod encode;

pub use decode::{decode, decode_or_none, normalize};
pub use encode::{encode, try_encode};

/// Tokens longer than this are rejected before any decoding work.
pub const MAX_TOKEN_LEN: usize = 2 * 1024 * 1024;

/// Why a token could not be turned into a page.
///
/// Viewers normally do not care and go through `decode_or_none`; the variants
/// exist for logging and for the CLI.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("token is empty")]
    Empty,

    #[error("token is {len} bytes, above the {MAX_TOKEN_LEN} byte limit")]
    TooLong { len: usize },

    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token bytes are not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("token text is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("token JSON does not describe a page: {0}")]
    Shape(String),
}

/// Encoding can only fail if serialization itself fails, which the page types
/// never do.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to serialize page: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Returns true when `s` is non-empty and only uses the canonical token alphabet.
pub fn is_canonical_token(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
