use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use tracing::{error, trace};

use super::EncodeError;
use crate::config::PageConfig;

/// Encode a page into its canonical share token.
///
/// Never fails for a `PageConfig`. If serialization ever did fail, the error is
/// logged and an empty token is returned; viewers treat that as "no page".
pub fn encode(page: &PageConfig) -> String {
    match try_encode(page) {
        Ok(token) => token,
        Err(err) => {
            error!(target: "linkbio::codec", error = %err, "Failed to encode page");
            String::new()
        }
    }
}

/// Encode a page, surfacing the (theoretical) serializer error.
pub fn try_encode(page: &PageConfig) -> Result<String, EncodeError> {
    let json = serde_json::to_vec(page)?;
    let token = URL_SAFE_NO_PAD.encode(&json);
    trace!(
        target: "linkbio::codec",
        json_bytes = json.len(),
        token_len = token.len(),
        "Encoded page"
    );
    Ok(token)
}
