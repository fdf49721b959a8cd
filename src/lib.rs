#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! linkbio — link-in-bio pages shared without a backend.
//!
//! The whole page configuration travels inside the share URL as a single
//! URL-safe token; the viewer rebuilds the page from that token alone.
//! - `config`: Page data model, published defaults, loader and schema helpers.
//! - `codec`: Token encoder and the tolerant multi-variant decoder.
//! - `share`: The `?d=<token>` query contract, share URLs and the legacy path alias.
//! - `view`: Public render selector (page or "invalid link", nothing in between).
//! - `editor`: Copy-on-write page edits and theme export.
//! - `sources`: Page sources for live link mode (file polling).
//! - `utils`: Small helpers such as id generation.
//!
//! Use `linkbio::prelude::*` to bring commonly used items into scope quickly.

/// Public module: page configuration (models, loader, schema helpers).
pub mod config;
/// Public module: share token encoding and decoding.
pub mod codec;
/// Public module: editor operations (copy-on-write edits, theme export).
pub mod editor;
/// Public module: share URLs and token extraction.
pub mod share;
/// Public module: page sources (file polling).
pub mod sources;
/// Public module: utilities (ids).
pub mod utils;
/// Public module: public viewer render selector.
pub mod view;

/// Crate-level constants for consumers that want to inspect package metadata at runtime.
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version (e.g., "0.1.0").
#[inline]
pub const fn version() -> &'static str {
    PKG_VERSION
}

/// Parse a simple level name (trace|debug|info|warn|error).
pub fn parse_level(s: &str) -> Option<tracing::Level> {
    use tracing::Level;
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Initialize tracing (logging) with a reasonable default.
/// - Honors the `RUST_LOG` environment variable if set.
/// - Falls back to `info` level.
///
/// Logs go to stderr so command output on stdout stays pipeable.
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init_tracing() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(tracing::Level::INFO);
    init_tracing_with_level(level);
}

/// Initialize tracing at an explicit level.
pub fn init_tracing_with_level(level: tracing::Level) {
    // Ignore the error if the global subscriber was already set.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// A convenient set of exports for most consumers.
///
/// Bring this into scope with:
/// `use linkbio::prelude::*;`
pub mod prelude {
    // Common result/error handling
    pub use anyhow::{Context, Error, Result, anyhow, bail, ensure};

    // Serialization
    pub use serde::{Deserialize, Serialize};

    // Tracing macros
    pub use tracing::{debug, error, info, instrument, trace, warn};

    pub use crate as linkbio;

    // Frequently used items
    pub use crate::codec::{DecodeError, decode, decode_or_none, encode};
    pub use crate::config::PageConfig;
    pub use crate::share::{extract_token, share_url};
    pub use crate::view::View;
    pub use crate::{codec, config, editor, share, view};
}
