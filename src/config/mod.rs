//! Page configuration module for linkbio.
//!
//! This module wires together the page data model and the loading/validation
//! helpers used by the editor side of the crate.
//!
//! Example:
//! use linkbio::config::{PageConfig, load_from_path};
//!
//! let page = load_from_path("page.json")?;

pub mod loader;
pub mod models;

// Re-export core data models
pub use models::{
    Avatar, Background, BackgroundKind, ButtonStyle, ButtonVariant, Category, LinkItem, PageConfig,
    Palette, ShadowLevel, SocialKind, SocialLink, ThemeConfig, TopLink,
};

// Re-export loader utilities
pub use loader::{
    generate_schema, load_from_path, load_from_path_async, load_from_reader, load_from_str,
    validate_page, write_schema_to_writer,
};
