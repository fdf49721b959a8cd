use anyhow::{Context, Result, bail};
use schemars::{Schema, schema_for};
use serde_valid::Validate;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

use super::models::PageConfig;

/// Load a page from a JSON string slice.
pub fn load_from_str(s: &str) -> Result<PageConfig> {
    let page: PageConfig =
        serde_json::from_str(s).context("Failed to parse JSON string into PageConfig")?;
    validate_page(&page)?;
    Ok(page)
}

/// Load a page from any reader (e.g., a file).
pub fn load_from_reader<R: Read>(reader: R) -> Result<PageConfig> {
    let page: PageConfig =
        serde_json::from_reader(reader).context("Failed to parse JSON page from reader")?;
    validate_page(&page)?;
    Ok(page)
}

/// Load a page from a file path synchronously.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<PageConfig> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)
        .with_context(|| format!("Failed to open page file {}", path_ref.display()))?;
    let page = load_from_reader(file)?;
    debug!(target: "linkbio::loader", "Loaded page from {}", path_ref.display());
    Ok(page)
}

/// Load a page from a file path asynchronously (Tokio).
pub async fn load_from_path_async<P: AsRef<Path>>(path: P) -> Result<PageConfig> {
    use tokio::fs;
    let path_ref = path.as_ref();
    let bytes = fs::read(path_ref)
        .await
        .with_context(|| format!("Failed to read page file {}", path_ref.display()))?;
    let page: PageConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse JSON page from {}", path_ref.display()))?;
    validate_page(&page)?;
    debug!(target: "linkbio::loader", "Loaded page from {}", path_ref.display());
    Ok(page)
}

/// Generate the JSON Schema for the PageConfig model (for external validation or tooling).
pub fn generate_schema() -> Schema {
    schema_for!(PageConfig)
}

/// Write the JSON Schema for the PageConfig model to any writer (pretty-printed).
pub fn write_schema_to_writer<W: Write>(mut writer: W) -> Result<()> {
    let schema = generate_schema();
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    writer
        .write_all(json.as_bytes())
        .context("Failed to write schema to writer")?;
    Ok(())
}

/// Editor-side checks run before a page is published.
/// - `categories[].limit` must be positive when present.
/// - `id`s must be unique inside each list (socials, top links, categories,
///   and items of one category).
///
/// The decoder never calls this: a shared token is rendered as long as it is
/// structurally sound.
pub fn validate_page(page: &PageConfig) -> Result<()> {
    page.validate()
        .map_err(|errors| anyhow::anyhow!("{errors}"))
        .context("Page failed field validation")?;

    ensure_unique_ids("socials", page.socials.iter().map(|s| s.id.as_str()))?;
    ensure_unique_ids("topLinks", page.top_links.iter().map(|t| t.id.as_str()))?;
    ensure_unique_ids("categories", page.categories.iter().map(|c| c.id.as_str()))?;

    for category in &page.categories {
        ensure_unique_ids("items", category.items.iter().map(|i| i.id.as_str()))
            .with_context(|| format!("Invalid items in category '{}'", category.id))?;
    }

    Ok(())
}

fn ensure_unique_ids<'a>(list: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            bail!("Duplicate id '{}' in `{}`", id, list);
        }
    }
    Ok(())
}
