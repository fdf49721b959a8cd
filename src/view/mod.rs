/*!
Public viewer: turns a decode outcome into exactly one of two screens.

- `View::Page`: the full page, with every list populated and every category
  already cut down to its `limit`.
- `View::InvalidLink`: the fixed "invalid link" screen.

There is no partially rendered state. A missing token and a corrupted token
both produce `InvalidLink`.
*/

use serde::Serialize;
use tracing::{debug, info};

use crate::codec;
use crate::config::{Category, LinkItem, PageConfig, SocialLink, TopLink};
use crate::share::{self, EDITOR_PATH};

pub mod style;

pub use style::{ButtonCss, background_css, box_shadow};

/// What the viewer shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum View {
    Page(PageView),
    InvalidLink(InvalidLink),
}

impl View {
    /// Render from an optional token (the value of `?d=`).
    pub fn from_token(token: Option<&str>) -> Self {
        let outcome = match token {
            Some(token) => match codec::decode(token) {
                Ok(page) => Some(page),
                Err(err) => {
                    info!(target: "linkbio::view", error = %err, "Rejected share token");
                    None
                }
            },
            None => {
                debug!(target: "linkbio::view", "No share token supplied");
                None
            }
        };
        select(outcome)
    }

    /// Render from the URL the viewer was opened with.
    pub fn from_url(url: &str) -> Self {
        Self::from_token(share::extract_token(url).as_deref())
    }

    pub fn is_page(&self) -> bool {
        matches!(self, View::Page(_))
    }
}

/// The render selector: a page when decoding succeeded, `InvalidLink` otherwise.
pub fn select(outcome: Option<PageConfig>) -> View {
    match outcome {
        Some(page) => View::Page(PageView::new(&page)),
        None => View::InvalidLink(InvalidLink::default()),
    }
}

/// Items of `category` that are rendered: the first `limit`, in order.
///
/// A `limit` of zero is treated as absent.
pub fn visible_items(category: &Category) -> &[LinkItem] {
    match category.limit {
        Some(limit) if limit > 0 => {
            let end = category.items.len().min(limit as usize);
            &category.items[..end]
        }
        _ => &category.items,
    }
}

/// Fully resolved page, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub title: String,
    pub bio: Option<String>,
    pub avatar_src: Option<String>,
    /// Footer label, `/<slug>`.
    pub footer: String,
    pub background: String,
    pub text_color: String,
    pub muted_color: String,
    pub button: ButtonCss,
    pub top_links: Vec<TopLink>,
    pub socials: Vec<SocialLink>,
    pub categories: Vec<CategoryView>,
}

impl PageView {
    pub fn new(page: &PageConfig) -> Self {
        let theme = &page.theme;
        Self {
            title: page.title.clone(),
            bio: non_empty(page.bio.as_deref()),
            avatar_src: non_empty(page.avatar.as_ref().and_then(|a| a.src.as_deref())),
            footer: format!("/{}", page.slug),
            background: background_css(&theme.background),
            text_color: theme.palette.text.clone(),
            muted_color: theme.palette.muted.clone(),
            button: ButtonCss::from_theme(theme),
            top_links: page.top_links.clone(),
            socials: page.socials.clone(),
            categories: page.categories.iter().map(CategoryView::new).collect(),
        }
    }
}

/// A category with its items already limited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub title: String,
    pub items: Vec<LinkItem>,
}

impl CategoryView {
    pub fn new(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            title: category.title.clone(),
            items: visible_items(category).to_vec(),
        }
    }
}

/// Fixed "invalid link" screen with a call to action back to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidLink {
    pub heading: &'static str,
    pub message: &'static str,
    pub action_label: &'static str,
    pub action_href: &'static str,
}

impl Default for InvalidLink {
    fn default() -> Self {
        Self {
            heading: "Invalid link",
            message: "Generate the link again in the editor.",
            action_label: "Open the editor",
            action_href: EDITOR_PATH,
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.is_empty()).map(str::to_owned)
}
