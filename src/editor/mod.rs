/*!
Editor-side operations on a `PageConfig`.

Every edit takes the current page by reference and returns a new page; the
original is never modified. Share tokens already handed out therefore always
describe the page as it was when they were encoded.

Edits that address a missing id or an out-of-range index return an unchanged
copy.
*/

use crate::config::{
    Avatar, Background, ButtonStyle, Category, LinkItem, PageConfig, Palette, SocialKind,
    SocialLink, ThemeConfig, TopLink,
};
use crate::utils::ids::fresh_id;

pub mod export;

pub use export::{css_variables, theme_json};

/// The page a new editor session starts with.
pub fn starter() -> PageConfig {
    let page = PageConfig {
        slug: "me".into(),
        title: "Your Name".into(),
        bio: Some("A short bio to check contrast.".into()),
        ..Default::default()
    };
    let page = page.add_category("Links");
    let category_id = page.categories[0].id.clone();
    [
        "Talk to me on WhatsApp",
        "Book an appointment",
        "Follow me on Instagram",
    ]
    .into_iter()
    .fold(page, |page, label| page.add_item(&category_id, label, "#"))
}

impl PageConfig {
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }

    pub fn with_slug(&self, slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..self.clone()
        }
    }

    /// Set the bio; an empty string clears it.
    pub fn with_bio(&self, bio: impl Into<String>) -> Self {
        let bio = bio.into();
        Self {
            bio: (!bio.is_empty()).then_some(bio),
            ..self.clone()
        }
    }

    /// Set the avatar source; `None` removes the avatar.
    pub fn with_avatar(&self, src: Option<String>) -> Self {
        Self {
            avatar: src.map(|src| Avatar { src: Some(src) }),
            ..self.clone()
        }
    }

    pub fn with_theme(&self, theme: ThemeConfig) -> Self {
        Self {
            theme,
            ..self.clone()
        }
    }

    pub fn with_background(&self, background: Background) -> Self {
        self.with_theme(ThemeConfig {
            background,
            ..self.theme.clone()
        })
    }

    pub fn with_palette(&self, palette: Palette) -> Self {
        self.with_theme(ThemeConfig {
            palette,
            ..self.theme.clone()
        })
    }

    pub fn with_button(&self, button: ButtonStyle) -> Self {
        self.with_theme(ThemeConfig {
            button,
            ..self.theme.clone()
        })
    }

    pub fn add_social(&self, kind: SocialKind, url: impl Into<String>) -> Self {
        let mut next = self.clone();
        let id = fresh_id(self.socials.iter().map(|s| s.id.as_str()));
        next.socials.push(SocialLink {
            id,
            kind,
            url: url.into(),
        });
        next
    }

    pub fn add_top_link(&self, label: impl Into<String>, url: impl Into<String>) -> Self {
        let mut next = self.clone();
        let id = fresh_id(self.top_links.iter().map(|t| t.id.as_str()));
        next.top_links.push(TopLink {
            id,
            label: label.into(),
            url: url.into(),
        });
        next
    }

    pub fn add_category(&self, title: impl Into<String>) -> Self {
        let mut next = self.clone();
        let id = fresh_id(self.categories.iter().map(|c| c.id.as_str()));
        next.categories.push(Category {
            id,
            title: title.into(),
            limit: None,
            items: Vec::new(),
        });
        next
    }

    /// Append a link to the category with `category_id`.
    pub fn add_item(
        &self,
        category_id: &str,
        label: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let (label, url) = (label.into(), url.into());
        self.update_category(category_id, |category| {
            let id = fresh_id(category.items.iter().map(|i| i.id.as_str()));
            category.items.push(LinkItem {
                id,
                label,
                url,
                icon: None,
            });
        })
    }

    pub fn remove_item(&self, category_id: &str, item_id: &str) -> Self {
        self.update_category(category_id, |category| {
            category.items.retain(|item| item.id != item_id);
        })
    }

    /// Set (or clear) the display limit of a category. `Some(0)` clears it.
    pub fn set_limit(&self, category_id: &str, limit: Option<u32>) -> Self {
        self.update_category(category_id, |category| {
            category.limit = limit.filter(|&l| l > 0);
        })
    }

    pub fn remove_category(&self, category_id: &str) -> Self {
        let mut next = self.clone();
        next.categories.retain(|c| c.id != category_id);
        next
    }

    /// Move the category at `from` so it ends up at index `to`.
    pub fn move_category(&self, from: usize, to: usize) -> Self {
        let mut next = self.clone();
        move_entry(&mut next.categories, from, to);
        next
    }

    /// Move an item inside one category from index `from` to index `to`.
    pub fn move_item(&self, category_id: &str, from: usize, to: usize) -> Self {
        self.update_category(category_id, |category| {
            move_entry(&mut category.items, from, to);
        })
    }

    fn update_category(&self, category_id: &str, edit: impl FnOnce(&mut Category)) -> Self {
        let mut next = self.clone();
        if let Some(category) = next.categories.iter_mut().find(|c| c.id == category_id) {
            edit(category);
        }
        next
    }
}

fn move_entry<T>(list: &mut Vec<T>, from: usize, to: usize) {
    if from >= list.len() || to >= list.len() || from == to {
        return;
    }
    let entry = list.remove(from);
    list.insert(to, entry);
}
