use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_valid::Validate;

/// Root configuration of one shareable page.
///
/// This is the value the editor mutates and the value packed into a share
/// token. Every field carries a serde default so that tokens produced by older
/// editors (or hand-written JSON) still deserialize into a complete page:
/// - lists default to empty
/// - `theme` (and each of its parts) defaults to the published theme
/// - required strings default to `""`
///
/// Unknown keys are ignored, so newer encoders can add fields freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    /// Short label shown in the footer (`/slug`). Not required to be unique.
    pub slug: String,

    /// Display name.
    pub title: String,

    /// Optional descriptive line under the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    /// Optional avatar image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,

    /// Colors, background and button styling.
    pub theme: ThemeConfig,

    /// Social icons, in display order.
    pub socials: Vec<SocialLink>,

    /// Small links rendered above the header.
    pub top_links: Vec<TopLink>,

    /// Categorized link buttons.
    #[validate]
    pub categories: Vec<Category>,
}

/// Avatar reference: a remote URL or an embedded `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(default)]
pub struct Avatar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

/// Page theme. `Default` is the published theme new pages start from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(default)]
pub struct ThemeConfig {
    pub background: Background,
    pub palette: Palette,
    pub button: ButtonStyle,
}

/// Page background: a flat color, a CSS gradient string, or an image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Background {
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: BackgroundKind,
    pub value: String,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Color,
            value: "#0b1020".into(),
        }
    }
}

/// Background kind enumeration.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    #[default]
    Color,
    Gradient,
    Image,
}

/// Color palette (CSS color strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Palette {
    pub text: String,
    pub accent: String,
    pub muted: String,
    pub card: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: "#e5e7eb".into(),
            accent: "#22d3ee".into(),
            muted: "#94a3b8".into(),
            card: "#111827".into(),
        }
    }
}

/// Link button styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ButtonStyle {
    #[serde(deserialize_with = "lenient")]
    pub variant: ButtonVariant,
    /// Corner radius in pixels.
    pub radius: u32,
    #[serde(deserialize_with = "lenient")]
    pub shadow: ShadowLevel,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            variant: ButtonVariant::Solid,
            radius: 18,
            shadow: ShadowLevel::Soft,
        }
    }
}

/// Button variant enumeration.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Solid,
    Outline,
    Ghost,
}

/// Button shadow level enumeration.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShadowLevel {
    None,
    #[default]
    Soft,
    Lg,
}

/// A social icon pointing to a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(default)]
pub struct SocialLink {
    pub id: String,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: SocialKind,
    pub url: String,
}

/// Fixed vocabulary of social icons.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SocialKind {
    Instagram,
    Whatsapp,
    Tiktok,
    Youtube,
    X,
    Facebook,
    Linkedin,
    Github,
    Email,
    #[default]
    Website,
}

/// A plain (id, label, url) link shown above the main content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(default)]
pub struct TopLink {
    pub id: String,
    pub label: String,
    pub url: String,
}

/// A titled group of link buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate, Default)]
#[serde(default)]
pub struct Category {
    pub id: String,
    pub title: String,
    /// Show at most this many items, in order. Absent means "show all".
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(minimum = 1)]
    pub limit: Option<u32>,
    pub items: Vec<LinkItem>,
}

/// A single link button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(default)]
pub struct LinkItem {
    pub id: String,
    pub label: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Deserialize a closed enum, falling back to its default variant when the tag
/// is unknown or has the wrong JSON type.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_enum_tags_fall_back_to_defaults() {
        let theme: ThemeConfig = serde_json::from_value(json!({
            "background": { "type": "video", "value": "#000" },
            "button": { "variant": "neon", "radius": 4, "shadow": 3 }
        }))
        .unwrap();

        assert_eq!(theme.background.kind, BackgroundKind::Color);
        assert_eq!(theme.background.value, "#000");
        assert_eq!(theme.button.variant, ButtonVariant::Solid);
        assert_eq!(theme.button.shadow, ShadowLevel::Soft);
        assert_eq!(theme.button.radius, 4);
        assert_eq!(theme.palette, Palette::default());
    }

    #[test]
    fn missing_fields_take_published_defaults() {
        let page: PageConfig = serde_json::from_value(json!({ "title": "Ana" })).unwrap();
        assert_eq!(page.title, "Ana");
        assert_eq!(page.slug, "");
        assert_eq!(page.theme, ThemeConfig::default());
        assert!(page.socials.is_empty());
        assert!(page.top_links.is_empty());
        assert!(page.categories.is_empty());
    }

    #[test]
    fn keys_are_camel_case_and_optionals_are_omitted() {
        let page = PageConfig {
            top_links: vec![TopLink {
                id: "t1".into(),
                label: "Blog".into(),
                url: "https://blog.test".into(),
            }],
            ..Default::default()
        };
        let v = serde_json::to_value(&page).unwrap();
        assert!(v.get("topLinks").is_some());
        assert!(v.get("bio").is_none());
        assert!(v.get("avatar").is_none());
    }

    #[test]
    fn social_kind_uses_type_key() {
        let s: SocialLink =
            serde_json::from_value(json!({"id": "s1", "type": "github", "url": "https://gh.test"}))
                .unwrap();
        assert_eq!(s.kind, SocialKind::Github);

        let s: SocialLink =
            serde_json::from_value(json!({"id": "s2", "type": "myspace", "url": "u"})).unwrap();
        assert_eq!(s.kind, SocialKind::Website);
    }

    #[test]
    fn extra_keys_are_ignored() {
        let item: LinkItem = serde_json::from_value(json!({
            "id": "i1", "label": "Site", "url": "https://x.test", "clicks": 42
        }))
        .unwrap();
        assert_eq!(item.label, "Site");
    }
}
