use serde::Serialize;

use crate::config::{Background, BackgroundKind, ButtonVariant, ShadowLevel, ThemeConfig};

/// Text color used on solid buttons (the accent is the background there).
pub const SOLID_BUTTON_TEXT: &str = "#0b1020";

/// Inline CSS properties of a link button, derived from the theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonCss {
    pub border_radius: String,
    pub color: String,
    pub background_color: String,
    pub border_color: String,
    pub box_shadow: &'static str,
    /// Utility class applied on hover.
    pub hover_class: &'static str,
}

impl ButtonCss {
    pub fn from_theme(theme: &ThemeConfig) -> Self {
        let accent = theme.palette.accent.clone();
        let button = &theme.button;

        let (color, background_color) = match button.variant {
            ButtonVariant::Solid => (SOLID_BUTTON_TEXT.to_string(), accent.clone()),
            ButtonVariant::Outline | ButtonVariant::Ghost => {
                (accent.clone(), "transparent".to_string())
            }
        };
        let border_color = match button.variant {
            ButtonVariant::Outline => accent,
            ButtonVariant::Solid | ButtonVariant::Ghost => "transparent".to_string(),
        };
        let hover_class = match button.variant {
            ButtonVariant::Ghost => "hover:bg-white/10",
            ButtonVariant::Solid | ButtonVariant::Outline => "hover:opacity-90",
        };

        Self {
            border_radius: format!("{}px", button.radius),
            color,
            background_color,
            border_color,
            box_shadow: box_shadow(button.shadow),
            hover_class,
        }
    }
}

/// CSS `box-shadow` value for a shadow level.
pub fn box_shadow(level: ShadowLevel) -> &'static str {
    match level {
        ShadowLevel::None => "none",
        ShadowLevel::Soft => "0 8px 24px rgba(0,0,0,.25)",
        ShadowLevel::Lg => "0 12px 36px rgba(0,0,0,.35)",
    }
}

/// CSS `background` shorthand for the page.
///
/// Colors and gradients are used verbatim. Image values are wrapped in
/// `url(..)` unless they already are one.
pub fn background_css(background: &Background) -> String {
    match background.kind {
        BackgroundKind::Color | BackgroundKind::Gradient => background.value.clone(),
        BackgroundKind::Image => {
            let value = background.value.trim();
            if value.starts_with("url(") {
                value.to_string()
            } else {
                format!(
                    "url(\"{}\") center / cover no-repeat",
                    value.replace('"', "%22")
                )
            }
        }
    }
}
