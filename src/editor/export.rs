use anyhow::{Context, Result};

use crate::config::ThemeConfig;

/// Export the theme as a `:root` block of CSS custom properties.
pub fn css_variables(theme: &ThemeConfig) -> String {
    format!(
        ":root{{\n  --bg: {};\n  --text: {};\n  --muted: {};\n  --card: {};\n  --accent: {};\n}}",
        theme.background.value,
        theme.palette.text,
        theme.palette.muted,
        theme.palette.card,
        theme.palette.accent,
    )
}

/// Export the theme as pretty-printed JSON.
pub fn theme_json(theme: &ThemeConfig) -> Result<String> {
    serde_json::to_string_pretty(theme).context("Failed to serialize theme")
}
