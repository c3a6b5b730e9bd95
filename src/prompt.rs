use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::ApiError;

/// Theme key → descriptive prompt fragment. Closed set, fixed at startup.
pub static THEME_PROMPTS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("character", "character portrait"),
        ("animal", "animal"),
        ("technology", "futuristic technology"),
        ("landscape", "beautiful landscape"),
        ("architecture", "architecture"),
        ("abstract", "abstract art"),
    ])
});

/// Style key → descriptive prompt fragment. Closed set, fixed at startup.
pub static STYLE_PROMPTS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("realistic", "photorealistic, highly detailed, 8k"),
        ("natural", "natural lighting, organic, serene"),
        ("anime", "anime style, manga, vibrant colors"),
        ("cyberpunk", "cyberpunk, neon lights, futuristic city"),
        ("fantasy", "fantasy art, magical, ethereal"),
        ("minimalist", "minimalist, clean, simple composition"),
    ])
});

/// Constant quality boilerplate appended to every composed prompt.
const QUALITY_SUFFIX: &str = "wallpaper, high quality, masterpiece";

/// Validates the theme and style keys and composes the full generation prompt.
///
/// Pure function: identical inputs always yield an identical prompt string.
/// Rejects empty values before membership checks so the caller gets the
/// missing-parameter error rather than an invalid-key one.
pub fn compose_prompt(theme: &str, style: &str) -> Result<String, ApiError> {
    if theme.is_empty() || style.is_empty() {
        return Err(ApiError::MissingParameter);
    }

    let theme_phrase = THEME_PROMPTS
        .get(theme)
        .ok_or_else(|| ApiError::InvalidTheme(theme.to_string()))?;
    let style_phrase = STYLE_PROMPTS
        .get(style)
        .ok_or_else(|| ApiError::InvalidStyle(style.to_string()))?;

    Ok(format!("{theme_phrase}, {style_phrase}, {QUALITY_SUFFIX}"))
}
