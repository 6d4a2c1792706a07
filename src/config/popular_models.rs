/// Well-known models that get the "popular" badge and float to the top of the
/// pricing table. Compared case-insensitively against the full model name.
pub static POPULAR_MODELS: &[&str] = &[
    "gpt-4o",
    "gpt-4o-mini",
    "gpt-4.1",
    "o3-mini",
    "claude-3-5-sonnet",
    "claude-3-5-sonnet-20241022",
    "claude-3-haiku",
    "claude-3-7-sonnet-20250219",
    "claude-sonnet-4-20250514",
    "gemini-2.5-pro",
    "gemini-2.5-flash",
    "deepseek-chat",
    "deepseek-reasoner",
    "dall-e-3",
    "midjourney",
];

/// What the usage chart shows when the catalog can't be read.
pub static DEMO_USAGE_MODELS: &[&str] = &[
    "gemini-2.5-pro",
    "gemini-2.5-pro-preview-03-25",
    "gemini-2.5-pro-preview-05-06",
    "gemini-2.5-pro-preview-06-05",
    "claude-sonnet-4-20250514",
    "claude-3-7-sonnet-20250219",
    "claude-opus-4-20250514",
    "claude-sonnet-4-20250514-thinking",
    "claude-opus-4-1-20250805",
    "claude-opus-4-1-20250805-thinking",
    "gemini-2.5-flash",
    "gemini-2.5-flash-preview-04-17",
];

pub fn is_popular(model: &str) -> bool {
    POPULAR_MODELS
        .iter()
        .any(|popular| popular.eq_ignore_ascii_case(model))
}
