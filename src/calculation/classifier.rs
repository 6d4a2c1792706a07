use std::fmt;

use crate::config::rules::{
    DEFAULT_ICON, ICON_RULES, PROVIDER_RULES, UI_CATEGORY_RULES, first_match,
};
use crate::prelude::*;

/// The tab a model shows up under in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UiCategory {
    Gemini,
    OpenAI,
    Claude,
    #[serde(rename = "xAI")]
    XAi,
    DeepSeek,
    Other,
}

/// The organisation that publishes a model. Finer grained than the tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Provider {
    OpenAI,
    Anthropic,
    Google,
    DeepSeek,
    Alibaba,
    Zhipu,
    #[serde(rename = "01.AI")]
    ZeroOneAi,
    Moonshot,
    #[serde(rename = "iFlytek")]
    IFlytek,
    Tencent,
    ByteDance,
    Midjourney,
    Flux,
    StabilityAI,
    Other,
}

impl Provider {
    pub fn label(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::Google => "Google",
            Provider::DeepSeek => "DeepSeek",
            Provider::Alibaba => "Alibaba",
            Provider::Zhipu => "Zhipu",
            Provider::ZeroOneAi => "01.AI",
            Provider::Moonshot => "Moonshot",
            Provider::IFlytek => "iFlytek",
            Provider::Tencent => "Tencent",
            Provider::ByteDance => "ByteDance",
            Provider::Midjourney => "Midjourney",
            Provider::Flux => "Flux",
            Provider::StabilityAI => "StabilityAI",
            Provider::Other => "Other",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl UiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            UiCategory::Gemini => "Gemini",
            UiCategory::OpenAI => "OpenAI",
            UiCategory::Claude => "Claude",
            UiCategory::XAi => "xAI",
            UiCategory::DeepSeek => "DeepSeek",
            UiCategory::Other => "Other",
        }
    }
}

impl fmt::Display for UiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything we derive from a bare model name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub provider: Provider,
    pub ui_category: UiCategory,
    pub icon_key: &'static str,
}

pub fn ui_category(model: &str) -> UiCategory {
    first_match(UI_CATEGORY_RULES, &model.to_lowercase()).unwrap_or(UiCategory::Other)
}

pub fn provider(model: &str) -> Provider {
    first_match(PROVIDER_RULES, &model.to_lowercase()).unwrap_or(Provider::Other)
}

/// Icons are matched on the raw name, not the lower-cased one.
pub fn icon_key(model: &str) -> &'static str {
    first_match(ICON_RULES, model).unwrap_or(DEFAULT_ICON)
}

pub fn classify(model: &str) -> Classification {
    Classification {
        provider: provider(model),
        ui_category: ui_category(model),
        icon_key: icon_key(model),
    }
}
