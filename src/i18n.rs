use clap::ValueEnum;

use crate::calculation::billing::BillingCategory;
use crate::prelude::*;

/// Interface language. Only affects labels and number formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    Zh,
    #[default]
    En,
}

impl Language {
    /// Guesses from a locale string such as `zh_CN.UTF-8`. Anything that is not
    /// Chinese falls back to English.
    pub fn detect(locale: Option<&str>) -> Self {
        match locale {
            Some(value) if value.to_lowercase().starts_with("zh") => Language::Zh,
            _ => Language::En,
        }
    }

    /// Reads `LC_ALL`, then `LANG`.
    pub fn from_env() -> Self {
        let locale = std::env::var("LC_ALL")
            .ok()
            .filter(|value| !value.is_empty())
            .or_else(|| std::env::var("LANG").ok());

        Self::detect(locale.as_deref())
    }
}

/// Strings the CLI prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    PerCall,
    Free,
    Token,
    FreeHint,
    PerCallSuffix,
    InputPrice,
    OutputPrice,
    PerMillion,
    Popular,
    FoundModels,
    NoMatchingModels,
    AdjustFilters,
    NoModelsAvailable,
    TryLater,
    LoadFailed,
    NoticeLoadFailed,
    UsageTitle,
    UsageDisclaimer,
    Calls,
    Group,
    DefaultGroup,
    Balance,
    PerCallTakesPrecedence,
    HomeTitle,
    HomeSubtitle,
    Notice,
}

pub fn text(label: Label, language: Language) -> &'static str {
    use Label::*;

    match (label, language) {
        (PerCall, Language::Zh) => "按次计费",
        (PerCall, Language::En) => "Per call",
        (Free, Language::Zh) => "免费",
        (Free, Language::En) => "Free",
        (Token, Language::Zh) => "Token计费",
        (Token, Language::En) => "Per token",
        (FreeHint, Language::Zh) => "无需付费",
        (FreeHint, Language::En) => "No charge",
        (PerCallSuffix, Language::Zh) => "/次",
        (PerCallSuffix, Language::En) => "/call",
        (InputPrice, Language::Zh) => "输入",
        (InputPrice, Language::En) => "Input",
        (OutputPrice, Language::Zh) => "输出",
        (OutputPrice, Language::En) => "Output",
        (PerMillion, _) => "/1M",
        (Popular, Language::Zh) => "热门",
        (Popular, Language::En) => "Popular",
        (FoundModels, Language::Zh) => "找到模型数",
        (FoundModels, Language::En) => "Models found",
        (NoMatchingModels, Language::Zh) => "没有找到匹配的模型",
        (NoMatchingModels, Language::En) => "No matching models",
        (AdjustFilters, Language::Zh) => "请尝试调整搜索条件或筛选器",
        (AdjustFilters, Language::En) => "Try a different search or filter",
        (NoModelsAvailable, Language::Zh) => "暂无可用模型",
        (NoModelsAvailable, Language::En) => "No models available",
        (TryLater, Language::Zh) => "请稍后再试或联系管理员",
        (TryLater, Language::En) => "Please try again later or contact the administrator",
        (LoadFailed, Language::Zh) => "加载失败",
        (LoadFailed, Language::En) => "Failed to load",
        (NoticeLoadFailed, Language::Zh) => "无法加载公告",
        (NoticeLoadFailed, Language::En) => "Could not load the notice",
        (UsageTitle, Language::Zh) => "模型调用统计",
        (UsageTitle, Language::En) => "Model usage",
        (UsageDisclaimer, Language::Zh) => "演示数据",
        (UsageDisclaimer, Language::En) => "demo data",
        (Calls, Language::Zh) => "次调用",
        (Calls, Language::En) => "calls",
        (Group, Language::Zh) => "用户组",
        (Group, Language::En) => "Group",
        (DefaultGroup, Language::Zh) => "用户组",
        (DefaultGroup, Language::En) => "default",
        (Balance, Language::Zh) => "余额",
        (Balance, Language::En) => "Balance",
        (PerCallTakesPrecedence, Language::Zh) => {
            "按次计费与按Token计费同时存在时，按次计费优先生效"
        }
        (PerCallTakesPrecedence, Language::En) => {
            "When both per-call and per-token prices exist, the per-call price applies"
        }
        (HomeTitle, Language::Zh) => "AI 聚合平台",
        (HomeTitle, Language::En) => "AI Aggregation Platform",
        (HomeSubtitle, Language::Zh) => "一站式 AI 服务集成平台",
        (HomeSubtitle, Language::En) => "One-stop AI service integration platform",
        (Notice, Language::Zh) => "公告",
        (Notice, Language::En) => "Notice",
    }
}

pub fn billing_label(category: BillingCategory, language: Language) -> &'static str {
    let label = match category {
        BillingCategory::PerCall => Label::PerCall,
        BillingCategory::Free => Label::Free,
        BillingCategory::Token => Label::Token,
    };

    text(label, language)
}
