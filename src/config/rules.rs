use crate::calculation::classifier::{Provider, UiCategory};

/// A single test against a lower-cased (or raw, for icons) model name.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    Contains(&'static str),
    StartsWith(&'static str),
}

impl Matcher {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Matcher::Contains(needle) => name.contains(needle),
            Matcher::StartsWith(prefix) => name.starts_with(prefix),
        }
    }
}

/// One row of a first-match-wins table.
/// The rule fires when any of its matchers does.
#[derive(Debug)]
pub struct Rule<T> {
    pub matchers: &'static [Matcher],
    pub result: T,
}

impl<T> Rule<T> {
    pub fn matches(&self, name: &str) -> bool {
        self.matchers.iter().any(|matcher| matcher.matches(name))
    }
}

use Matcher::{Contains, StartsWith};

/// Prefixes that put a model into the OpenAI tab.
pub const OPENAI_PREFIXES: &[Matcher] = &[
    StartsWith("gpt-"),
    StartsWith("o1-"),
    StartsWith("o3-"),
    StartsWith("o4-"),
    StartsWith("tts-"),
    StartsWith("dall-e"),
    StartsWith("whisper"),
    StartsWith("chatgpt"),
];

/// Catalog tabs. Order matters: "gemini" beats everything, so a name like
/// "gpt-gemini-bridge" lands in Gemini.
pub static UI_CATEGORY_RULES: &[Rule<UiCategory>] = &[
    Rule {
        matchers: &[Contains("gemini")],
        result: UiCategory::Gemini,
    },
    Rule {
        matchers: OPENAI_PREFIXES,
        result: UiCategory::OpenAI,
    },
    Rule {
        matchers: &[Contains("claude")],
        result: UiCategory::Claude,
    },
    Rule {
        matchers: &[Contains("grok")],
        result: UiCategory::XAi,
    },
    Rule {
        matchers: &[Contains("deepseek")],
        result: UiCategory::DeepSeek,
    },
];

/// Display labels for the publisher of a model.
pub static PROVIDER_RULES: &[Rule<Provider>] = &[
    Rule {
        matchers: &[
            Contains("gpt"),
            Contains("dall-e"),
            Contains("whisper"),
            Contains("tts"),
        ],
        result: Provider::OpenAI,
    },
    Rule {
        matchers: &[Contains("claude")],
        result: Provider::Anthropic,
    },
    Rule {
        matchers: &[Contains("gemini")],
        result: Provider::Google,
    },
    Rule {
        matchers: &[Contains("deepseek")],
        result: Provider::DeepSeek,
    },
    Rule {
        matchers: &[Contains("qwen")],
        result: Provider::Alibaba,
    },
    Rule {
        matchers: &[Contains("glm"), Contains("chatglm")],
        result: Provider::Zhipu,
    },
    Rule {
        matchers: &[Contains("yi-")],
        result: Provider::ZeroOneAi,
    },
    Rule {
        matchers: &[Contains("moonshot"), Contains("kimi")],
        result: Provider::Moonshot,
    },
    Rule {
        matchers: &[Contains("spark")],
        result: Provider::IFlytek,
    },
    Rule {
        matchers: &[Contains("hunyuan")],
        result: Provider::Tencent,
    },
    Rule {
        matchers: &[Contains("doubao")],
        result: Provider::ByteDance,
    },
    Rule {
        matchers: &[Contains("midjourney"), Contains("mj")],
        result: Provider::Midjourney,
    },
    Rule {
        matchers: &[Contains("flux")],
        result: Provider::Flux,
    },
    Rule {
        matchers: &[Contains("stable-diffusion")],
        result: Provider::StabilityAI,
    },
];

/// Icon keys, matched against the name exactly as the server sends it.
/// Case matters here ("ERNIE-", "Baichuan").
pub static ICON_RULES: &[Rule<&str>] = &[
    Rule {
        matchers: &[StartsWith("gpt-3")],
        result: "openai-gpt3",
    },
    Rule {
        matchers: &[StartsWith("gpt-4"), StartsWith("chatgpt")],
        result: "openai-gpt4",
    },
    Rule {
        matchers: &[StartsWith("o1"), StartsWith("o3"), StartsWith("o4")],
        result: "openai-o1",
    },
    Rule {
        matchers: &[
            StartsWith("tts"),
            StartsWith("dall-e"),
            StartsWith("whisper"),
            StartsWith("omni-"),
            StartsWith("text-embedding"),
            StartsWith("text-moderation-"),
            StartsWith("davinci"),
            StartsWith("babbage"),
        ],
        result: "openai",
    },
    Rule {
        matchers: &[StartsWith("claude")],
        result: "claude",
    },
    Rule {
        matchers: &[StartsWith("gemini")],
        result: "gemini",
    },
    Rule {
        matchers: &[StartsWith("deepseek")],
        result: "deepseek",
    },
    Rule {
        matchers: &[StartsWith("glm"), StartsWith("chatglm")],
        result: "zhipu",
    },
    Rule {
        matchers: &[StartsWith("hunyuan")],
        result: "hunyuan",
    },
    Rule {
        matchers: &[StartsWith("spark"), StartsWith("Spark")],
        result: "spark",
    },
    Rule {
        matchers: &[StartsWith("abab")],
        result: "minimax",
    },
    Rule {
        matchers: &[StartsWith("moonshot")],
        result: "kimi",
    },
    Rule {
        matchers: &[StartsWith("yi")],
        result: "yi",
    },
    Rule {
        matchers: &[StartsWith("groq")],
        result: "groq",
    },
    Rule {
        matchers: &[StartsWith("ollama"), StartsWith("llama")],
        result: "ollama",
    },
    Rule {
        matchers: &[StartsWith("doubao")],
        result: "doubao",
    },
    Rule {
        matchers: &[StartsWith("360")],
        result: "ai360",
    },
    Rule {
        matchers: &[StartsWith("midjourney"), StartsWith("mj-chat")],
        result: "midjourney",
    },
    Rule {
        matchers: &[StartsWith("flux")],
        result: "flux",
    },
    Rule {
        matchers: &[StartsWith("grok")],
        result: "grok",
    },
    Rule {
        matchers: &[StartsWith("suno")],
        result: "suno",
    },
    Rule {
        matchers: &[StartsWith("pika")],
        result: "pika",
    },
    Rule {
        matchers: &[StartsWith("vidu")],
        result: "vidu",
    },
    Rule {
        matchers: &[StartsWith("ERNIE-")],
        result: "baidu",
    },
    Rule {
        matchers: &[StartsWith("qwen-")],
        result: "alibaba",
    },
    Rule {
        matchers: &[StartsWith("command")],
        result: "cohere",
    },
    Rule {
        matchers: &[StartsWith("Baichuan")],
        result: "baichuan",
    },
];

pub const DEFAULT_ICON: &str = "openai-default";

/// Runs a table top to bottom and returns the first hit.
pub fn first_match<T: Copy>(rules: &[Rule<T>], name: &str) -> Option<T> {
    rules
        .iter()
        .find(|rule| rule.matches(name))
        .map(|rule| rule.result)
}
