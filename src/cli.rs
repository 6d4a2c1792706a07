use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::calculation::usage::TimeRange;
use crate::error::Error;
use crate::i18n::Language;
use crate::io::preferences::Theme;

impl Cli {
    /// Convenience constructor to avoid redundant `Parser` imports in main.
    pub fn new() -> Self {
        Cli::parse()
    }

    /// Account endpoints refuse anonymous calls, so fail early with a hint.
    pub fn try_get_access_token(&self) -> miette::Result<&String> {
        let token = self
            .access_token
            .as_ref()
            .ok_or(Error::AccessTokenNotFound)?;

        Ok(token)
    }
}

impl UsageArgs {
    /// Compact range parser, days only: "7d" -> `TimeRange::Week`.
    pub fn try_parse_since(&self) -> miette::Result<TimeRange> {
        let since = &self.since;

        let Some(digits) = since.strip_suffix('d') else {
            let error = Error::UnsupportedTimeUnit(since.to_owned());

            return Err(error.into());
        };

        let days = digits
            .parse::<u64>()
            .map_err(|_| Error::InvalidDuration(digits.to_owned()))?;

        Ok(TimeRange::try_from(days)?)
    }
}

// Structs

#[derive(Parser, Debug)]
#[command(name = "pricebook", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    //
    // Global args start here..
    //

    //
    /// Skip animations
    #[arg(long, default_value_t = false, global = true)]
    pub no_animate: bool,

    /// No format. Raw numbers, no labels.
    #[arg(long, default_value_t = false, global = true)]
    pub unformatted: bool,

    /// Where the platform lives, e.g. https://api.example.com
    #[arg(
        long,
        env = "PRICEBOOK_BASE_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    pub base_url: String,

    /// Personal access token from the platform's settings page.
    #[arg(
        long,
        env = "PRICEBOOK_ACCESS_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub access_token: Option<String>,

    /// Directory holding preferences.json. Defaults to the platform config dir.
    #[arg(long, env = "PRICEBOOK_CONFIG_DIR", global = true)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Browse the model catalog with its prices.
    Models(ModelsArgs),

    /// Pricing table, popular models first.
    Pricing(SourceArgs),

    /// Demo chart of calls per model over a time window.
    Usage(UsageArgs),

    /// Your group and remaining balance.
    Account,

    /// The platform's announcement and home page.
    Home,

    /// Dump the catalog as JSON.
    ///
    /// Useful for piping into tools like `jq`.
    Raw(SourceArgs),

    /// Show or change stored preferences.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read the public catalog instead of the one for your account.
    #[arg(long, default_value_t = false)]
    pub public: bool,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ModelsArgs {
    /// Model family tab.
    #[arg(long, default_value = "all")]
    pub category: CategoryFilter,

    /// How the model is charged.
    #[arg(long, default_value = "all")]
    pub billing: BillingFilter,

    /// Case-insensitive part of the model name.
    #[arg(long, default_value = "")]
    pub search: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct UsageArgs {
    /// One of 1d, 7d, 30d, 90d.
    #[arg(long, default_value = "7d")]
    pub since: String,

    /// Fix the demo numbers. A new draw every run otherwise.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Print the stored preferences.
    Show,

    SetTheme { theme: Theme },

    SetLanguage { language: Language },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Gemini,
    #[value(name = "openai")]
    OpenAI,
    AnthropicClaude,
    #[value(name = "xai")]
    XAi,
    #[value(name = "deepseek")]
    DeepSeek,
    Other,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BillingFilter {
    #[default]
    All,
    PerCall,
    Free,
    Token,
}
