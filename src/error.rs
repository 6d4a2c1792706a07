use miette::Diagnostic;
use thiserror::Error;

// pricebook::parse -> cli argument parsing/validation.
// pricebook::config -> preferences, directories.
// pricebook::api -> http/response shape errors.

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Invalid duration format: expected integer before unit, got '{0}'")]
    #[diagnostic(
        code(pricebook::parse::duration),
        help("Please provide a valid integer, like '1' or '30'.")
    )]
    InvalidDuration(String),

    #[error(
        "Unsupported time unit. Currently only 'd' (days) suffix (e.g., '7d') is supported, got '{0}'."
    )]
    #[diagnostic(
        code(pricebook::parse::time_unit),
        help("Try using 'd' for days, example: '7d'.")
    )]
    UnsupportedTimeUnit(String),

    #[error("Unsupported time range: {0} days.")]
    #[diagnostic(
        code(pricebook::parse::time_range),
        help("The usage chart only knows these windows: 1d, 7d, 30d, 90d.")
    )]
    UnsupportedTimeRange(u64),

    #[error("Access token not found.")]
    #[diagnostic(
        code(pricebook::config::access_token),
        help(
"This command reads your own account, so it needs a token.\n\
Set PRICEBOOK_ACCESS_TOKEN or pass --access-token. The token is on the platform's settings page."
        )
    )]
    AccessTokenNotFound,

    #[error("Could not find a configuration directory.")]
    #[diagnostic(
        code(pricebook::config::directory),
        help("Pass --config-dir or set PRICEBOOK_CONFIG_DIR.")
    )]
    ConfigDirNotFound,

    #[error("Request to {endpoint} failed: {reason}")]
    #[diagnostic(code(pricebook::api::transport))]
    Transport { endpoint: String, reason: String },

    #[error("The server rejected the request: {0}")]
    #[diagnostic(code(pricebook::api::rejected))]
    Rejected(String),

    #[error("Unexpected response shape from {endpoint}: {detail}")]
    #[diagnostic(
        code(pricebook::api::malformed),
        help("The server may be running an incompatible version.")
    )]
    MalformedResponse { endpoint: String, detail: String },
}
