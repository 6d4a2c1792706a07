mod app;
mod calculation;
mod cli;
mod config;
mod display;
mod error;
mod i18n;
mod io;
mod prelude;
mod router;

use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cli::Cli;
use crate::prelude::*;

const LOG_ENV: &str = "PRICEBOOK_LOG";

fn main() -> AppResult<()> {
    init_logging();

    let cli = Cli::new();

    // Preferences are read here, once, and travel inside the context.
    let mut ctx = App::new(cli)?;

    let report = router::route(&mut ctx)?;

    let output = report.render(ctx.cli.unformatted, ctx.preferences.language)?;

    // Print the result.
    ctx.display.stop_with_message(&output);

    Ok(())
}

// private

/// Logs go to stderr so stdout stays clean for pipes.
/// Quiet by default, e.g. `PRICEBOOK_LOG=debug` for request traces.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
