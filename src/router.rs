use jiff::{Timestamp, Zoned};

use crate::app::App;
use crate::calculation::pipeline::{self, Filters};
use crate::calculation::report::{CatalogView, HomeContent, HomeView, Report, UsageView};
use crate::calculation::sorting::{PricingRow, pricing_table};
use crate::calculation::usage::{self, CountBounds, MAX_CHART_MODELS};
use crate::cli::{Commands, ConfigCommand, ModelsArgs, SourceArgs, UsageArgs};
use crate::config::popular_models::DEMO_USAGE_MODELS;
use crate::io::dtos::{ApiOutcome, ModelBillingRecord};
use crate::prelude::*;

/// Runs the selected command and hands back what to print.
pub fn route(ctx: &mut App) -> AppResult<Report> {
    // Owned, so the arms are free to borrow ctx mutably.
    let command = ctx.cli.command.clone();

    let report = match command {
        // pricebook models.
        Commands::Models(args) => models(ctx, &args),

        // pricebook pricing.
        Commands::Pricing(args) => pricing(ctx, &args),

        // pricebook usage.
        Commands::Usage(args) => usage(ctx, &args)?,

        // pricebook account.
        Commands::Account => {
            ctx.cli.try_get_access_token()?;
            ctx.display.start("Retrieving");

            let user = ctx.client.user_self()?.into_result()?;

            Report::Account(user)
        }

        // pricebook home.
        Commands::Home => Report::Home(home(ctx)),

        // pricebook raw.
        Commands::Raw(SourceArgs { public }) => {
            ctx.display.start("Retrieving");

            let records = ctx.client.catalog("", public)?.into_result()?;

            // Server order, with the derived fields alongside.
            let rows: Vec<PricingRow> = records.into_iter().map(PricingRow::from).collect();

            let json = if ctx.cli.unformatted {
                serde_json::to_string(&rows).into_diagnostic()?
            } else {
                serde_json::to_string_pretty(&rows).into_diagnostic()?
            };

            Report::Raw(json)
        }

        // pricebook config.
        Commands::Config(command) => {
            let mut updated = ctx.preferences.clone();

            match command {
                ConfigCommand::Show => {}
                ConfigCommand::SetTheme { theme } => updated.theme = theme,
                ConfigCommand::SetLanguage { language } => updated.language = language,
            }

            ctx.update_preferences(updated)?;

            Report::Preferences {
                preferences: ctx.preferences.clone(),
                path: ctx.store.path().to_path_buf(),
            }
        }
    };

    Ok(report)
}

// private

/// Fetches the catalog, folding every failure into a message.
/// Views show an empty state instead of dying.
fn load_catalog(
    ctx: &mut App,
    search: &str,
    public: bool,
) -> Result<Vec<ModelBillingRecord>, String> {
    ctx.display.start("Retrieving");

    match ctx.client.catalog(search, public) {
        Ok(ApiOutcome::Success(records)) => {
            info!(count = records.len(), "catalog loaded");
            Ok(records)
        }
        Ok(ApiOutcome::Failure(message)) => {
            warn!(%message, "catalog request rejected");
            Err(message)
        }
        Err(report) => {
            warn!(error = %report, "catalog request failed");
            Err(report.to_string())
        }
    }
}

fn models(ctx: &mut App, args: &ModelsArgs) -> Report {
    let filters = Filters {
        category: args.category,
        billing: args.billing,
        search: args.search.clone(),
    };

    // The server filters by search already; filtering again locally keeps the
    // result right even when it ignores the parameter.
    let (records, error) = match load_catalog(ctx, &args.search, args.source.public) {
        Ok(records) => (pipeline::apply(records, &filters), None),
        Err(message) => (vec![], Some(message)),
    };

    Report::Catalog(CatalogView {
        records,
        filters,
        error,
    })
}

fn pricing(ctx: &mut App, args: &SourceArgs) -> Report {
    let records = load_catalog(ctx, "", args.public).unwrap_or_default();

    Report::Pricing(pricing_table(records))
}

fn usage(ctx: &mut App, args: &UsageArgs) -> AppResult<Report> {
    let range = args.try_parse_since()?;

    // A fresh draw per run unless pinned.
    let seed = args
        .seed
        .unwrap_or_else(|| Timestamp::now().as_nanosecond() as u64);

    // Anonymous visitors get the public catalog.
    let public = !ctx.client.has_token();

    let (names, bounds): (Vec<String>, CountBounds) = match load_catalog(ctx, "", public) {
        Ok(records) if !records.is_empty() => (
            records
                .into_iter()
                .take(MAX_CHART_MODELS)
                .map(|record| record.model)
                .collect(),
            CountBounds::for_range(range),
        ),
        Ok(_) => (demo_models(), CountBounds::for_range(range)),
        Err(_) => (demo_models(), CountBounds::FALLBACK),
    };

    let rows = usage::generate(&names, bounds, seed);
    let start_date = range.start_date(&Zoned::now())?;

    Ok(Report::Usage(UsageView {
        rows,
        range,
        start_date,
    }))
}

fn demo_models() -> Vec<String> {
    DEMO_USAGE_MODELS.iter().map(|name| name.to_string()).collect()
}

fn home(ctx: &mut App) -> HomeView {
    ctx.display.start("Retrieving");

    // Announcements are for visitors without an account.
    let (notice, notice_error) = if ctx.client.has_token() {
        (None, None)
    } else {
        match ctx.client.notice() {
            Ok(ApiOutcome::Success(notice)) => (Some(notice), None),
            Ok(ApiOutcome::Failure(message)) => (None, Some(message)),
            Err(report) => {
                warn!(error = %report, "notice request failed");
                (None, Some(report.to_string()))
            }
        }
    };

    ctx.display.update_text("Retrieving home page".to_owned());

    let content = match ctx.client.home_page_content() {
        Ok(ApiOutcome::Success(content)) => {
            let mut updated = ctx.preferences.clone();
            updated.home_page_content = Some(content.clone()).filter(|c| !c.is_empty());
            // The copy is only a fallback, so failing to keep it never hides
            // the page we just got.
            if let Err(report) = ctx.update_preferences(updated) {
                warn!(error = %report, "could not cache the home page");
            }

            HomeContent::from_server(content)
        }
        Ok(ApiOutcome::Failure(message)) => {
            info!(%message, "no custom home page");
            HomeContent::Default
        }
        Err(report) => {
            warn!(error = %report, "home page request failed, using the last copy");
            ctx.preferences
                .home_page_content
                .clone()
                .map(HomeContent::from_server)
                .unwrap_or(HomeContent::Default)
        }
    };

    HomeView {
        notice,
        notice_error,
        content,
    }
}
