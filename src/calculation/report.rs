use std::path::{Path, PathBuf};

use jiff::civil::Date;

use crate::calculation::billing::{self, BillingCategory};
use crate::calculation::classifier;
use crate::calculation::formatting::{
    compact_count, format_price, format_quota, format_token_ratio, group_thousands,
};
use crate::calculation::pipeline::Filters;
use crate::calculation::sorting::PricingRow;
use crate::calculation::usage::{TimeRange, UsageRow};
use crate::i18n::{Label, Language, billing_label, text};
use crate::io::dtos::{ModelBillingRecord, UserSelf};
use crate::io::preferences::Preferences;
use crate::prelude::*;

/// What the models command ended up with.
#[derive(Debug)]
pub struct CatalogView {
    pub records: Vec<ModelBillingRecord>,
    pub filters: Filters,
    /// Set when the fetch failed; `records` is empty then.
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct UsageView {
    pub rows: Vec<UsageRow>,
    pub range: TimeRange,
    pub start_date: Date,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeContent {
    /// A page to open instead of ours.
    Embed(String),
    Markdown(String),
    /// Nothing custom configured, show the built-in landing text.
    Default,
}

impl HomeContent {
    pub fn from_server(content: String) -> Self {
        if content.is_empty() {
            HomeContent::Default
        } else if content.starts_with("https://") {
            HomeContent::Embed(content)
        } else {
            HomeContent::Markdown(content)
        }
    }
}

#[derive(Debug)]
pub struct HomeView {
    pub notice: Option<String>,
    pub notice_error: Option<String>,
    pub content: HomeContent,
}

/// Everything a command can print.
#[derive(Debug)]
pub enum Report {
    Catalog(CatalogView),
    Pricing(Vec<PricingRow>),
    Usage(UsageView),
    Account(UserSelf),
    Home(HomeView),
    /// Raw JSON dump for the raw command.
    Raw(String),
    /// Saved preferences and the file they live in.
    Preferences {
        preferences: Preferences,
        path: PathBuf,
    },
}

impl Report {
    /// Renders the report into a string.
    /// - Tables become CSV rows without a header.
    /// - `no_format` drops labels and prints raw numbers.
    pub fn render(&self, no_format: bool, language: Language) -> AppResult<String> {
        match self {
            Report::Catalog(view) => render_catalog(view, no_format, language),
            Report::Pricing(rows) => render_pricing(rows, no_format, language),
            Report::Usage(view) => render_usage(view, no_format, language),
            Report::Account(user) => Ok(render_account(user, no_format, language)),
            Report::Home(view) => Ok(render_home(view, language)),
            Report::Raw(json) => Ok(json.clone()),
            Report::Preferences { preferences, path } => {
                render_preferences(preferences, path, no_format)
            }
        }
    }
}

// private

/// Left-to-right cells of one table line.
struct CsvRow<'a> {
    name: &'a str,
    cells: Vec<String>,
}

/// Serializes rows into a CSV string, no header.
fn to_csv<'a>(rows: impl IntoIterator<Item = CsvRow<'a>>) -> AppResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false) // I don't want a header.
        .flexible(true)
        .from_writer(vec![]);

    for row in rows {
        let mut record = vec![row.name.to_owned()];
        record.extend(row.cells);

        writer
            .write_record(&record)
            .into_diagnostic()
            .wrap_err("Failed to serialize row to CSV format")?;
    }

    let data = writer
        .into_inner()
        .into_diagnostic()
        .wrap_err("Failed to get writer data.")?;

    let csv_string = String::from_utf8(data)
        .into_diagnostic()
        .wrap_err("Invalid utf-8")?;

    Ok(csv_string)
}

/// "Input: 5/1M; Output: 15/1M", "0.02/call", or "No charge".
pub fn price_text(record: &ModelBillingRecord, language: Language) -> String {
    match billing::resolve(record) {
        BillingCategory::Free => text(Label::FreeHint, language).to_owned(),
        BillingCategory::PerCall => format!(
            "{}{}",
            format_price(record.model_ratio_2),
            text(Label::PerCallSuffix, language)
        ),
        BillingCategory::Token => {
            let per_million = text(Label::PerMillion, language);

            let parts: Vec<String> = [
                (Label::InputPrice, record.model_ratio),
                (Label::OutputPrice, record.model_completion_ratio),
            ]
            .into_iter()
            .filter_map(|(label, ratio)| {
                ratio.map(|ratio| {
                    format!(
                        "{}: {}{}",
                        text(label, language),
                        format_token_ratio(ratio),
                        per_million
                    )
                })
            })
            .collect();

            parts.join("; ")
        }
    }
}

fn raw_cells(record: &ModelBillingRecord) -> Vec<String> {
    let number = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();

    vec![
        format!("{:?}", billing::resolve(record)),
        number(record.model_ratio),
        number(record.model_completion_ratio),
        number(record.model_ratio_2),
    ]
}

fn render_catalog(view: &CatalogView, no_format: bool, language: Language) -> AppResult<String> {
    if view.records.is_empty() {
        return Ok(empty_catalog(view, language));
    }

    let rows = view.records.iter().map(|record| {
        let cells = if no_format {
            raw_cells(record)
        } else {
            vec![
                classifier::provider(&record.model).to_string(),
                billing_label(billing::resolve(record), language).to_owned(),
                price_text(record, language),
            ]
        };

        CsvRow {
            name: &record.model,
            cells,
        }
    });

    let table = to_csv(rows)?;

    if no_format {
        return Ok(table);
    }

    Ok(format!(
        "{}: {}\n{}\n\n{}",
        text(Label::FoundModels, language),
        view.records.len(),
        text(Label::PerCallTakesPrecedence, language),
        table
    ))
}

/// An empty catalog is a normal outcome, not an error.
fn empty_catalog(view: &CatalogView, language: Language) -> String {
    let mut lines = vec![];

    if let Some(error) = &view.error {
        lines.push(format!("{}: {}", text(Label::LoadFailed, language), error));
    }

    let (headline, hint) = if view.filters.is_narrowed() {
        (Label::NoMatchingModels, Label::AdjustFilters)
    } else {
        (Label::NoModelsAvailable, Label::TryLater)
    };

    lines.push(text(headline, language).to_owned());
    lines.push(text(hint, language).to_owned());

    lines.join("\n")
}

fn render_pricing(rows: &[PricingRow], no_format: bool, language: Language) -> AppResult<String> {
    if rows.is_empty() {
        let lines = [
            text(Label::NoModelsAvailable, language),
            text(Label::TryLater, language),
        ];
        return Ok(lines.join("\n"));
    }

    let csv_rows = rows.iter().map(|row| {
        let cells = if no_format {
            let mut cells = raw_cells(&row.record);
            cells.push(row.popular.to_string());
            cells
        } else {
            let popular = if row.popular {
                text(Label::Popular, language)
            } else {
                ""
            };

            vec![
                row.classification.provider.to_string(),
                row.classification.ui_category.to_string(),
                billing_label(row.billing, language).to_owned(),
                price_text(&row.record, language),
                popular.to_owned(),
            ]
        };

        CsvRow {
            name: &row.record.model,
            cells,
        }
    });

    to_csv(csv_rows)
}

fn render_usage(view: &UsageView, no_format: bool, language: Language) -> AppResult<String> {
    let rows = view.rows.iter().map(|row| {
        let cells = if no_format {
            vec![row.count.to_string()]
        } else {
            vec![
                compact_count(row.count, language),
                format!(
                    "{} {}",
                    group_thousands(row.count, language),
                    text(Label::Calls, language)
                ),
                format!("{:.1}%", row.share * 100.0),
            ]
        };

        CsvRow {
            name: &row.model,
            cells,
        }
    });

    let table = to_csv(rows)?;

    if no_format {
        return Ok(table);
    }

    // example: Model usage (demo data) 7d, 2025-08-04..
    Ok(format!(
        "{} ({}) {}d, {}..\n\n{}",
        text(Label::UsageTitle, language),
        text(Label::UsageDisclaimer, language),
        view.range.days(),
        view.start_date,
        table
    ))
}

fn render_account(user: &UserSelf, no_format: bool, language: Language) -> String {
    if no_format {
        return format!("{},{}", user.group, user.quota);
    }

    let group = if user.group.is_empty() {
        text(Label::DefaultGroup, language)
    } else {
        user.group.as_str()
    };

    let mut lines = vec![];

    if !user.display_name.is_empty() || !user.username.is_empty() {
        let name = if user.display_name.is_empty() {
            &user.username
        } else {
            &user.display_name
        };
        lines.push(name.to_owned());
    }

    lines.push(format!("{}: {}", text(Label::Group, language), group));
    lines.push(format!(
        "{}: {}",
        text(Label::Balance, language),
        format_quota(user.quota)
    ));

    lines.join("\n")
}

fn render_home(view: &HomeView, language: Language) -> String {
    let mut blocks = vec![];

    match (&view.notice, &view.notice_error) {
        (Some(notice), _) if !notice.is_empty() => {
            blocks.push(format!("[{}]\n{}", text(Label::Notice, language), notice));
        }
        (_, Some(error)) => {
            blocks.push(format!("{}: {}", text(Label::NoticeLoadFailed, language), error));
        }
        _ => {}
    }

    let body = match &view.content {
        HomeContent::Embed(url) => format!("embed: {url}"),
        HomeContent::Markdown(markdown) => markdown.clone(),
        HomeContent::Default => format!(
            "{}\n{}",
            text(Label::HomeTitle, language),
            text(Label::HomeSubtitle, language)
        ),
    };
    blocks.push(body);

    blocks.join("\n\n")
}

fn render_preferences(
    preferences: &Preferences,
    path: &Path,
    no_format: bool,
) -> AppResult<String> {
    if no_format {
        return serde_json::to_string(preferences).into_diagnostic();
    }

    let json = serde_json::to_string_pretty(preferences).into_diagnostic()?;

    Ok(format!("{}\n{json}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::sorting::pricing_table;
    use crate::cli::BillingFilter;
    use crate::io::preferences::Theme;

    fn token(model: &str, input: Option<f64>, output: Option<f64>) -> ModelBillingRecord {
        ModelBillingRecord {
            model: model.to_owned(),
            model_ratio: input,
            model_completion_ratio: output,
            ..Default::default()
        }
    }

    #[test]
    fn price_text_by_category() {
        let per_call = ModelBillingRecord {
            model: "mj_imagine".to_owned(),
            has_model_price: Some(true),
            model_ratio_2: Some(0.100000),
            ..Default::default()
        };

        assert_eq!(price_text(&per_call, Language::En), "0.1/call");
        assert_eq!(
            price_text(&token("gpt-4o", Some(1.25), Some(5.0)), Language::En),
            "Input: 2.5/1M; Output: 10/1M"
        );
        assert_eq!(
            price_text(&token("gpt-4o", None, Some(5.0)), Language::Zh),
            "输出: 10/1M"
        );
        assert_eq!(
            price_text(&token("free-model", None, None), Language::Zh),
            "无需付费"
        );
    }

    #[test]
    fn catalog_lists_rows() {
        let view = CatalogView {
            records: vec![token("gpt-4o", Some(1.25), Some(5.0))],
            filters: Filters::default(),
            error: None,
        };

        let output = Report::Catalog(view).render(false, Language::En).unwrap();

        assert!(output.starts_with("Models found: 1\n"));
        assert!(output.contains("gpt-4o,OpenAI,Per token,Input: 2.5/1M; Output: 10/1M\n"));
    }

    #[test]
    fn catalog_unformatted_is_plain_csv() {
        let view = CatalogView {
            records: vec![token("gpt-4o", Some(1.25), None)],
            filters: Filters::default(),
            error: None,
        };

        let output = Report::Catalog(view).render(true, Language::En).unwrap();

        assert_eq!(output, "gpt-4o,Token,1.25,,\n");
    }

    #[test]
    fn empty_catalog_states() {
        let unfiltered = CatalogView {
            records: vec![],
            filters: Filters::default(),
            error: None,
        };
        let output = Report::Catalog(unfiltered).render(false, Language::En).unwrap();
        assert_eq!(
            output,
            "No models available\nPlease try again later or contact the administrator"
        );

        let narrowed = CatalogView {
            records: vec![],
            filters: Filters {
                billing: BillingFilter::Free,
                ..Default::default()
            },
            error: Some("connection refused".to_owned()),
        };
        let output = Report::Catalog(narrowed).render(false, Language::Zh).unwrap();
        assert_eq!(
            output,
            "加载失败: connection refused\n没有找到匹配的模型\n请尝试调整搜索条件或筛选器"
        );
    }

    #[test]
    fn pricing_marks_popular_rows() {
        let rows = pricing_table(vec![
            token("qwen-max", Some(1.0), Some(3.0)),
            token("gpt-4o", Some(1.25), Some(5.0)),
        ]);

        let output = Report::Pricing(rows).render(false, Language::En).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "gpt-4o,OpenAI,OpenAI,Per token,Input: 2.5/1M; Output: 10/1M,Popular"
        );
        assert!(lines[1].starts_with("qwen-max,Alibaba,Other,"));
        assert!(lines[1].ends_with(','));
    }

    #[test]
    fn usage_rows() {
        let view = UsageView {
            rows: vec![UsageRow {
                model: "gemini-2.5-pro".to_owned(),
                count: 123_456,
                share: 1.0,
            }],
            range: TimeRange::Week,
            start_date: jiff::civil::date(2025, 8, 4),
        };

        let output = Report::Usage(view).render(false, Language::Zh).unwrap();

        assert!(output.contains("2025-08-04"));
        assert!(output.contains("gemini-2.5-pro,12万+,\"123,456 次调用\",100.0%"));
    }

    #[test]
    fn account_card() {
        let user = UserSelf {
            username: "alice".to_owned(),
            group: String::new(),
            quota: 1_000_000,
            ..Default::default()
        };

        let output = Report::Account(user).render(false, Language::En).unwrap();

        assert_eq!(output, "alice\nGroup: default\nBalance: $2.00");
    }

    #[test]
    fn home_content_kinds() {
        assert_eq!(
            HomeContent::from_server("https://example.com".to_owned()),
            HomeContent::Embed("https://example.com".to_owned())
        );
        assert_eq!(
            HomeContent::from_server("# Welcome".to_owned()),
            HomeContent::Markdown("# Welcome".to_owned())
        );
        assert_eq!(HomeContent::from_server(String::new()), HomeContent::Default);

        // Plain http is not embedded.
        assert!(matches!(
            HomeContent::from_server("http://example.com".to_owned()),
            HomeContent::Markdown(_)
        ));
    }

    #[test]
    fn home_with_notice() {
        let view = HomeView {
            notice: Some("maintenance tonight".to_owned()),
            notice_error: None,
            content: HomeContent::Default,
        };

        let output = Report::Home(view).render(false, Language::En).unwrap();

        assert_eq!(
            output,
            "[Notice]\nmaintenance tonight\n\nAI Aggregation Platform\nOne-stop AI service integration platform"
        );
    }

    #[test]
    fn preferences_as_json() {
        let preferences = Preferences {
            theme: Theme::Dark,
            language: Language::Zh,
            home_page_content: None,
        };

        let report = Report::Preferences {
            preferences,
            path: PathBuf::from("/tmp/pricebook/preferences.json"),
        };

        let output = report.render(true, Language::Zh).unwrap();

        assert_eq!(output, r#"{"theme":"dark","language":"zh"}"#);
    }

    #[test]
    fn preferences_name_their_file() {
        let report = Report::Preferences {
            preferences: Preferences {
                theme: Theme::Light,
                language: Language::En,
                home_page_content: None,
            },
            path: PathBuf::from("/tmp/pricebook/preferences.json"),
        };

        let output = report.render(false, Language::En).unwrap();

        assert_eq!(
            output,
            "/tmp/pricebook/preferences.json\n{\n  \"theme\": \"light\",\n  \"language\": \"en\"\n}"
        );
    }
}
