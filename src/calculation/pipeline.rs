use crate::calculation::billing::{self, BillingCategory};
use crate::calculation::classifier::{self, UiCategory};
use crate::cli::{BillingFilter, CategoryFilter};
use crate::io::dtos::ModelBillingRecord;

/// What the user narrowed the catalog down to.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub category: CategoryFilter,
    pub billing: BillingFilter,
    pub search: String,
}

impl Filters {
    /// Whether anything beyond "show me everything" is in effect.
    /// Picks which empty state to show.
    pub fn is_narrowed(&self) -> bool {
        !self.search.is_empty()
            || self.category != CategoryFilter::All
            || self.billing != BillingFilter::All
    }
}

/// Category, then billing, then search. Input order is preserved.
pub fn apply(records: Vec<ModelBillingRecord>, filters: &Filters) -> Vec<ModelBillingRecord> {
    let needle = filters.search.to_lowercase();

    records
        .into_iter()
        .filter(|record| matches_category(record, filters.category))
        .filter(|record| matches_billing(record, filters.billing))
        .filter(|record| matches_search(record, &needle))
        .collect()
}

pub fn matches_category(record: &ModelBillingRecord, filter: CategoryFilter) -> bool {
    let wanted = match filter {
        CategoryFilter::All => return true,
        CategoryFilter::Gemini => UiCategory::Gemini,
        CategoryFilter::OpenAI => UiCategory::OpenAI,
        CategoryFilter::AnthropicClaude => UiCategory::Claude,
        CategoryFilter::XAi => UiCategory::XAi,
        CategoryFilter::DeepSeek => UiCategory::DeepSeek,
        CategoryFilter::Other => UiCategory::Other,
    };

    classifier::ui_category(&record.model) == wanted
}

pub fn matches_billing(record: &ModelBillingRecord, filter: BillingFilter) -> bool {
    let wanted = match filter {
        BillingFilter::All => return true,
        BillingFilter::PerCall => BillingCategory::PerCall,
        BillingFilter::Free => BillingCategory::Free,
        BillingFilter::Token => BillingCategory::Token,
    };

    billing::resolve(record) == wanted
}

/// `needle` must already be lower-cased.
fn matches_search(record: &ModelBillingRecord, needle: &str) -> bool {
    needle.is_empty() || record.model.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(model: &str, input: f64, output: f64) -> ModelBillingRecord {
        ModelBillingRecord {
            model: model.to_owned(),
            model_ratio: Some(input),
            model_completion_ratio: Some(output),
            ..Default::default()
        }
    }

    fn per_call(model: &str, price: f64) -> ModelBillingRecord {
        ModelBillingRecord {
            model: model.to_owned(),
            has_model_price: Some(true),
            model_ratio_2: Some(price),
            ..Default::default()
        }
    }

    fn names(records: &[ModelBillingRecord]) -> Vec<&str> {
        records.iter().map(|r| r.model.as_str()).collect()
    }

    #[test]
    fn per_call_filter_picks_the_priced_model() {
        let records = vec![token("gpt-4o", 10.0, 30.0), per_call("claude-3-haiku", 0.5)];
        let filters = Filters {
            billing: BillingFilter::PerCall,
            ..Default::default()
        };

        let visible = apply(records, &filters);

        assert_eq!(names(&visible), vec!["claude-3-haiku"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let records = vec![token("GPT-4O", 1.0, 1.0), token("claude-3-haiku", 1.0, 1.0)];
        let filters = Filters {
            search: "gpt".to_owned(),
            ..Default::default()
        };

        assert_eq!(names(&apply(records.clone(), &filters)), vec!["GPT-4O"]);

        let shouting = Filters {
            search: "CLAUDE".to_owned(),
            ..Default::default()
        };
        assert_eq!(names(&apply(records, &shouting)), vec!["claude-3-haiku"]);
    }

    #[test]
    fn filters_compose_and_keep_order() {
        let records = vec![
            token("gemini-2.5-pro", 1.25, 5.0),
            per_call("gemini-2.0-flash-exp", 0.0),
            token("gpt-4o", 2.5, 10.0),
            token("gemini-2.5-flash", 0.15, 0.6),
        ];
        let filters = Filters {
            category: CategoryFilter::Gemini,
            billing: BillingFilter::Token,
            search: String::new(),
        };

        let visible = apply(records, &filters);

        assert_eq!(names(&visible), vec!["gemini-2.5-pro", "gemini-2.5-flash"]);
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let records = vec![
            token("deepseek-chat", 1.0, 2.0),
            per_call("mj_imagine", 0.1),
            token("qwen-max", 1.0, 3.0),
            per_call("deepseek-free", 0.0),
        ];
        let filters = Filters {
            category: CategoryFilter::DeepSeek,
            billing: BillingFilter::All,
            search: "deep".to_owned(),
        };

        let once = apply(records, &filters);
        let twice = apply(once.clone(), &filters);

        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn other_tab_excludes_every_named_family() {
        let records = vec![
            token("qwen-max", 1.0, 1.0),
            token("grok-3", 1.0, 1.0),
            token("o4-mini", 1.0, 1.0),
            token("glm-4", 1.0, 1.0),
        ];
        let filters = Filters {
            category: CategoryFilter::Other,
            ..Default::default()
        };

        assert_eq!(names(&apply(records, &filters)), vec!["qwen-max", "glm-4"]);
    }

    #[test]
    fn empty_in_empty_out() {
        let filters = Filters {
            search: "anything".to_owned(),
            ..Default::default()
        };

        assert!(apply(vec![], &filters).is_empty());
        assert!(filters.is_narrowed());
        assert!(!Filters::default().is_narrowed());
    }
}
