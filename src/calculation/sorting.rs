use std::cmp::Ordering;

use itertools::Itertools;

use crate::calculation::billing::{self, BillingCategory};
use crate::calculation::classifier::{self, Classification};
use crate::calculation::usage::UsageRow;
use crate::config::popular_models::is_popular;
use crate::io::dtos::ModelBillingRecord;
use crate::prelude::*;

/// A catalog record plus everything the pricing table derives from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingRow {
    #[serde(flatten)]
    pub record: ModelBillingRecord,
    #[serde(flatten)]
    pub classification: Classification,
    pub billing: BillingCategory,
    pub popular: bool,
}

impl From<ModelBillingRecord> for PricingRow {
    fn from(record: ModelBillingRecord) -> Self {
        PricingRow {
            classification: classifier::classify(&record.model),
            billing: billing::resolve(&record),
            popular: is_popular(&record.model),
            record,
        }
    }
}

/// Pricing table order: popular models first, then by name.
pub fn pricing_table(records: Vec<ModelBillingRecord>) -> Vec<PricingRow> {
    records
        .into_iter()
        .map(PricingRow::from)
        .sorted_by(compare_pricing_rows)
        .collect()
}

pub fn compare_pricing_rows(a: &PricingRow, b: &PricingRow) -> Ordering {
    b.popular
        .cmp(&a.popular)
        .then_with(|| a.record.model.cmp(&b.record.model))
}

/// Usage chart order: Gemini first, then the busiest models.
/// Deliberately not the pricing table order.
pub fn sort_usage_rows(rows: &mut [UsageRow]) {
    rows.sort_by(|a, b| {
        let a_gemini = a.model.to_lowercase().contains("gemini");
        let b_gemini = b.model.to_lowercase().contains("gemini");

        b_gemini.cmp(&a_gemini).then_with(|| b.count.cmp(&a.count))
    });
}
