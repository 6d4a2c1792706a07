use crate::io::dtos::ModelBillingRecord;
use crate::prelude::*;

/// How a model is charged. Exactly one applies per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BillingCategory {
    PerCall,
    Free,
    Token,
}

/// Picks the billing category of a record.
///
/// A configured per-call price always wins over token ratios, and a configured
/// price of zero means free, not "fall through to token pricing".
pub fn resolve(record: &ModelBillingRecord) -> BillingCategory {
    if record.has_model_price.unwrap_or(false) {
        return match record.model_ratio_2 {
            Some(price) if price > 0.0 => BillingCategory::PerCall,
            _ => BillingCategory::Free,
        };
    }

    if record.model_ratio.is_some() || record.model_completion_ratio.is_some() {
        return BillingCategory::Token;
    }

    BillingCategory::Free
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        has_model_price: Option<bool>,
        model_ratio_2: Option<f64>,
        model_ratio: Option<f64>,
        model_completion_ratio: Option<f64>,
    ) -> ModelBillingRecord {
        ModelBillingRecord {
            model: "m".to_owned(),
            model_ratio,
            model_completion_ratio,
            model_ratio_2,
            has_model_price,
        }
    }

    #[test]
    fn zero_price_is_free_even_with_token_ratios() {
        let r = record(Some(true), Some(0.0), Some(10.0), Some(30.0));

        assert_eq!(resolve(&r), BillingCategory::Free);
    }

    #[test]
    fn positive_price_is_per_call_regardless_of_ratios() {
        assert_eq!(
            resolve(&record(Some(true), Some(0.5), Some(10.0), None)),
            BillingCategory::PerCall
        );
        assert_eq!(
            resolve(&record(Some(true), Some(0.02), None, None)),
            BillingCategory::PerCall
        );
    }

    #[test]
    fn configured_price_without_a_value_is_free() {
        assert_eq!(
            resolve(&record(Some(true), None, Some(1.0), None)),
            BillingCategory::Free
        );
    }

    #[test]
    fn either_ratio_means_token() {
        assert_eq!(
            resolve(&record(None, None, Some(0.0), None)),
            BillingCategory::Token
        );
        assert_eq!(
            resolve(&record(Some(false), Some(3.0), None, Some(2.0))),
            BillingCategory::Token
        );
    }

    #[test]
    fn nothing_configured_is_free() {
        assert_eq!(resolve(&record(None, None, None, None)), BillingCategory::Free);
        assert_eq!(
            resolve(&record(Some(false), Some(3.0), None, None)),
            BillingCategory::Free
        );
    }
}
