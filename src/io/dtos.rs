use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::prelude::*;

/// One row of `/api/user/modelbilling` (or the public `/api/modelbilling`).
///
/// Every pricing field is optional. The server leaves them out when a model
/// has no configuration of that kind, and an explicit zero means something
/// different from a missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelBillingRecord {
    /// Model identifier, e.g. "gpt-4o".
    pub model: String,

    /// Input token price ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_ratio: Option<f64>,

    /// Output token price ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_completion_ratio: Option<f64>,

    /// Flat price per call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_ratio_2: Option<f64>,

    /// True when a per-call price is configured, even if it is zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_model_price: Option<bool>,
}

/// The parts of `/api/user/self` the account card shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserSelf {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub display_name: String,

    /// Billing group, e.g. "default" or "vip".
    #[serde(default)]
    pub group: String,

    /// Remaining quota, in platform units.
    #[serde(default)]
    pub quota: i64,

    #[serde(default)]
    pub used_quota: i64,

    #[serde(default)]
    pub request_count: i64,
}

/// The envelope every endpoint wraps its payload in.
/// `data` is kept untyped until the caller says what it expects.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub data: serde_json::Value,
}

/// A checked envelope: either the typed payload or the server's own message.
#[derive(Debug, PartialEq)]
pub enum ApiOutcome<T> {
    Success(T),
    Failure(String),
}

impl ApiEnvelope {
    /// Validates `data` against `T`. A logical failure (`success: false`) is not
    /// an error here, it comes back as `ApiOutcome::Failure`.
    pub fn into_outcome<T: DeserializeOwned>(self, endpoint: &str) -> AppResult<ApiOutcome<T>> {
        if !self.success {
            return Ok(ApiOutcome::Failure(self.message.unwrap_or_default()));
        }

        let data = serde_json::from_value::<T>(self.data).map_err(|e| Error::MalformedResponse {
            endpoint: endpoint.to_owned(),
            detail: e.to_string(),
        })?;

        Ok(ApiOutcome::Success(data))
    }
}

impl<T> ApiOutcome<T> {
    /// Collapses a logical failure into an `Error::Rejected`.
    pub fn into_result(self) -> AppResult<T> {
        match self {
            ApiOutcome::Success(data) => Ok(data),
            ApiOutcome::Failure(message) => Err(Error::Rejected(message).into()),
        }
    }
}

/// Parses a whole response body into a checked outcome.
pub fn parse_body<T: DeserializeOwned>(body: &str, endpoint: &str) -> AppResult<ApiOutcome<T>> {
    let envelope: ApiEnvelope =
        serde_json::from_str(body).map_err(|e| Error::MalformedResponse {
            endpoint: endpoint.to_owned(),
            detail: e.to_string(),
        })?;

    envelope.into_outcome(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "/api/user/modelbilling";

    #[test]
    fn catalog_rows_keep_missing_and_zero_apart() {
        let body = r#"{
            "success": true,
            "message": "",
            "data": [
                {"model": "gpt-4o", "model_ratio": 2.5, "model_completion_ratio": 4},
                {"model": "mj_imagine", "has_model_price": true, "model_ratio_2": 0},
                {"model": "bare-model", "model_ratio": null}
            ]
        }"#;

        let outcome = parse_body::<Vec<ModelBillingRecord>>(body, CATALOG).unwrap();
        let ApiOutcome::Success(records) = outcome else {
            panic!("expected success");
        };

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].model_completion_ratio, Some(4.0));
        assert_eq!(records[1].model_ratio_2, Some(0.0));
        assert_eq!(records[1].has_model_price, Some(true));
        assert_eq!(records[2], ModelBillingRecord {
            model: "bare-model".to_owned(),
            ..Default::default()
        });
    }

    #[test]
    fn logical_failure_carries_the_message() {
        let body = r#"{"success": false, "message": "无权进行此操作，未登录且未提供 access token"}"#;

        let outcome = parse_body::<Vec<ModelBillingRecord>>(body, CATALOG).unwrap();

        assert!(matches!(outcome, ApiOutcome::Failure(ref m) if m.contains("access token")));
        assert!(outcome.into_result().is_err());
    }

    #[test]
    fn non_array_data_is_malformed() {
        let body = r#"{"success": true, "data": {"model": "gpt-4o"}}"#;

        let err = parse_body::<Vec<ModelBillingRecord>>(body, CATALOG).unwrap_err();

        assert!(err.to_string().contains("Unexpected response shape"));
    }

    #[test]
    fn missing_data_is_malformed_for_a_list() {
        let body = r#"{"success": true}"#;

        assert!(parse_body::<Vec<ModelBillingRecord>>(body, CATALOG).is_err());
    }

    #[test]
    fn empty_catalog_is_fine() {
        let body = r#"{"success": true, "data": []}"#;

        let outcome = parse_body::<Vec<ModelBillingRecord>>(body, CATALOG).unwrap();

        assert_eq!(outcome, ApiOutcome::Success(vec![]));
    }

    #[test]
    fn account_fields_default_when_absent() {
        let body = r#"{"success": true, "message": "", "data": {"group": "vip", "quota": 1500000}}"#;

        let user = parse_body::<UserSelf>(body, "/api/user/self")
            .unwrap()
            .into_result()
            .unwrap();

        assert_eq!(user.group, "vip");
        assert_eq!(user.quota, 1_500_000);
        assert_eq!(user.username, "");
    }
}
