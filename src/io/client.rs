use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::io::dtos::{ApiOutcome, ModelBillingRecord, UserSelf, parse_body};
use crate::prelude::*;

const USER_CATALOG_ENDPOINT: &str = "/api/user/modelbilling";
const PUBLIC_CATALOG_ENDPOINT: &str = "/api/modelbilling";
const USER_SELF_ENDPOINT: &str = "/api/user/self";
const NOTICE_ENDPOINT: &str = "/api/notice";
const HOME_PAGE_CONTENT_ENDPOINT: &str = "/api/home_page_content";

/// Read-only client for the platform API.
///
/// One blocking request per call. No retries, no caching: a failure is
/// returned to the caller, who decides how to degrade.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, access_token: Option<&str>) -> Self {
        ApiClient {
            base_url: base_url.trim_end_matches('/').to_owned(),
            access_token: access_token.map(str::to_owned),
        }
    }

    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// The model catalog. `search` is passed to the server as is, empty means
    /// no filter. The public catalog takes no search parameter.
    pub fn catalog(
        &self,
        search: &str,
        public: bool,
    ) -> AppResult<ApiOutcome<Vec<ModelBillingRecord>>> {
        if public {
            return self.get(PUBLIC_CATALOG_ENDPOINT, &[]);
        }

        let query: Vec<(&str, &str)> = if search.is_empty() {
            vec![]
        } else {
            vec![("search", search)]
        };

        self.get(USER_CATALOG_ENDPOINT, &query)
    }

    pub fn user_self(&self) -> AppResult<ApiOutcome<UserSelf>> {
        self.get(USER_SELF_ENDPOINT, &[])
    }

    /// Announcement, in markdown.
    pub fn notice(&self) -> AppResult<ApiOutcome<String>> {
        self.get(NOTICE_ENDPOINT, &[])
    }

    /// Either markdown, or a URL to embed.
    pub fn home_page_content(&self) -> AppResult<ApiOutcome<String>> {
        self.get(HOME_PAGE_CONTENT_ENDPOINT, &[])
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> AppResult<ApiOutcome<T>> {
        let url = self.url_for(endpoint);

        debug!(%url, ?query, "GET");

        let request = ureq::get(&url);

        // optional token.
        let request = match &self.access_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        };

        let request = query
            .iter()
            .fold(request, |request, (key, value)| request.query(*key, *value));

        let transport = |e: ureq::Error| Error::Transport {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        };

        let body = request
            .call()
            .map_err(transport)?
            .body_mut()
            .read_to_string()
            .map_err(transport)?;

        parse_body(&body, endpoint)
    }
}
