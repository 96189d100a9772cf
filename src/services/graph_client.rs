//! Graph API client for the ad-platform collaborator
//!
//! Read-only GET calls keyed by path, access token, field selection and date
//! window. Platform error payloads are surfaced as [`AdlensError::Api`] with
//! the upstream message verbatim (the UI displays it as-is); transport
//! failures stay distinguishable as [`AdlensError::Http`].

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::types::{
    AdlensError, DateWindow, Paged, RawAccount, RawAd, RawCampaign, Result,
};

/// Graph API version, kept in one place
pub const GRAPH_API_VERSION: &str = "v21.0";

const GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Insight fields requested for every entity level
const INSIGHT_FIELDS: &str =
    "spend,impressions,clicks,reach,frequency,ctr,cpm,cpc,actions,action_values";

const CAMPAIGN_PAGE_LIMIT: &str = "200";
const AD_PAGE_LIMIT: &str = "500";

/// Seam for the ad-platform collaborator; the loader depends on this trait
/// so orchestration can be tested without a network.
pub trait AdPlatform {
    /// Account metadata for a normalized (`act_`-prefixed) account id
    fn account(&self, account_id: &str) -> Result<RawAccount>;

    /// Campaign list with embedded insights for the date window
    fn campaigns(&self, account_id: &str, window: DateWindow) -> Result<Vec<RawCampaign>>;

    /// Ad list with embedded insights, ad set / campaign names and creative type
    fn ads(&self, account_id: &str, window: DateWindow) -> Result<Vec<RawAd>>;
}

/// Blocking Graph API client
#[derive(Debug)]
pub struct GraphClient {
    client: reqwest::blocking::Client,
    token: String,
    base_url: String,
}

impl GraphClient {
    /// Create a client. Fails with a validation error on an empty token,
    /// before any network call.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, GRAPH_BASE_URL)
    }

    /// Client against a custom base URL (used by tests and proxies)
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AdlensError::Validation("access token is required".into()));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            token: token.to_string(),
            base_url: format!("{}/{}", base_url.trim_end_matches('/'), GRAPH_API_VERSION),
        })
    }

    /// GET a path with the access token and extra query parameters, decode
    /// into `T` after checking for the platform error envelope.
    fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut query: Vec<(&str, &str)> = vec![("access_token", self.token.as_str())];
        query.extend_from_slice(params);

        let body: serde_json::Value = self.client.get(&url).query(&query).send()?.json()?;

        if let Some(message) = platform_error(&body) {
            return Err(AdlensError::Api(message));
        }

        serde_json::from_value(body).map_err(|e| AdlensError::Decode(e.to_string()))
    }

    /// `insights.date_preset(<window>){<fields>}` field selection
    fn insights_field(window: DateWindow) -> String {
        format!(
            "insights.date_preset({}){{{}}}",
            window.as_token(),
            INSIGHT_FIELDS
        )
    }
}

impl AdPlatform for GraphClient {
    fn account(&self, account_id: &str) -> Result<RawAccount> {
        self.get(
            &format!("/{}", account_id),
            &[("fields", "name,currency,account_status")],
        )
    }

    fn campaigns(&self, account_id: &str, window: DateWindow) -> Result<Vec<RawCampaign>> {
        let fields = format!("name,status,objective,{}", Self::insights_field(window));
        let page: Paged<RawCampaign> = self.get(
            &format!("/{}/campaigns", account_id),
            &[("fields", &fields), ("limit", CAMPAIGN_PAGE_LIMIT)],
        )?;
        Ok(page.data)
    }

    fn ads(&self, account_id: &str, window: DateWindow) -> Result<Vec<RawAd>> {
        let fields = format!(
            "name,status,adset_name,campaign{{name}},creative{{object_type}},{}",
            Self::insights_field(window)
        );
        let page: Paged<RawAd> = self.get(
            &format!("/{}/ads", account_id),
            &[("fields", &fields), ("limit", AD_PAGE_LIMIT)],
        )?;
        Ok(page.data)
    }
}

/// Extract the error message from a Graph error envelope, if present
fn platform_error(body: &serde_json::Value) -> Option<String> {
    body.pointer("/error/message")
        .and_then(|m| m.as_str())
        .map(String::from)
}
