//! HTTP client for the NewsAPI `/v2/everything` search endpoint.
//!
//! Wraps `reqwest` with NewsAPI-specific status handling and query building.
//! Multi-page accumulation lives in [`fetch_all`].

mod fetch_all;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use newsfeed_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::FetchError;
use crate::source::ArticleSource;
use crate::types::{FetchResult, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/";
const EVERYTHING_PATH: &str = "v2/everything";

/// Articles requested per page. NewsAPI's maximum.
pub const PAGE_SIZE: usize = 100;

/// Client for the NewsAPI search endpoint.
///
/// Use [`NewsApiClient::new`] for production or
/// [`NewsApiClient::with_base_url`] to point at a mock server in tests.
/// The API key is passed per call rather than stored.
pub struct NewsApiClient {
    client: Client,
    endpoint: Url,
    max_pages: u32,
}

impl NewsApiClient {
    /// Creates a client pointed at the production NewsAPI host.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, max_pages: u32) -> Result<Self, FetchError> {
        Self::with_base_url(timeout_secs, max_pages, DEFAULT_BASE_URL)
    }

    /// Creates a client from application settings.
    ///
    /// # Errors
    ///
    /// See [`NewsApiClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::with_base_url(
            config.request_timeout_secs,
            config.max_pages,
            &config.api_base_url,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// `max_pages` is clamped to at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`FetchError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        max_pages: u32,
        base_url: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("newsfeed/0.1 (news-ingest)")
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(EVERYTHING_PATH))
            .map_err(|e| FetchError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint,
            max_pages: max_pages.max(1),
        })
    }

    #[must_use]
    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Builds the request URL for one page with percent-encoded parameters.
    fn build_url(
        &self,
        api_key: &str,
        query: &str,
        from: NaiveDate,
        to: NaiveDate,
        page: u32,
    ) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            pairs.append_pair("from", &from.format("%Y-%m-%d").to_string());
            pairs.append_pair("to", &to.format("%Y-%m-%d").to_string());
            pairs.append_pair("sortBy", "popularity");
            pairs.append_pair("apiKey", api_key);
            pairs.append_pair("language", "en");
            pairs.append_pair("pageSize", &PAGE_SIZE.to_string());
            pairs.append_pair("page", &page.to_string());
        }
        url
    }

    /// Sends one page request and validates both HTTP and API status.
    ///
    /// The request URL carries the API key, so it is stripped from transport
    /// errors and never used as error context.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`] on network failure or timeout.
    /// - [`FetchError::UnexpectedStatus`] on a non-2xx status.
    /// - [`FetchError::Deserialize`] if the body is not the expected JSON.
    /// - [`FetchError::Api`] if `status` is not `"ok"`.
    async fn fetch_page(&self, url: Url, page: u32) -> Result<SearchResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http(e.without_url()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Http(e.without_url()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<SearchResponse>(&body)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or_else(|| "no error message".to_string());
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = serde_json::from_str::<SearchResponse>(&body).map_err(|e| {
            FetchError::Deserialize {
                context: format!("search page {page}"),
                source: e,
            }
        })?;

        if parsed.status.as_deref() != Some("ok") {
            let message = parsed
                .message
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(FetchError::Api(message));
        }

        Ok(parsed)
    }
}

#[async_trait]
impl ArticleSource for NewsApiClient {
    async fn fetch(
        &self,
        api_key: &str,
        query: &str,
        days_back: u32,
    ) -> Result<FetchResult, FetchError> {
        let (from, to) = date_window(Local::now().date_naive(), days_back);
        self.fetch_window(api_key, query, from, to).await
    }
}

/// Returns the inclusive `(from, to)` window ending on `today`.
#[must_use]
pub fn date_window(today: NaiveDate, days_back: u32) -> (NaiveDate, NaiveDate) {
    let from = today
        .checked_sub_days(Days::new(u64::from(days_back)))
        .unwrap_or(NaiveDate::MIN);
    (from, today)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
