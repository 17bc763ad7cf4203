//! Multi-page fetch loop for `NewsApiClient`.

use chrono::NaiveDate;

use crate::error::FetchError;
use crate::types::FetchResult;

use super::{NewsApiClient, PAGE_SIZE};

impl NewsApiClient {
    /// Fetches articles for `query` published between `from` and `to`
    /// (inclusive), following pages until a halting condition fires.
    ///
    /// Halting conditions, checked after each page in this order:
    ///
    /// 1. the page returned no articles;
    /// 2. the accumulated count reached page 1's `totalResults`;
    /// 3. the page returned fewer than [`PAGE_SIZE`] articles;
    /// 4. `max_pages` pages have been requested.
    ///
    /// With the default `max_pages` of 1 exactly one request is made.
    ///
    /// **All-or-nothing**: a failure on any page discards what earlier pages
    /// returned.
    ///
    /// # Errors
    ///
    /// Propagates any [`FetchError`] from the page request.
    pub async fn fetch_window(
        &self,
        api_key: &str,
        query: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<FetchResult, FetchError> {
        tracing::info!(query, %from, %to, max_pages = self.max_pages, "fetching news");

        let mut articles = Vec::new();
        let mut total_results = 0usize;
        let mut page = 1u32;

        loop {
            tracing::debug!(query, page, "fetching page");

            let url = self.build_url(api_key, query, from, to, page);
            let response = match self.fetch_page(url, page).await {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!(query, page, error = %e, "search API request failed");
                    return Err(e);
                }
            };

            let page_articles = response.articles.unwrap_or_default();
            if page_articles.is_empty() {
                tracing::info!(query, page, "no more articles");
                break;
            }

            let page_len = page_articles.len();
            articles.extend(page_articles);

            if page == 1 {
                total_results = response
                    .total_results
                    .map_or(0, |n| usize::try_from(n).unwrap_or(usize::MAX));
                tracing::info!(query, total_results, "total articles available");
            }

            if articles.len() >= total_results {
                tracing::info!(query, total_results, "fetched all available articles");
                break;
            }

            if page_len < PAGE_SIZE {
                tracing::info!(query, page, page_len, "last page reached");
                break;
            }

            if page >= self.max_pages {
                tracing::info!(
                    query,
                    max_pages = self.max_pages,
                    fetched = articles.len(),
                    total_results,
                    "page cap reached"
                );
                break;
            }

            page += 1;
        }

        tracing::info!(
            query,
            count = articles.len(),
            pages = page,
            "fetched articles"
        );

        Ok(FetchResult {
            status: "ok".to_string(),
            total_results: articles.len(),
            articles,
            pages: page,
        })
    }
}
