use async_trait::async_trait;

use crate::error::FetchError;
use crate::types::FetchResult;

/// Anything that can produce a batch of raw articles for a query.
///
/// [`crate::NewsApiClient`] is the production implementation; the pipeline
/// only sees this trait so tests can swap in a fake.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetches articles matching `query` published in the last `days_back` days.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on any transport, status, or decoding failure.
    async fn fetch(
        &self,
        api_key: &str,
        query: &str,
        days_back: u32,
    ) -> Result<FetchResult, FetchError>;
}
