//! NewsAPI response types.
//!
//! The page envelope is decoded eagerly, but individual articles stay as raw
//! [`serde_json::Value`]s until normalization so that one malformed article
//! cannot fail a whole page.

use serde::Deserialize;
use serde_json::Value;

/// One page from `/v2/everything`.
///
/// Every field is optional: error bodies carry only `status`, `code` and
/// `message`, and success bodies are not trusted to be complete either.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub status: Option<String>,
    pub total_results: Option<u64>,
    pub articles: Option<Vec<Value>>,
    pub code: Option<String>,
    pub message: Option<String>,
}

/// A decoded article. Any field may be missing or `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: Option<ArticleSourceRef>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

/// The nested `source` object of an article.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleSourceRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Articles accumulated over every page of one fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Always `"ok"`; failures are reported as errors instead.
    pub status: String,
    /// Number of articles accumulated (not the API's `totalResults`).
    pub total_results: usize,
    pub articles: Vec<Value>,
    /// Pages requested to build this result.
    pub pages: u32,
}

impl FetchResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
