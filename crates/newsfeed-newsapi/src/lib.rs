//! NewsAPI search client and article normalization.
//!
//! [`NewsApiClient`] pages through the `/v2/everything` endpoint and returns
//! raw article JSON in a [`FetchResult`]. [`normalize_articles`] turns those
//! raw values into [`newsfeed_core::NewsRecord`]s, skipping any article that
//! cannot be decoded.

pub mod client;
pub mod error;
pub mod normalize;
pub mod source;
pub mod types;

pub use client::{NewsApiClient, PAGE_SIZE};
pub use error::{FetchError, NormalizeError};
pub use normalize::{clean_content, normalize_article, normalize_articles};
pub use source::ArticleSource;
pub use types::{Article, ArticleSourceRef, FetchResult, SearchResponse};
