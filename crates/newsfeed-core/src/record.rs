/// Column names of the normalized record set, in on-disk order.
pub const RECORD_COLUMNS: [&str; 8] = [
    "newsTitle",
    "timestamp",
    "url_source",
    "content",
    "source",
    "author",
    "urlToImage",
    "processed_at",
];

/// One normalized article, ready for the columnar writer.
///
/// Every field is a plain string; absent upstream values become `""`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewsRecord {
    pub news_title: String,
    /// `publishedAt` exactly as the API sent it.
    pub timestamp: String,
    pub url_source: String,
    pub content: String,
    pub source: String,
    pub author: String,
    pub url_to_image: String,
    /// Local time the record was normalized, ISO-8601 with microseconds.
    pub processed_at: String,
}
