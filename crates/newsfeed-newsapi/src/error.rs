use thiserror::Error;

/// Errors returned while fetching from the search API. All are fatal to a run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, timeout, or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("search API returned HTTP {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// The API answered 2xx but with `"status"` other than `"ok"`.
    #[error("search API error: {0}")]
    Api(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Per-article normalization failure. Logged and skipped, never fatal.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("article {index} has an unexpected shape: {source}")]
    Shape {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}
