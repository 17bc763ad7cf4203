use chrono::NaiveDateTime;

/// Builds `news_data_<query>_<YYYYMMDD_HHMMSS>.parquet`.
///
/// Characters other than ASCII alphanumerics, `-`, `_` and `.` in the query
/// become `_` so the name is always a single path segment.
#[must_use]
pub fn output_filename(query: &str, at: NaiveDateTime) -> String {
    let safe_query: String = query
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "news_data_{safe_query}_{}.parquet",
        at.format("%Y%m%d_%H%M%S")
    )
}

/// Joins `prefix` and `filename` into an object key. An empty prefix puts the
/// object at the bucket root.
#[must_use]
pub fn object_key(prefix: &str, filename: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        filename.to_string()
    } else {
        format!("{prefix}/{filename}")
    }
}

/// `scheme://bucket/key`.
#[must_use]
pub fn storage_uri(scheme: &str, bucket: &str, key: &str) -> String {
    format!("{scheme}://{bucket}/{key}")
}
