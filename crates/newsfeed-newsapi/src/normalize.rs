//! Normalization of raw NewsAPI articles into [`NewsRecord`]s.

use chrono::Local;
use newsfeed_core::NewsRecord;
use serde::Deserialize;
use serde_json::Value;

use crate::error::NormalizeError;
use crate::types::Article;

/// Content longer than this many characters is shortened.
const MAX_CONTENT_CHARS: usize = 200;
/// A sentence break must sit past this index to be used as the cut point.
const MIN_SENTENCE_CUT: usize = 100;
/// Hard-truncation length when no usable sentence break exists.
const HARD_CUT_CHARS: usize = 199;

/// Shortens article content that runs past 200 characters.
///
/// Short content is returned trimmed. Longer content is cut just after its
/// last `.` anywhere in the text, provided that period sits past index 100;
/// otherwise it is hard-truncated to 199 characters. A late period can leave
/// the result longer than 200 characters. Lengths count `char`s, not bytes.
#[must_use]
pub fn clean_content(raw: Option<&str>) -> String {
    let trimmed = raw.unwrap_or_default().trim();

    if trimmed.chars().count() <= MAX_CONTENT_CHARS {
        return trimmed.to_string();
    }

    let chars: Vec<char> = trimmed.chars().collect();
    match chars.iter().rposition(|&c| c == '.') {
        Some(idx) if idx > MIN_SENTENCE_CUT => chars[..=idx].iter().collect(),
        _ => chars[..HARD_CUT_CHARS].iter().collect(),
    }
}

/// Converts one raw article into a [`NewsRecord`].
///
/// Missing and `null` fields become empty strings. `processed_at` is stamped
/// with the current local time at the moment this article is handled.
///
/// # Errors
///
/// Returns [`NormalizeError::Shape`] if the value is not an object or a field
/// has the wrong JSON type (e.g. a numeric `title` or a string `source`).
pub fn normalize_article(index: usize, raw: &Value) -> Result<NewsRecord, NormalizeError> {
    let article =
        Article::deserialize(raw).map_err(|source| NormalizeError::Shape { index, source })?;

    let trimmed = |field: Option<String>| field.map(|s| s.trim().to_string()).unwrap_or_default();

    Ok(NewsRecord {
        news_title: trimmed(article.title),
        timestamp: article.published_at.unwrap_or_default(),
        url_source: article.url.unwrap_or_default(),
        content: clean_content(article.content.as_deref()),
        source: article
            .source
            .and_then(|s| s.name)
            .unwrap_or_default(),
        author: trimmed(article.author),
        url_to_image: article.url_to_image.unwrap_or_default(),
        processed_at: Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
    })
}

/// Normalizes a batch of raw articles, preserving order.
///
/// Articles that fail to normalize are logged and omitted; no placeholder is
/// emitted, so `N` inputs with `K` failures produce `N - K` records.
#[must_use]
pub fn normalize_articles(articles: &[Value]) -> Vec<NewsRecord> {
    tracing::info!(count = articles.len(), "normalizing articles");

    let mut records = Vec::with_capacity(articles.len());
    for (index, raw) in articles.iter().enumerate() {
        match normalize_article(index, raw) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping article that failed to normalize");
            }
        }
    }

    tracing::info!(
        processed = records.len(),
        skipped = articles.len() - records.len(),
        "normalized articles"
    );
    records
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
