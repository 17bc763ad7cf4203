//! The ingest driver.
//!
//! One [`NewsPipeline::run`] resolves the API key, fetches articles for a
//! query, normalizes them, writes a Parquet file, uploads it and removes the
//! local copy. Every collaborator is injected so tests can swap in fakes.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use newsfeed_core::{get_api_key, AppConfig, SecretStore, StorageBackend};
use newsfeed_newsapi::{normalize_articles, ArticleSource};
use newsfeed_storage::{write_records, ObjectUploader};

use crate::error::PipelineError;
use crate::naming::{object_key, output_filename, storage_uri};

/// Where the pipeline writes and uploads.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Secret name the API key is looked up under.
    pub api_key_var: String,
    /// Directory for the temporary Parquet file.
    pub output_dir: PathBuf,
    pub bucket: String,
    pub prefix: String,
    /// URI scheme of the returned location (`gs` for Cloud Storage).
    pub uri_scheme: String,
}

impl PipelineSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let uri_scheme = match config.storage_backend {
            StorageBackend::Gcs => "gs",
            StorageBackend::Local => "file",
        };
        Self {
            api_key_var: config.api_key_var.clone(),
            output_dir: config.output_dir.clone(),
            bucket: config.bucket.clone(),
            prefix: config.prefix.clone(),
            uri_scheme: uri_scheme.to_string(),
        }
    }
}

pub struct NewsPipeline {
    secrets: Arc<dyn SecretStore>,
    source: Arc<dyn ArticleSource>,
    uploader: Arc<dyn ObjectUploader>,
    settings: PipelineSettings,
}

impl NewsPipeline {
    #[must_use]
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        source: Arc<dyn ArticleSource>,
        uploader: Arc<dyn ObjectUploader>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            secrets,
            source,
            uploader,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Runs one ingest for `query` over the last `days_back` days.
    ///
    /// Returns `Ok(Some(uri))` with the storage location of the uploaded
    /// file, or `Ok(None)` when the search produced nothing worth writing
    /// (no articles, or none that survived normalization).
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the credential is unavailable, the fetch
    /// fails, or the file cannot be written or uploaded. The failure is
    /// logged with the failing stage before it is returned.
    pub async fn run(&self, query: &str, days_back: u32) -> Result<Option<String>, PipelineError> {
        tracing::info!(query, days_back, "pipeline run starting");

        match self.run_stages(query, days_back).await {
            Ok(Some(uri)) => {
                tracing::info!(query, uri = %uri, "pipeline run complete");
                Ok(Some(uri))
            }
            Ok(None) => {
                tracing::info!(query, "pipeline run finished with nothing to upload");
                Ok(None)
            }
            Err(e) => {
                tracing::error!(query, days_back, stage = e.stage(), error = %e, "pipeline run failed");
                Err(e)
            }
        }
    }

    async fn run_stages(
        &self,
        query: &str,
        days_back: u32,
    ) -> Result<Option<String>, PipelineError> {
        let api_key = get_api_key(self.secrets.as_ref(), &self.settings.api_key_var)?;

        let fetched = self.source.fetch(&api_key, query, days_back).await?;
        if fetched.is_empty() {
            tracing::warn!(query, days_back, "no articles found");
            return Ok(None);
        }

        let records = normalize_articles(&fetched.articles);
        if records.is_empty() {
            tracing::warn!(
                query,
                fetched = fetched.articles.len(),
                "no articles survived normalization"
            );
            return Ok(None);
        }
        tracing::info!(
            query,
            fetched = fetched.articles.len(),
            kept = records.len(),
            "normalized articles"
        );

        let filename = output_filename(query, Local::now().naive_local());
        let local_path = self.settings.output_dir.join(&filename);
        let write_path = local_path.clone();
        tokio::task::spawn_blocking(move || write_records(&records, &write_path)).await??;

        let key = object_key(&self.settings.prefix, &filename);
        self.uploader
            .upload(&self.settings.bucket, &key, &local_path)
            .await?;

        if let Err(e) = tokio::fs::remove_file(&local_path).await {
            tracing::warn!(
                path = %local_path.display(),
                error = %e,
                "uploaded file could not be removed locally"
            );
        }

        Ok(Some(storage_uri(
            &self.settings.uri_scheme,
            &self.settings.bucket,
            &key,
        )))
    }
}
