use std::path::PathBuf;

/// Where uploaded Parquet files end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Google Cloud Storage, credentials from the standard Google env vars.
    Gcs,
    /// A local directory tree with one subdirectory per bucket.
    Local,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Gcs => write!(f, "gcs"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Name of the secret holding the search-API key.
    pub api_key_var: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Upper bound on pages requested per fetch. `1` keeps single-page runs.
    pub max_pages: u32,
    pub output_dir: PathBuf,
    pub bucket: String,
    pub prefix: String,
    pub storage_backend: StorageBackend,
    pub local_storage_root: PathBuf,
    pub google_service_account_path: Option<PathBuf>,
    pub default_query: String,
    pub default_days_back: u32,
    pub schedule_cron: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("api_key_var", &self.api_key_var)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_pages", &self.max_pages)
            .field("output_dir", &self.output_dir)
            .field("bucket", &self.bucket)
            .field("prefix", &self.prefix)
            .field("storage_backend", &self.storage_backend)
            .field("local_storage_root", &self.local_storage_root)
            .field(
                "google_service_account_path",
                &self.google_service_account_path.as_ref().map(|_| "[redacted]"),
            )
            .field("default_query", &self.default_query)
            .field("default_days_back", &self.default_days_back)
            .field("schedule_cron", &self.schedule_cron)
            .finish()
    }
}
