//! Object-storage upload of finished record files.
//!
//! [`ObjectUploader`] is the seam the pipeline depends on. The production
//! implementation, [`ObjectStoreUploader`], resolves a bucket-scoped
//! [`ObjectStore`] per call from one of three backends.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use newsfeed_core::{AppConfig, StorageBackend};
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};

use crate::error::UploadError;

/// Uploads a local file to `bucket` under `destination`.
///
/// Succeeds or returns an error; there is no partial-success state.
#[async_trait]
pub trait ObjectUploader: Send + Sync {
    /// # Errors
    ///
    /// Returns [`UploadError`] if the file cannot be read or the store
    /// rejects the write.
    async fn upload(
        &self,
        bucket: &str,
        destination: &str,
        local_path: &Path,
    ) -> Result<(), UploadError>;
}

enum Backend {
    Gcs { service_account_path: Option<PathBuf> },
    Local { root: PathBuf },
    Fixed(Arc<dyn ObjectStore>),
}

/// [`ObjectUploader`] backed by the `object_store` crate.
pub struct ObjectStoreUploader {
    backend: Backend,
}

impl ObjectStoreUploader {
    /// Google Cloud Storage. Without an explicit service-account path the
    /// standard `GOOGLE_*` environment variables supply credentials.
    #[must_use]
    pub fn gcs(service_account_path: Option<PathBuf>) -> Self {
        Self {
            backend: Backend::Gcs {
                service_account_path,
            },
        }
    }

    /// A local directory; each bucket becomes a subdirectory of `root`.
    #[must_use]
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::Local { root: root.into() },
        }
    }

    /// One pre-built store used for every bucket name.
    #[must_use]
    pub fn with_store(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            backend: Backend::Fixed(store),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        tracing::info!(backend = %config.storage_backend, "configured object storage");
        match config.storage_backend {
            StorageBackend::Gcs => Self::gcs(config.google_service_account_path.clone()),
            StorageBackend::Local => Self::local(config.local_storage_root.clone()),
        }
    }

    fn store_for(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>, UploadError> {
        let backend_err = |source: object_store::Error| UploadError::Backend {
            bucket: bucket.to_string(),
            source,
        };

        match &self.backend {
            Backend::Gcs {
                service_account_path,
            } => {
                let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket);
                if let Some(path) = service_account_path {
                    builder = builder.with_service_account_path(path.to_string_lossy());
                }
                let store = builder.build().map_err(backend_err)?;
                Ok(Arc::new(store))
            }
            Backend::Local { root } => {
                let dir = root.join(bucket);
                std::fs::create_dir_all(&dir).map_err(|source| UploadError::Io {
                    path: dir.clone(),
                    source,
                })?;
                let store = LocalFileSystem::new_with_prefix(&dir).map_err(backend_err)?;
                Ok(Arc::new(store))
            }
            Backend::Fixed(store) => Ok(Arc::clone(store)),
        }
    }
}

#[async_trait]
impl ObjectUploader for ObjectStoreUploader {
    async fn upload(
        &self,
        bucket: &str,
        destination: &str,
        local_path: &Path,
    ) -> Result<(), UploadError> {
        tracing::info!(
            bucket,
            destination,
            local_path = %local_path.display(),
            "starting upload"
        );

        let result = async {
            let store = self.store_for(bucket)?;
            let bytes = tokio::fs::read(local_path)
                .await
                .map_err(|source| UploadError::Io {
                    path: local_path.to_path_buf(),
                    source,
                })?;
            let size = bytes.len();

            store
                .put(&ObjectPath::from(destination), PutPayload::from(bytes))
                .await
                .map_err(|source| UploadError::Store {
                    bucket: bucket.to_string(),
                    destination: destination.to_string(),
                    source,
                })?;
            Ok::<usize, UploadError>(size)
        }
        .await;

        match result {
            Ok(bytes) => {
                tracing::info!(bucket, destination, bytes, "upload complete");
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    bucket,
                    destination,
                    local_path = %local_path.display(),
                    error = %e,
                    "upload failed"
                );
                Err(e)
            }
        }
    }
}
