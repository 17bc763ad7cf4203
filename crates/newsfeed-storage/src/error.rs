use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// The writer reported success but nothing is at the target path.
    #[error("file {} was not created", path.display())]
    NotCreated { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("object store error uploading to {bucket}/{destination}: {source}")]
    Store {
        bucket: String,
        destination: String,
        #[source]
        source: object_store::Error,
    },

    #[error("cannot open bucket {bucket}: {source}")]
    Backend {
        bucket: String,
        #[source]
        source: object_store::Error,
    },
}
