use newsfeed_core::CredentialError;
use newsfeed_newsapi::FetchError;
use newsfeed_storage::{UploadError, WriteError};
use thiserror::Error;

/// Any failure that aborts a pipeline run.
///
/// Per-article normalization failures never reach this type; they are
/// skipped inside the normalizer.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("write error: {0}")]
    Write(#[from] WriteError),

    /// The blocking write task panicked or was cancelled.
    #[error("write task failed: {0}")]
    WriteTask(#[from] tokio::task::JoinError),

    #[error("upload error: {0}")]
    Upload(#[from] UploadError),
}

impl PipelineError {
    /// Short name of the stage that failed, for log fields.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Credential(_) => "credential",
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Write(_) | PipelineError::WriteTask(_) => "write",
            PipelineError::Upload(_) => "upload",
        }
    }
}
