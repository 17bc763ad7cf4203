use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised while resolving the search-API credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The backing store itself failed to answer the lookup.
    #[error("secret store lookup for {name} failed: {source}")]
    Store {
        name: String,
        #[source]
        source: crate::credentials::SecretStoreError,
    },

    #[error("{0} is not set in the secret store")]
    Missing(String),

    #[error("{0} is empty or whitespace-only")]
    Blank(String),
}
