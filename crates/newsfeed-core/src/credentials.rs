//! Search-API credential lookup.
//!
//! The key lives in an external key-value store. [`SecretStore`] abstracts
//! that store so the pipeline can run against the process environment in
//! production and an in-memory map in tests.

use std::collections::HashMap;

use thiserror::Error;

use crate::error::CredentialError;

/// Failure reported by a [`SecretStore`] backend.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SecretStoreError(pub String);

/// Key-value lookup of named string secrets.
pub trait SecretStore: Send + Sync {
    /// Returns `Ok(None)` when the name is not present.
    ///
    /// # Errors
    ///
    /// Returns [`SecretStoreError`] when the backend cannot answer.
    fn get(&self, name: &str) -> Result<Option<String>, SecretStoreError>;
}

/// Reads secrets from the process environment.
///
/// `.env` files are loaded by the binary at startup, not here.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretStore;

impl SecretStore for EnvSecretStore {
    fn get(&self, name: &str) -> Result<Option<String>, SecretStoreError> {
        match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e @ std::env::VarError::NotUnicode(_)) => {
                Err(SecretStoreError(format!("{name}: {e}")))
            }
        }
    }
}

impl SecretStore for HashMap<String, String> {
    fn get(&self, name: &str) -> Result<Option<String>, SecretStoreError> {
        Ok(HashMap::get(self, name).cloned())
    }
}

/// Fetches the search-API key named `name` and returns it trimmed.
///
/// No retries: a missing credential is fatal for the run.
///
/// # Errors
///
/// - [`CredentialError::Store`] if the store lookup fails.
/// - [`CredentialError::Missing`] if the name is not present.
/// - [`CredentialError::Blank`] if the value is empty or whitespace-only.
pub fn get_api_key(store: &dyn SecretStore, name: &str) -> Result<String, CredentialError> {
    let result = match store.get(name) {
        Err(source) => Err(CredentialError::Store {
            name: name.to_string(),
            source,
        }),
        Ok(None) => Err(CredentialError::Missing(name.to_string())),
        Ok(Some(value)) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(CredentialError::Blank(name.to_string()))
            } else {
                Ok(trimmed.to_string())
            }
        }
    };

    match &result {
        Ok(_) => tracing::info!(secret = name, "retrieved search API key"),
        Err(e) => tracing::error!(secret = name, error = %e, "failed to retrieve search API key"),
    }

    result
}
