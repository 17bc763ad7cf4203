//! Shared configuration, credential lookup, and the normalized record type
//! for the newsfeed pipeline.

pub mod app_config;
pub mod config;
pub mod credentials;
pub mod error;
pub mod record;

pub use app_config::{AppConfig, StorageBackend};
pub use config::{load_app_config, load_app_config_from_env};
pub use credentials::{get_api_key, EnvSecretStore, SecretStore, SecretStoreError};
pub use error::{ConfigError, CredentialError};
pub use record::{NewsRecord, RECORD_COLUMNS};
