use std::path::PathBuf;

use crate::app_config::{AppConfig, StorageBackend};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so only malformed values fail. Decoupled from
/// the real environment so it can be tested with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let value = or_default(var, default).trim().to_string();
        if value.is_empty() {
            return Err(invalid(var, "must not be empty".to_string()));
        }
        Ok(value)
    };

    let log_level = or_default("NEWSFEED_LOG_LEVEL", "info");
    let api_key_var = non_empty("NEWSFEED_API_KEY_VAR", "NEWS_API_KEY")?;
    let api_base_url = non_empty("NEWSFEED_API_BASE_URL", "https://newsapi.org/")?;

    let request_timeout_secs = parse_u64("NEWSFEED_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "NEWSFEED_REQUEST_TIMEOUT_SECS",
            "must be at least 1".to_string(),
        ));
    }

    let max_pages = parse_u32("NEWSFEED_MAX_PAGES", "1")?;
    if max_pages == 0 {
        return Err(invalid("NEWSFEED_MAX_PAGES", "must be at least 1".to_string()));
    }

    let output_dir = PathBuf::from(or_default("NEWSFEED_OUTPUT_DIR", "."));
    let bucket = non_empty("NEWSFEED_BUCKET", "snowflake-projects-test-gds")?;
    let prefix = or_default("NEWSFEED_PREFIX", "news_data_analysis")
        .trim_matches('/')
        .to_string();

    let storage_backend = parse_storage_backend(&or_default("NEWSFEED_STORAGE_BACKEND", "gcs"))
        .map_err(|reason| invalid("NEWSFEED_STORAGE_BACKEND", reason))?;
    let local_storage_root =
        PathBuf::from(or_default("NEWSFEED_LOCAL_STORAGE_ROOT", "./object-store"));
    let google_service_account_path = lookup("GOOGLE_SERVICE_ACCOUNT_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let default_query = non_empty("NEWSFEED_DEFAULT_QUERY", "technology")?;
    let default_days_back = parse_u32("NEWSFEED_DEFAULT_DAYS_BACK", "1")?;
    let schedule_cron = non_empty("NEWSFEED_SCHEDULE_CRON", "0 0 0 * * *")?;

    Ok(AppConfig {
        log_level,
        api_key_var,
        api_base_url,
        request_timeout_secs,
        max_pages,
        output_dir,
        bucket,
        prefix,
        storage_backend,
        local_storage_root,
        google_service_account_path,
        default_query,
        default_days_back,
        schedule_cron,
    })
}

fn parse_storage_backend(s: &str) -> Result<StorageBackend, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "gcs" => Ok(StorageBackend::Gcs),
        "local" => Ok(StorageBackend::Local),
        other => Err(format!("unknown storage backend '{other}' (expected gcs or local)")),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
