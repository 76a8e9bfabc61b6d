use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::retry::RetryPolicy;
use crate::llm_client::InferenceSettings;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a number does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub inference_api_url: String,
    pub inference_client_id: String,
    pub inference_model: String,
    pub inference_timeout: Duration,
    pub inference_max_attempts: u32,
    pub inference_retry_base: Duration,
    pub templates_dir: String,
    pub catalog_cache_max_entries: usize,
    pub catalog_cache_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            inference_api_url: require_env("INFERENCE_API_URL")?,
            inference_client_id: env_or("INFERENCE_CLIENT_ID", "compliance-api"),
            inference_model: env_or("INFERENCE_MODEL", "pocketbook-general"),
            inference_timeout: Duration::from_secs(parse_env("INFERENCE_TIMEOUT_SECS", 30)?),
            inference_max_attempts: parse_env("INFERENCE_MAX_ATTEMPTS", 3)?,
            inference_retry_base: Duration::from_millis(parse_env("INFERENCE_RETRY_BASE_MS", 1000)?),
            templates_dir: env_or("TEMPLATES_DIR", "templates"),
            catalog_cache_max_entries: parse_env("CATALOG_CACHE_MAX_ENTRIES", 1000)?,
            catalog_cache_ttl: Duration::from_secs(parse_env("CATALOG_CACHE_TTL_SECS", 3600)?),
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn inference_settings(&self) -> InferenceSettings {
        InferenceSettings {
            base_url: self.inference_api_url.clone(),
            client_id: self.inference_client_id.clone(),
            model: self.inference_model.clone(),
            retry: RetryPolicy {
                max_attempts: self.inference_max_attempts.max(1),
                base_delay: self.inference_retry_base,
                attempt_timeout: self.inference_timeout,
            },
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} must be a valid number, got '{raw}'"))
}
