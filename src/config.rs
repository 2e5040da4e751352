use std::{path::PathBuf, time::Duration};

use url::Url;

use crate::{error::SecretaryError, net};

pub const DEFAULT_API_BASE: &str = "http://10.0.2.2:4000/";
pub const DEFAULT_PLAID_BASE: &str = "https://sandbox.plaid.com/";
pub const DEFAULT_WEATHER_BASE: &str = "https://api.openweathermap.org/data/3.0/";
pub const DEFAULT_DATA_DIR: &str = ".secretary";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Absorbs the slow resolver on a freshly booted emulator.
    pub fn ai_backend() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }

    /// Plaid sandbox items answer PRODUCT_NOT_READY for a while after creation.
    pub fn transactions() -> Self {
        Self::new(10, Duration::from_millis(5000))
    }
}

#[derive(Debug, Clone)]
pub struct PlaidCredentials {
    pub client_id: String,
    pub secret: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: Url,
    pub backend_url: Option<Url>,
    pub plaid_base: Url,
    pub plaid: Option<PlaidCredentials>,
    pub weather_base: Url,
    pub weather_api_key: Option<String>,
    pub data_dir: PathBuf,
    pub ai_retry: RetryPolicy,
    pub transactions_retry: RetryPolicy,
}

pub fn load_env_files() {
    let _ = dotenvy::from_filename(".env");
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_u64(key: &str, raw: Option<String>) -> Result<Option<u64>, SecretaryError> {
    match non_empty(raw) {
        None => Ok(None),
        Some(v) => v
            .parse::<u64>()
            .map(Some)
            .map_err(|_| SecretaryError::Config(format!("{key} must be a number, got {v:?}"))),
    }
}

fn retry_override(
    base: RetryPolicy,
    attempts: Option<u64>,
    delay_ms: Option<u64>,
) -> RetryPolicy {
    let max_attempts = attempts
        .map(|a| u32::try_from(a).unwrap_or(u32::MAX))
        .unwrap_or(base.max_attempts);
    let delay = delay_ms.map(Duration::from_millis).unwrap_or(base.delay);
    RetryPolicy::new(max_attempts, delay)
}

impl AppConfig {
    pub fn from_env() -> Result<Self, SecretaryError> {
        load_env_files();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SecretaryError> {
        let api_base = net::parse_base_url(
            &non_empty(lookup("SECRETARY_API_BASE")).unwrap_or_else(|| DEFAULT_API_BASE.into()),
        )?;
        let backend_url = match non_empty(lookup("BACKEND_URL")) {
            None => None,
            Some(raw) => Some(
                Url::parse(&raw)
                    .map_err(|_| SecretaryError::Config(format!("invalid BACKEND_URL: {raw}")))?,
            ),
        };
        let plaid_base = net::parse_base_url(
            &non_empty(lookup("PLAID_BASE_URL")).unwrap_or_else(|| DEFAULT_PLAID_BASE.into()),
        )?;
        let plaid = match (
            non_empty(lookup("PLAID_CLIENT_ID")),
            non_empty(lookup("PLAID_SECRET")),
        ) {
            (Some(client_id), Some(secret)) => Some(PlaidCredentials { client_id, secret }),
            _ => None,
        };
        let weather_base = net::parse_base_url(
            &non_empty(lookup("OPENWEATHER_BASE_URL"))
                .unwrap_or_else(|| DEFAULT_WEATHER_BASE.into()),
        )?;
        let data_dir = non_empty(lookup("SECRETARY_DATA_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let ai_retry = retry_override(
            RetryPolicy::ai_backend(),
            parse_u64("SECRETARY_AI_RETRIES", lookup("SECRETARY_AI_RETRIES"))?,
            parse_u64("SECRETARY_AI_BACKOFF_MS", lookup("SECRETARY_AI_BACKOFF_MS"))?,
        );
        let transactions_retry = retry_override(
            RetryPolicy::transactions(),
            parse_u64("SECRETARY_TX_RETRIES", lookup("SECRETARY_TX_RETRIES"))?,
            parse_u64("SECRETARY_TX_DELAY_MS", lookup("SECRETARY_TX_DELAY_MS"))?,
        );

        Ok(Self {
            api_base,
            backend_url,
            plaid_base,
            plaid,
            weather_base,
            weather_api_key: non_empty(lookup("OPENWEATHERMAP_API_KEY")),
            data_dir,
            ai_retry,
            transactions_retry,
        })
    }

    pub fn cache_db_path(&self) -> PathBuf {
        self.data_dir.join("ai_response.db")
    }
}
