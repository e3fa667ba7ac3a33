use coinquote_client::endp::cryptocompare::BASE_URL;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_LISTING_LIMIT: usize = 10;
pub const DEFAULT_LISTING_CURRENCY: &str = "USD";
pub const DEFAULT_NOTICE_MS: u64 = 3000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, found {value:?}")]
    NotPositive { key: &'static str, value: String },

    #[error("{key} must not be empty")]
    Empty { key: &'static str },
}

/// Runtime settings; every field has a default and can be overridden from the environment
/// (or a `.env` file).
///
/// | env                          | default                             |
/// |------------------------------|-------------------------------------|
/// | `COINQUOTE_API_URL`          | `https://min-api.cryptocompare.com` |
/// | `USER_AGENT`                 | `coinquote/<version>`               |
/// | `COINQUOTE_LIMIT`            | `10`                                |
/// | `COINQUOTE_LISTING_CURRENCY` | `USD`                               |
/// | `COINQUOTE_NOTICE_MS`        | `3000`                              |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub user_agent: String,
    pub listing_limit: usize,
    pub listing_currency: String,
    pub notice_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: BASE_URL.to_string(),
            user_agent: format!("coinquote/{}", env!("CARGO_PKG_VERSION")),
            listing_limit: DEFAULT_LISTING_LIMIT,
            listing_currency: DEFAULT_LISTING_CURRENCY.to_string(),
            notice_duration: Duration::from_millis(DEFAULT_NOTICE_MS),
        }
    }
}

impl Config {
    /// Read overrides with [`dotenv::var`], which also consults `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(api_url) = lookup("COINQUOTE_API_URL") {
            config.api_url = non_empty("COINQUOTE_API_URL", api_url)?;
        }
        if let Some(user_agent) = lookup("USER_AGENT") {
            config.user_agent = non_empty("USER_AGENT", user_agent)?;
        }
        if let Some(limit) = lookup("COINQUOTE_LIMIT") {
            config.listing_limit = positive("COINQUOTE_LIMIT", &limit)? as usize;
        }
        if let Some(currency) = lookup("COINQUOTE_LISTING_CURRENCY") {
            config.listing_currency = non_empty("COINQUOTE_LISTING_CURRENCY", currency)?;
        }
        if let Some(ms) = lookup("COINQUOTE_NOTICE_MS") {
            config.notice_duration = Duration::from_millis(positive("COINQUOTE_NOTICE_MS", &ms)?);
        }

        Ok(config)
    }
}

fn non_empty(key: &'static str, value: String) -> Result<String, ConfigError> {
    let value = value.trim().to_string();
    match value.is_empty() {
        true => Err(ConfigError::Empty { key }),
        false => Ok(value),
    }
}

fn positive(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::NotPositive {
            key,
            value: value.to_string(),
        }),
    }
}
