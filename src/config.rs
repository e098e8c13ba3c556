//! Runtime configuration read from the environment (and `.env`)

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::query::PageSize;

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_MERCHANT: &str = "MCH-00001";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: Url,
    pub request_timeout: Duration,
    /// Merchant whose transactions are shown first
    pub default_merchant_id: String,
    pub page_size: PageSize,
    pub export_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let raw_url = var("DASHBOARD_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_base_url = Url::parse(raw_url.trim()).map_err(|e| ConfigError::InvalidValue {
            var: "DASHBOARD_API_BASE_URL",
            reason: e.to_string(),
        })?;
        if api_base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                var: "DASHBOARD_API_BASE_URL",
                reason: format!("{} cannot be used as a base URL", api_base_url),
            });
        }

        let timeout_ms = match var("DASHBOARD_API_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                var: "DASHBOARD_API_TIMEOUT_MS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let page_size = match var("DASHBOARD_PAGE_SIZE") {
            Some(raw) => {
                let size = raw.trim().parse::<u32>().map_err(|e| ConfigError::InvalidValue {
                    var: "DASHBOARD_PAGE_SIZE",
                    reason: e.to_string(),
                })?;
                PageSize::try_from(size).map_err(|e| ConfigError::InvalidValue {
                    var: "DASHBOARD_PAGE_SIZE",
                    reason: e.to_string(),
                })?
            }
            None => PageSize::default(),
        };

        let default_merchant_id = var("DASHBOARD_DEFAULT_MERCHANT")
            .map(|id| id.trim().to_uppercase())
            .unwrap_or_else(|| DEFAULT_MERCHANT.to_string());

        let export_dir = var("DASHBOARD_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Config {
            api_base_url,
            request_timeout: Duration::from_millis(timeout_ms),
            default_merchant_id,
            page_size,
            export_dir,
        })
    }
}
