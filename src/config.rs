//! Centralized configuration management for country-explorer

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result};

/// Regions offered by the filter form when `COUNTRY_REGIONS` is unset
pub const DEFAULT_REGIONS: [&str; 6] = ["Africa", "Americas", "Asia", "Europe", "Oceania", "Polar"];

/// Page sizes the table cycles through
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [10, 20, 30];

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the country directory API (without the `/api` prefix)
    pub api_base_url: String,
    /// Which API contract the server speaks
    pub api_revision: ApiRevision,
    /// Initial page size of the country table
    pub page_size: u32,
    /// Regions listed in the filter form dropdown
    pub regions: Vec<String>,
    /// Log file written by the TUI
    pub log_file: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// API contract revision spoken by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiRevision {
    /// Server-side filtering, sorting, and pagination
    #[default]
    Paged,
    /// Unpaginated table and filter-only search; paging happens locally
    Legacy,
}

impl std::str::FromStr for ApiRevision {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "paged" | "v2" => Ok(ApiRevision::Paged),
            "legacy" | "v1" => Ok(ApiRevision::Legacy),
            other => Err(anyhow::anyhow!(
                "Unknown API revision: {}. Supported: paged, legacy",
                other
            )),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "country-explorer/0.1.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".to_string(),
            api_revision: ApiRevision::default(),
            page_size: PAGE_SIZE_OPTIONS[0],
            regions: DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect(),
            log_file: PathBuf::from("country_explorer.log"),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let api_base_url = std::env::var("COUNTRY_API_BASE_URL")
            .unwrap_or(defaults.api_base_url);

        let api_revision = parse_env_var("COUNTRY_API_REVISION")?.unwrap_or_default();

        let regions = match std::env::var("COUNTRY_REGIONS") {
            Ok(list) => list
                .split(',')
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
            Err(_) => defaults.regions,
        };

        let log_file = std::env::var("COUNTRY_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);

        let http = HttpConfig {
            timeout_seconds: parse_env_var("COUNTRY_HTTP_TIMEOUT_SECONDS")?
                .unwrap_or(defaults.http.timeout_seconds),
            user_agent: std::env::var("COUNTRY_USER_AGENT")
                .unwrap_or(defaults.http.user_agent),
        };

        Ok(Config {
            api_base_url,
            api_revision,
            page_size: parse_env_var("COUNTRY_PAGE_SIZE")?.unwrap_or(defaults.page_size),
            regions,
            log_file,
            http,
        })
    }

    /// Base URL without a trailing slash
    pub fn api_base_url_str(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.api_base_url)
            .with_context(|| format!("Invalid COUNTRY_API_BASE_URL: {}", self.api_base_url))?;

        if self.page_size == 0 {
            return Err(anyhow::anyhow!("COUNTRY_PAGE_SIZE must be at least 1"));
        }

        if let Some(parent) = self.log_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(anyhow::anyhow!(
                    "Log file directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).map_err(|e| {
            anyhow::anyhow!("Failed to parse environment variable {} = '{}': {}", var_name, val, e)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url_str(), "http://127.0.0.1:8080");
        assert_eq!(config.api_revision, ApiRevision::Paged);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.regions.len(), DEFAULT_REGIONS.len());
        assert_eq!(config.http.timeout_seconds, 30);
    }

    #[test]
    fn test_config_validation() {
        Config::default().validate().unwrap();

        let bad_url = Config {
            api_base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(bad_url.validate().is_err());

        let zero_page = Config {
            page_size: 0,
            ..Config::default()
        };
        assert!(zero_page.validate().is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = Config {
            api_base_url: "http://localhost:3000/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.api_base_url_str(), "http://localhost:3000");
    }

    #[test]
    fn test_api_revision_parsing() {
        assert_eq!("paged".parse::<ApiRevision>().unwrap(), ApiRevision::Paged);
        assert_eq!("LEGACY".parse::<ApiRevision>().unwrap(), ApiRevision::Legacy);
        assert!("v3".parse::<ApiRevision>().is_err());
    }
}
