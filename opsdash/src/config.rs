//! Client configuration: base URL and API key, resolved once at startup and
//! passed around as a value.

use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub const ENV_BASE_URL: &str = "OPSDASH_API_URL";
pub const ENV_API_KEY: &str = "OPSDASH_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub api_key: Option<String>,
}

impl Config {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|source| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        // An empty key means no credential header at all.
        let api_key = api_key.filter(|k| !k.is_empty());
        Ok(Self { base_url, api_key })
    }

    /// Resolve from the environment, falling back to the local default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let key = std::env::var(ENV_API_KEY).ok();
        Self::new(&base, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_base_url() {
        let c = Config::new("http://metrics.internal:8080", Some("s3cr3t".into())).unwrap();
        assert_eq!(c.base_url.as_str(), "http://metrics.internal:8080/");
        assert_eq!(c.api_key.as_deref(), Some("s3cr3t"));
    }

    #[test]
    fn empty_key_is_no_key() {
        let c = Config::new(DEFAULT_BASE_URL, Some(String::new())).unwrap();
        assert!(c.api_key.is_none());
    }

    #[test]
    fn rejects_garbage_urls() {
        assert!(Config::new("not a url", None).is_err());
    }
}
