use crate::error::ConfigError;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_UPSTREAM_URL: &str = "https://newsapi.org";
pub const DEFAULT_PROXY_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

/// Settings for the terminal client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: Url,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
    pub output: OutputFormat,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("NEWS_SEARCH_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url).map_err(|e| ConfigError::Invalid {
            name: "NEWS_SEARCH_API_URL",
            reason: e.to_string(),
        })?;

        let api_key = lookup("NEWS_SEARCH_API_KEY").filter(|k| !k.trim().is_empty());

        let timeout = match lookup("NEWS_SEARCH_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    name: "NEWS_SEARCH_TIMEOUT_SECS",
                    reason: format!("expected whole seconds, got '{}'", raw),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let output = match lookup("NEWS_SEARCH_OUTPUT").as_deref().map(str::trim) {
            None | Some("") | Some("text") => OutputFormat::Text,
            Some("html") => OutputFormat::Html,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "NEWS_SEARCH_OUTPUT",
                    reason: format!("expected 'text' or 'html', got '{}'", other),
                })
            }
        };

        Ok(Self {
            api_url,
            api_key,
            timeout,
            output,
        })
    }
}

/// Settings for the proxy that holds the upstream API key.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub upstream_url: Url,
    pub api_key: String,
    pub listen_addr: SocketAddr,
    pub upstream_timeout: Duration,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("NEWSAPI_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::Missing("NEWSAPI_KEY"))?;

        let raw_url = lookup("NEWSAPI_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        let upstream_url = Url::parse(&raw_url).map_err(|e| ConfigError::Invalid {
            name: "NEWSAPI_URL",
            reason: e.to_string(),
        })?;

        let raw_addr = lookup("NEWS_PROXY_ADDR").unwrap_or_else(|| DEFAULT_PROXY_ADDR.to_string());
        let listen_addr: SocketAddr = raw_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "NEWS_PROXY_ADDR",
            reason: format!("not a socket address: '{}'", raw_addr),
        })?;

        Ok(Self {
            upstream_url,
            api_key,
            listen_addr,
            upstream_timeout: Duration::from_secs(10),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn client_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:8080/");
        assert!(config.api_key.is_none());
        assert!(config.timeout.is_none());
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn client_rejects_bad_values() {
        assert!(ClientConfig::from_lookup(lookup_from(&[("NEWS_SEARCH_API_URL", "not a url")])).is_err());
        assert!(ClientConfig::from_lookup(lookup_from(&[("NEWS_SEARCH_TIMEOUT_SECS", "soon")])).is_err());
        assert!(ClientConfig::from_lookup(lookup_from(&[("NEWS_SEARCH_OUTPUT", "pdf")])).is_err());
    }

    #[test]
    fn blank_client_key_is_ignored() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("NEWS_SEARCH_API_KEY", "  "),
            ("NEWS_SEARCH_OUTPUT", "html"),
        ]))
        .unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.output, OutputFormat::Html);
    }

    #[test]
    fn proxy_requires_key() {
        let err = ProxyConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("NEWSAPI_KEY"));

        let config = ProxyConfig::from_lookup(lookup_from(&[("NEWSAPI_KEY", "secret")])).unwrap();
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
    }
}
