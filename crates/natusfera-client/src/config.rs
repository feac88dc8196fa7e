use std::env;
use std::time::Duration;

use crate::error::{NatusferaError, Result};

pub const DEFAULT_BASE_URL: &str = "https://natusfera.gbif.es";
pub const DEFAULT_PAGE_SIZE: usize = 200;
pub const DEFAULT_PROBE_PAGE: u32 = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("natusfera-client-rs/", env!("CARGO_PKG_VERSION"));

/// Client configuration, passed in at construction
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API host, without a trailing slash
    pub base_url: String,
    /// Items requested per page; a shorter page ends pagination
    pub page_size: usize,
    /// Page probed before a free-text search to bound the result set
    pub probe_page: u32,
    pub timeout: Duration,
    pub user_agent: String,
    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            probe_page: DEFAULT_PROBE_PAGE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: false,
        }
    }
}

impl ClientConfig {
    /// Configuration for a custom API host, other settings at their defaults
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Parse configuration from `NATUSFERA_*` variables supplied by `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let base_url = lookup("NATUSFERA_API_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let page_size = parse_var(&lookup, "NATUSFERA_PAGE_SIZE")?.unwrap_or(defaults.page_size);
        let probe_page =
            parse_var(&lookup, "NATUSFERA_PROBE_PAGE")?.unwrap_or(defaults.probe_page);
        let timeout = parse_var(&lookup, "NATUSFERA_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let user_agent = lookup("NATUSFERA_USER_AGENT").unwrap_or(defaults.user_agent);

        let accept_invalid_certs = parse_var(&lookup, "NATUSFERA_ACCEPT_INVALID_CERTS")?
            .unwrap_or(defaults.accept_invalid_certs);

        let config = Self {
            base_url,
            page_size,
            probe_page,
            timeout,
            user_agent,
            accept_invalid_certs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make pagination ill-defined
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(NatusferaError::Config("base URL is empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(NatusferaError::Config(
                "page size must be at least 1".to_string(),
            ));
        }
        if self.probe_page == 0 {
            return Err(NatusferaError::Config(
                "probe page must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<T>> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| NatusferaError::Config(format!("{} has an invalid value: {:?}", name, raw))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://natusfera.gbif.es");
        assert_eq!(config.page_size, 200);
        assert_eq!(config.probe_page, 100);
        assert!(!config.accept_invalid_certs);
        assert!(config.user_agent.starts_with("natusfera-client-rs/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = ClientConfig::with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let config = ClientConfig {
            page_size: 0,
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(NatusferaError::Config(_))));
    }

    #[test]
    fn test_zero_probe_page_is_rejected() {
        let config = ClientConfig {
            probe_page: 0,
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(NatusferaError::Config(_))));
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_from_lookup_without_variables_uses_defaults() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.probe_page, DEFAULT_PROBE_PAGE);
    }

    #[test]
    fn test_from_lookup_reads_every_variable() {
        let vars = [
            ("NATUSFERA_API_URL", "http://localhost:3000/"),
            ("NATUSFERA_PAGE_SIZE", "50"),
            ("NATUSFERA_PROBE_PAGE", " 20 "),
            ("NATUSFERA_TIMEOUT_SECS", "5"),
            ("NATUSFERA_USER_AGENT", "bioblitz/1.0"),
            ("NATUSFERA_ACCEPT_INVALID_CERTS", "true"),
        ];
        let config = ClientConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.probe_page, 20);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "bioblitz/1.0");
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn test_from_lookup_rejects_unparsable_value() {
        let vars = [("NATUSFERA_PAGE_SIZE", "abc")];
        match ClientConfig::from_lookup(lookup(&vars)) {
            Err(NatusferaError::Config(msg)) => assert!(msg.contains("NATUSFERA_PAGE_SIZE")),
            other => panic!("expected config error, got {:?}", other),
        }

        let vars = [("NATUSFERA_ACCEPT_INVALID_CERTS", "yes")];
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&vars)),
            Err(NatusferaError::Config(_))
        ));
    }

    #[test]
    fn test_from_lookup_validates_result() {
        let vars = [("NATUSFERA_PAGE_SIZE", "0")];
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&vars)),
            Err(NatusferaError::Config(_))
        ));

        let vars = [("NATUSFERA_API_URL", "")];
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&vars)),
            Err(NatusferaError::Config(_))
        ));
    }
}
