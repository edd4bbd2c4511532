//! Connection and fetcher configuration.
//!
//! Both structs are plain data: supplied once at construction and immutable
//! afterwards. [`SearchConfig`] describes how to reach the search engine,
//! [`FetcherConfig`] describes which indices and document fields hold the
//! logs of each domain. Deployment defaults come from `HERON_SEARCH_*`
//! environment variables via [`SearchConfig::from_env`].

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LogsError, Result};
use crate::query::SortOrder;

/// Environment variable holding the search engine host.
pub const ENV_HOST: &str = "HERON_SEARCH_HOST";
/// Environment variable holding the search engine port.
pub const ENV_PORT: &str = "HERON_SEARCH_PORT";
/// Environment variable holding the URL prefix the engine is served under.
pub const ENV_URL_PREFIX: &str = "HERON_SEARCH_URL_PREFIX";
/// Environment variable holding the basic-auth username.
pub const ENV_USERNAME: &str = "HERON_SEARCH_USERNAME";
/// Environment variable holding the basic-auth password.
pub const ENV_PASSWORD: &str = "HERON_SEARCH_PASSWORD";
/// Environment variable toggling TLS for the connection.
pub const ENV_TLS: &str = "HERON_SEARCH_TLS";
/// Environment variable holding the CA certificate bundle path.
pub const ENV_CA_CERT: &str = "HERON_SEARCH_CA_CERT";
/// Environment variable toggling search-backed log retrieval as a whole.
pub const ENV_ENABLED: &str = "HERON_SEARCH_ENABLED";

/// Connection parameters for the search engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Host name of the search engine.
    pub host: String,
    /// Port of the search engine HTTP API.
    pub port: u16,
    /// Path prefix the engine is served under, empty for none.
    #[serde(default)]
    pub url_prefix: String,
    /// Basic-auth username, if the engine requires authentication.
    #[serde(default)]
    pub username: Option<String>,
    /// Basic-auth password, if the engine requires authentication.
    #[serde(default)]
    pub password: Option<String>,
    /// Whether to connect over TLS.
    #[serde(default)]
    pub use_tls: bool,
    /// Path to a PEM bundle of CA certificates to trust.
    #[serde(default)]
    pub ca_cert_path: Option<PathBuf>,
    /// Whether search-backed log retrieval is enabled at all.
    #[serde(default)]
    pub enabled: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9200,
            url_prefix: String::new(),
            username: None,
            password: None,
            use_tls: false,
            ca_cert_path: None,
            enabled: false,
        }
    }
}

impl SearchConfig {
    /// Builds a configuration from `HERON_SEARCH_*` environment variables.
    ///
    /// Unset or empty variables fall back to the [`Default`] values.
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable cannot be parsed (port, booleans).
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: env_string(ENV_HOST).unwrap_or(defaults.host),
            port: env_port(ENV_PORT, defaults.port)?,
            url_prefix: env_string(ENV_URL_PREFIX).unwrap_or(defaults.url_prefix),
            username: env_string(ENV_USERNAME),
            password: env_string(ENV_PASSWORD),
            use_tls: env_bool(ENV_TLS, defaults.use_tls)?,
            ca_cert_path: env_string(ENV_CA_CERT).map(PathBuf::from),
            enabled: env_bool(ENV_ENABLED, defaults.enabled)?,
        })
    }

    /// Basic-auth credentials, present only when both halves are set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) => Some((user, pass)),
            _ => None,
        }
    }
}

/// Per-domain defaults for the log fetcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Index holding batch job logs.
    pub job_index: String,
    /// Index holding workflow engine logs.
    pub workflow_index: String,
    /// Index holding distributed-cluster logs.
    pub cluster_index: String,
    /// Maximum number of log documents to fetch per call.
    pub max_hits: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Sort order for the timestamp sort clause.
    pub order: SortOrder,
    /// Document field holding the log text.
    pub log_field: String,
    /// Document field matched against a job identifier.
    pub job_matcher: String,
    /// Document field matched against a workflow identifier.
    pub workflow_matcher: String,
    /// Document field matched against a cluster name.
    pub cluster_matcher: String,
    /// Document field matched against a cluster component role.
    pub component_matcher: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            job_index: "fluentbit-job_log".to_string(),
            workflow_index: "fluentbit-workflow_log".to_string(),
            cluster_index: "fluentbit-cluster_log".to_string(),
            max_hits: 5000,
            timeout_secs: 5,
            order: SortOrder::Asc,
            log_field: "log".to_string(),
            job_matcher: format!("{}.keyword", heron_naming::LABEL_JOB_NAME),
            workflow_matcher: format!("{}.keyword", heron_naming::LABEL_WORKFLOW_UUID),
            cluster_matcher: format!("{}.keyword", heron_naming::LABEL_CLUSTER_NAME),
            // The component label holds a closed set of short tags, so the
            // analyzed field matches them as-is.
            component_matcher: heron_naming::LABEL_COMPONENT.to_string(),
        }
    }
}

impl FetcherConfig {
    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_port(key: &str, default: u16) -> Result<u16> {
    match env_string(key) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| LogsError::config(format!("{key} must be a port number, got '{value}'"))),
    }
}

fn env_bool(key: &str, default: bool) -> Result<bool> {
    match env_string(key) {
        None => Ok(default),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(LogsError::config(format!(
                "{key} must be a boolean, got '{other}'"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 9200);
        assert!(config.url_prefix.is_empty());
        assert!(!config.use_tls);
        assert!(!config.enabled);
        assert!(config.credentials().is_none());
    }

    #[test]
    fn fetcher_defaults_match_pipeline_labels() {
        let config = FetcherConfig::default();
        assert_eq!(config.job_index, "fluentbit-job_log");
        assert_eq!(config.workflow_index, "fluentbit-workflow_log");
        assert_eq!(config.cluster_index, "fluentbit-cluster_log");
        assert_eq!(config.max_hits, 5000);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.order, SortOrder::Asc);
        assert_eq!(config.log_field, "log");
        assert_eq!(config.job_matcher, "kubernetes.labels.job-name.keyword");
        assert_eq!(
            config.workflow_matcher,
            "kubernetes.labels.heron-run-batch-workflow-uuid.keyword"
        );
        assert_eq!(
            config.cluster_matcher,
            "kubernetes.labels.heron/cluster-name.keyword"
        );
        assert_eq!(config.component_matcher, "kubernetes.labels.heron/component");
    }

    #[test]
    fn credentials_require_both_halves() {
        let config = SearchConfig {
            username: Some("heron".to_string()),
            ..Default::default()
        };
        assert!(config.credentials().is_none());

        let config = SearchConfig {
            username: Some("heron".to_string()),
            password: Some("secret".to_string()),
            ..Default::default()
        };
        assert_eq!(config.credentials(), Some(("heron", "secret")));
    }

    // Env var manipulation needs unsafe in Rust 2024; kept to a single test
    // so parallel tests never race on the variables.
    #[test]
    fn from_env_overrides_and_rejects_garbage() {
        unsafe {
            std::env::set_var(ENV_HOST, "search.heron.internal");
            std::env::set_var(ENV_PORT, "9443");
            std::env::set_var(ENV_URL_PREFIX, "os");
            std::env::set_var(ENV_USERNAME, "heron");
            std::env::set_var(ENV_PASSWORD, "secret");
            std::env::set_var(ENV_TLS, "true");
            std::env::set_var(ENV_ENABLED, "1");
        }

        let config = SearchConfig::from_env().expect("config from env");
        assert_eq!(config.host, "search.heron.internal");
        assert_eq!(config.port, 9443);
        assert_eq!(config.url_prefix, "os");
        assert_eq!(config.credentials(), Some(("heron", "secret")));
        assert!(config.use_tls);
        assert!(config.enabled);

        unsafe {
            std::env::set_var(ENV_PORT, "ninety-two");
        }
        assert!(SearchConfig::from_env().is_err());

        unsafe {
            std::env::set_var(ENV_PORT, "9200");
            std::env::set_var(ENV_TLS, "maybe");
        }
        assert!(SearchConfig::from_env().is_err());

        unsafe {
            for key in [
                ENV_HOST,
                ENV_PORT,
                ENV_URL_PREFIX,
                ENV_USERNAME,
                ENV_PASSWORD,
                ENV_TLS,
                ENV_ENABLED,
            ] {
                std::env::remove_var(key);
            }
        }
    }
}
