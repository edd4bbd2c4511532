//! HTTP handle to the search engine.
//!
//! [`SearchClient::build`] is pure configuration assembly: it validates the
//! local inputs (URL shape, CA bundle readability) and produces a handle
//! with compression and certificate verification enabled. Whether the
//! engine is actually reachable only surfaces on the first search.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::SearchConfig;
use crate::error::{LogsError, Result};

/// One search hit as returned by the engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hit {
    /// The stored document.
    #[serde(rename = "_source", default)]
    pub source: serde_json::Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct HitList {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: HitList,
}

/// Configured handle to the search engine HTTP API.
///
/// Cheap to clone; the underlying connection pool is shared. Safe for
/// concurrent use without extra locking.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base: Url,
    credentials: Option<(String, String)>,
}

impl SearchClient {
    /// Builds a client handle from connection parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the host/port/prefix do not form a valid URL or
    /// the CA certificate bundle cannot be read or parsed.
    pub fn build(config: &SearchConfig) -> Result<Self> {
        let scheme = if config.use_tls { "https" } else { "http" };
        let prefix = config.url_prefix.trim_matches('/');
        let raw = if prefix.is_empty() {
            format!("{scheme}://{}:{}/", config.host, config.port)
        } else {
            format!("{scheme}://{}:{}/{prefix}/", config.host, config.port)
        };
        let base = Url::parse(&raw)
            .map_err(|e| LogsError::config(format!("invalid search engine URL '{raw}': {e}")))?;

        let mut builder = reqwest::Client::builder().gzip(true);
        if let Some(path) = &config.ca_cert_path {
            let pem = std::fs::read(path)?;
            let cert = reqwest::Certificate::from_pem(&pem)?;
            builder = builder.add_root_certificate(cert);
        }
        let http = builder.build()?;

        debug!(url = %base, tls = config.use_tls, "built search engine client");

        Ok(Self {
            http,
            base,
            credentials: config
                .credentials()
                .map(|(user, pass)| (user.to_string(), pass.to_string())),
        })
    }

    /// Base URL the client sends requests to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Runs one search against `index` and returns the raw hit list.
    ///
    /// `size` caps the number of returned documents; `timeout` bounds the
    /// whole request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, the engine answers
    /// with a non-success status, or the response body is not valid JSON.
    pub async fn search(
        &self,
        index: &str,
        body: &Value,
        size: u32,
        timeout: Duration,
    ) -> Result<Vec<Hit>> {
        let url = self
            .base
            .join(&format!("{index}/_search"))
            .map_err(|e| LogsError::config(format!("invalid index name '{index}': {e}")))?;

        let mut request = self
            .http
            .post(url)
            .query(&[("size", size.to_string())])
            .timeout(timeout)
            .json(body);
        if let Some((user, pass)) = &self.credentials {
            request = request.basic_auth(user, Some(pass));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(LogsError::engine(status.as_u16(), reason));
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.hits.hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_url_without_prefix() {
        let client = SearchClient::build(&SearchConfig::default()).expect("client");
        assert_eq!(client.base_url().as_str(), "http://localhost:9200/");
    }

    #[test]
    fn base_url_with_prefix_and_tls() {
        let config = SearchConfig {
            host: "search.heron.internal".to_string(),
            port: 9443,
            url_prefix: "/os/".to_string(),
            use_tls: true,
            ..Default::default()
        };
        let client = SearchClient::build(&config).expect("client");
        assert_eq!(
            client.base_url().as_str(),
            "https://search.heron.internal:9443/os/"
        );
    }

    #[test]
    fn missing_ca_bundle_is_a_build_error() {
        let config = SearchConfig {
            ca_cert_path: Some("/nonexistent/ca.pem".into()),
            ..Default::default()
        };
        let result = SearchClient::build(&config);
        assert!(matches!(result, Err(LogsError::Io(_))));
    }

    #[test]
    fn hit_parses_without_source() {
        let hit: Hit = serde_json::from_value(json!({ "_id": "1", "_score": 0.3 })).expect("hit");
        assert!(hit.source.is_empty());
    }

    #[test]
    fn response_parses_hit_list_in_order() {
        let response: SearchResponse = serde_json::from_value(json!({
            "took": 3,
            "hits": {
                "total": { "value": 2 },
                "hits": [
                    { "_source": { "log": "first" } },
                    { "_source": { "log": "second" } },
                ]
            }
        }))
        .expect("response");

        assert_eq!(response.hits.hits.len(), 2);
        assert_eq!(response.hits.hits[0].source["log"], json!("first"));
        assert_eq!(response.hits.hits[1].source["log"], json!("second"));
    }
}
