//! Log retrieval for jobs, workflows, and cluster components.
//!
//! [`LogFetcher`] holds the engine handle plus per-domain defaults and
//! exposes one retrieval operation per log domain, all funnelled through
//! [`LogFetcher::fetch_logs`]. The fetch surface never fails the caller:
//! any transport or engine problem is logged for correlation and surfaces
//! as `None` ("logs unavailable"), distinct from `Some(String::new())`
//! ("fetched, nothing logged").

use tracing::{debug, error};

use heron_naming::{component_name, ComponentRole};

use crate::client::{Hit, SearchClient};
use crate::config::{FetcherConfig, SearchConfig};
use crate::error::{LogsError, Result};
use crate::query::{build_query, Matcher};

/// Retrieves job, workflow, and cluster logs from the search engine.
#[derive(Debug, Clone)]
pub struct LogFetcher {
    client: SearchClient,
    config: FetcherConfig,
}

impl LogFetcher {
    /// Creates a fetcher from a pre-built client handle and defaults.
    #[must_use]
    pub fn new(client: SearchClient, config: FetcherConfig) -> Self {
        Self { client, config }
    }

    /// Fetcher defaults in use.
    #[must_use]
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetches logs matching `matcher` from `index`.
    ///
    /// Core primitive behind the per-domain operations. Returns the
    /// newline-joined log lines in engine sort order, `Some(String::new())`
    /// for an empty hit list, or `None` when the logs are unavailable
    /// (engine unreachable, query rejected, or an empty multi-matcher —
    /// the latter without any network call).
    pub async fn fetch_logs(&self, id: &str, index: &str, matcher: &Matcher) -> Option<String> {
        match self.try_fetch(id, index, matcher).await {
            Ok(logs) => Some(logs),
            Err(LogsError::EmptyMatcher) => {
                error!(%id, index, "refusing to fetch logs without matcher fields");
                None
            }
            Err(err) => {
                error!(%id, index, error = %err, "failed to fetch logs");
                None
            }
        }
    }

    async fn try_fetch(&self, id: &str, index: &str, matcher: &Matcher) -> Result<String> {
        let query = build_query(matcher, id, self.config.order)?;
        let hits = self
            .client
            .search(index, &query, self.config.max_hits, self.config.timeout())
            .await?;
        debug!(%id, index, hits = hits.len(), "log search returned");
        Ok(concat_hits(&hits, &self.config.log_field))
    }

    /// Fetches the logs of one batch job.
    pub async fn fetch_job_logs(&self, backend_job_id: &str) -> Option<String> {
        let matcher = Matcher::field(self.config.job_matcher.clone());
        self.fetch_logs(backend_job_id, &self.config.job_index, &matcher)
            .await
    }

    /// Fetches the workflow engine logs of one workflow run.
    pub async fn fetch_workflow_logs(&self, workflow_id: &str) -> Option<String> {
        let matcher = Matcher::field(self.config.workflow_matcher.clone());
        self.fetch_logs(workflow_id, &self.config.workflow_index, &matcher)
            .await
    }

    /// Fetches the scheduler logs of the cluster backing one workflow run.
    pub async fn fetch_scheduler_logs(&self, workflow_id: &str) -> Option<String> {
        self.fetch_component_logs(workflow_id, ComponentRole::Scheduler)
            .await
    }

    /// Fetches the worker logs of the cluster backing one workflow run.
    pub async fn fetch_worker_logs(&self, workflow_id: &str) -> Option<String> {
        self.fetch_component_logs(workflow_id, ComponentRole::Worker)
            .await
    }

    async fn fetch_component_logs(
        &self,
        workflow_id: &str,
        role: ComponentRole,
    ) -> Option<String> {
        let matcher = Matcher::all([
            (
                self.config.cluster_matcher.clone(),
                component_name(workflow_id, ComponentRole::Cluster),
            ),
            (
                self.config.component_matcher.clone(),
                role.as_str().to_string(),
            ),
        ]);
        self.fetch_logs(workflow_id, &self.config.cluster_index, &matcher)
            .await
    }
}

/// Joins the configured log field of every hit, one line per document.
///
/// Engine order is preserved; a hit without the field contributes an empty
/// line rather than dropping the whole result.
fn concat_hits(hits: &[Hit], log_field: &str) -> String {
    let mut logs = String::new();
    for hit in hits {
        let line = hit
            .source
            .get(log_field)
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        logs.push_str(line);
        logs.push('\n');
    }
    logs
}

/// Builds the log fetcher if search-backed retrieval is enabled.
///
/// Returns `Ok(None)` when the feature flag in `search` is off; the serving
/// layer then falls back to whatever other log source it has.
///
/// # Errors
///
/// Returns an error if the connection parameters are invalid; see
/// [`SearchClient::build`].
pub fn build_log_fetcher(
    search: &SearchConfig,
    fetcher: FetcherConfig,
) -> Result<Option<LogFetcher>> {
    if !search.enabled {
        debug!("search-backed log retrieval disabled");
        return Ok(None);
    }
    let client = SearchClient::build(search)?;
    Ok(Some(LogFetcher::new(client, fetcher)))
}
