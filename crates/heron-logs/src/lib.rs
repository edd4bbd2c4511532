//! # heron-logs
//!
//! Search-backed log retrieval for Heron workflow runs.
//!
//! Heron pods log to stdout; a Fluent Bit pipeline ships the lines into an
//! `OpenSearch`-compatible engine, one index per log domain. This crate is
//! the read side:
//!
//! - [`SearchConfig`] / [`SearchClient`] — connection parameters and the
//!   configured HTTP handle
//! - [`FetcherConfig`] — per-domain indices, matcher fields, and limits
//! - [`LogFetcher`] — job, workflow, and cluster-component log retrieval
//! - [`Matcher`] — single-field or all-of-these-fields document matching
//! - [`build_log_fetcher`] — feature-flag-gated factory
//!
//! The engine owns everything hard (ingestion, indexing, query planning);
//! this crate only shapes queries and joins the returned lines.
//!
//! # Example
//!
//! ```rust,no_run
//! use heron_logs::{build_log_fetcher, FetcherConfig, SearchConfig};
//!
//! # async fn example() -> heron_logs::Result<()> {
//! let search = SearchConfig::from_env()?;
//! if let Some(fetcher) = build_log_fetcher(&search, FetcherConfig::default())? {
//!     let logs = fetcher.fetch_workflow_logs("9e2b4c0a-6f1d-4c7e-8b3a-2d5e7f9a1b3c").await;
//!     println!("{}", logs.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
// Tests need unsafe for env var manipulation in Rust 2024
#![cfg_attr(test, allow(unsafe_code))]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod query;

pub use client::{Hit, SearchClient};
pub use config::{FetcherConfig, SearchConfig};
pub use error::{LogsError, Result};
pub use fetcher::{build_log_fetcher, LogFetcher};
pub use query::{Matcher, SortOrder};
