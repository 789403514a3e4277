//! Retrieval of list-overview snapshots from the books API.
//!
//! The HTTP transport sits behind [`OverviewSource`] so the retry loop and
//! the date-range driver can run against scripted responses in tests.

mod backoff;
mod http_client;
mod retriever;

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

pub use backoff::{Pacing, RetryPolicy};
pub use http_client::{parse_retry_after, ApiClient};
pub use retriever::{successful_snapshots, FetchOutcome, FetchRecord, Retriever};

use crate::models::RawSnapshot;

/// Classified response to a single overview request.
#[derive(Debug, Clone)]
pub enum OverviewResponse {
    /// HTTP 200 with a decoded payload.
    Ok(Box<RawSnapshot>),
    /// HTTP 429; `retry_after` is the server-specified wait if one was sent.
    RateLimited { retry_after: Option<Duration> },
    /// Any other status. Not retried.
    Rejected { status: u16 },
    /// HTTP 200 whose body does not match the snapshot model. Not retried.
    Malformed { message: String },
}

/// Transport-level failures. All of these are retried with backoff.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Source of list-overview snapshots, one request per call.
#[async_trait]
pub trait OverviewSource: Send + Sync {
    async fn fetch_overview(&self, date: NaiveDate) -> Result<OverviewResponse, FetchError>;
}
