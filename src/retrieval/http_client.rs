//! reqwest-backed client for the list-overview endpoint.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use super::{FetchError, OverviewResponse, OverviewSource};
use crate::config::Settings;
use crate::models::RawSnapshot;

/// Path of the overview endpoint relative to the API base URL.
const OVERVIEW_PATH: &str = "lists/overview.json";

/// HTTP client for the list-overview endpoint.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl ApiClient {
    /// Create a client with explicit timeouts.
    pub fn new(
        base_url: &str,
        api_key: &str,
        user_agent: &str,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            endpoint: overview_endpoint(base_url)?,
            api_key: api_key.to_string(),
        })
    }

    /// Create a client from application settings.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::new(
            &settings.api_base_url,
            settings.require_api_key()?,
            &settings.user_agent,
            Duration::from_secs(settings.connect_timeout),
            Duration::from_secs(settings.request_timeout),
        )
    }

    /// Full request URL for a published date. Contains the API key.
    fn request_url(&self, date: NaiveDate) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("api-key", &self.api_key)
            .append_pair("published_date", &date.format("%Y-%m-%d").to_string());
        url
    }
}

/// Join the overview path onto the base URL, tolerating a missing trailing slash.
fn overview_endpoint(base_url: &str) -> Result<Url, url::ParseError> {
    let base = if base_url.ends_with('/') {
        Url::parse(base_url)?
    } else {
        Url::parse(&format!("{}/", base_url))?
    };
    base.join(OVERVIEW_PATH)
}

/// Decode a 200 body, keeping the serde error (with line and column) when it
/// does not match the snapshot model.
fn classify_body(body: &str) -> OverviewResponse {
    match serde_json::from_str::<RawSnapshot>(body) {
        Ok(snapshot) => OverviewResponse::Ok(Box::new(snapshot)),
        Err(e) => OverviewResponse::Malformed {
            message: e.to_string(),
        },
    }
}

/// Parse a Retry-After header given in seconds. HTTP-date values are ignored.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[async_trait]
impl OverviewSource for ApiClient {
    async fn fetch_overview(&self, date: NaiveDate) -> Result<OverviewResponse, FetchError> {
        let start = Instant::now();
        let response = self.client.get(self.request_url(date)).send().await?;
        let status = response.status();

        debug!(
            "GET {} published_date={} -> {} in {:?}",
            self.endpoint,
            date,
            status.as_u16(),
            start.elapsed()
        );

        match status {
            StatusCode::OK => {
                let body = response.text().await?;
                Ok(classify_body(&body))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_retry_after);
                Ok(OverviewResponse::RateLimited { retry_after })
            }
            other => Ok(OverviewResponse::Rejected {
                status: other.as_u16(),
            }),
        }
    }
}
