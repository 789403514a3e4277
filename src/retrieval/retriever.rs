//! Per-date retry loop and the date-range driver.

use chrono::NaiveDate;
use tracing::{error, info, warn};

use super::{OverviewResponse, OverviewSource, Pacing, RetryPolicy};
use crate::config::DateRange;
use crate::models::RawSnapshot;

/// Final outcome of fetching one date.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The payload was retrieved and decoded.
    Fetched(Box<RawSnapshot>),
    /// The server answered with a non-retryable status.
    Rejected { status: u16 },
    /// Every attempt failed at the transport level.
    Exhausted { last_error: String },
    /// The server kept rate limiting past the tolerated number of waits.
    RateLimitExhausted,
    /// The server answered 200 with a body that does not decode.
    Malformed { message: String },
}

/// Result of fetching one date, with retry bookkeeping.
#[derive(Debug, Clone)]
pub struct FetchRecord {
    pub date: NaiveDate,
    pub outcome: FetchOutcome,
    /// Requests that counted against the attempt budget.
    pub attempts: u32,
    /// Rate-limited responses received (not counted in `attempts`).
    pub rate_limited: u32,
}

impl FetchRecord {
    /// The snapshot, if this date was fetched.
    pub fn snapshot(&self) -> Option<&RawSnapshot> {
        match &self.outcome {
            FetchOutcome::Fetched(snapshot) => Some(snapshot.as_ref()),
            _ => None,
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Fetched(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Malformed { .. })
    }
}

/// Collect fetched snapshots in record order, skipping absent dates.
pub fn successful_snapshots(records: Vec<FetchRecord>) -> Vec<RawSnapshot> {
    records
        .into_iter()
        .filter_map(|r| match r.outcome {
            FetchOutcome::Fetched(snapshot) => Some(*snapshot),
            _ => None,
        })
        .collect()
}

/// Fetches list-overview snapshots with retry, backoff and pacing.
pub struct Retriever<S> {
    source: S,
    policy: RetryPolicy,
    pacing: Pacing,
}

impl<S: OverviewSource> Retriever<S> {
    pub fn new(source: S, policy: RetryPolicy, pacing: Pacing) -> Self {
        Self {
            source,
            policy,
            pacing,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of requests the driver will issue for `range`.
    pub fn planned_dates(&self, range: &DateRange) -> usize {
        range.stride(self.pacing.step_days as usize).count()
    }

    /// Fetch a single date, retrying transient failures.
    pub async fn fetch(&self, date: NaiveDate) -> FetchRecord {
        let mut attempts = 0u32;
        let mut rate_limited = 0u32;
        let mut last_error = String::new();

        while attempts < self.policy.max_attempts {
            match self.source.fetch_overview(date).await {
                Ok(OverviewResponse::Ok(snapshot)) => {
                    return FetchRecord {
                        date,
                        outcome: FetchOutcome::Fetched(snapshot),
                        attempts: attempts + 1,
                        rate_limited,
                    };
                }
                Ok(OverviewResponse::RateLimited { retry_after }) => {
                    rate_limited += 1;
                    if rate_limited > self.policy.max_rate_limit_waits {
                        error!(
                            "Still rate limited for {} after {} waits, giving up",
                            date, self.policy.max_rate_limit_waits
                        );
                        return FetchRecord {
                            date,
                            outcome: FetchOutcome::RateLimitExhausted,
                            attempts,
                            rate_limited,
                        };
                    }
                    let wait = self.policy.rate_limit_wait(retry_after);
                    warn!("Rate limit hit for {}. Waiting {:?}", date, wait);
                    tokio::time::sleep(wait).await;
                }
                Ok(OverviewResponse::Rejected { status }) => {
                    error!("Error fetching data for {}: HTTP {}", date, status);
                    return FetchRecord {
                        date,
                        outcome: FetchOutcome::Rejected { status },
                        attempts: attempts + 1,
                        rate_limited,
                    };
                }
                Ok(OverviewResponse::Malformed { message }) => {
                    error!("Malformed response for {}: {}", date, message);
                    return FetchRecord {
                        date,
                        outcome: FetchOutcome::Malformed { message },
                        attempts: attempts + 1,
                        rate_limited,
                    };
                }
                Err(e) => {
                    warn!("Request for {} failed: {}", date, e);
                    last_error = e.to_string();
                    let wait = self.policy.backoff_delay(attempts);
                    attempts += 1;
                    if attempts < self.policy.max_attempts {
                        info!("Retrying {} in {:.2?}", date, wait);
                        tokio::time::sleep(wait).await;
                    }
                }
            }
        }

        error!(
            "Failed to fetch data for {} after {} attempts",
            date, self.policy.max_attempts
        );
        FetchRecord {
            date,
            outcome: FetchOutcome::Exhausted { last_error },
            attempts,
            rate_limited,
        }
    }

    /// Fetch every `step_days`-th date of `range`, pausing after each request.
    ///
    /// Records are returned in date order; `on_record` observes each one as it
    /// completes. Persistence is left to the caller.
    pub async fn fetch_range<F>(&self, range: &DateRange, mut on_record: F) -> Vec<FetchRecord>
    where
        F: FnMut(&FetchRecord),
    {
        let mut records = Vec::new();
        for date in range.stride(self.pacing.step_days as usize) {
            info!("Fetching data for {}", date);
            let record = self.fetch(date).await;
            on_record(&record);
            records.push(record);
            tokio::time::sleep(self.pacing.request_interval).await;
        }
        records
    }
}
