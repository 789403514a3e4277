//! Fetch command: list-overview snapshots to the raw-data artifact.

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use bestseller_pipeline::config::Settings;
use bestseller_pipeline::retrieval::{
    successful_snapshots, ApiClient, FetchOutcome, FetchRecord, Retriever,
};
use bestseller_pipeline::storage;

fn describe(record: &FetchRecord) -> String {
    match &record.outcome {
        FetchOutcome::Fetched(_) => "fetched".to_string(),
        FetchOutcome::Rejected { status } => format!("rejected with HTTP {}", status),
        FetchOutcome::Exhausted { last_error } => {
            format!("gave up after {} attempts: {}", record.attempts, last_error)
        }
        FetchOutcome::RateLimitExhausted => {
            format!("still rate limited after {} waits", record.rate_limited)
        }
        FetchOutcome::Malformed { message } => format!("malformed response: {}", message),
    }
}

/// One line per date whose response body could not be decoded.
fn malformed_dates(records: &[FetchRecord]) -> Vec<String> {
    records
        .iter()
        .filter(|record| record.is_malformed())
        .map(|record| format!("{}: {}", record.date, describe(record)))
        .collect()
}

/// Retrieve every planned date and write the fetched snapshots.
///
/// Returns the number of snapshots written.
pub async fn fetch_to_artifact(settings: &Settings) -> anyhow::Result<usize> {
    let client = ApiClient::from_settings(settings)?;
    let retriever = Retriever::new(client, settings.retry_policy(), settings.pacing());
    let range = settings.date_range;

    println!(
        "{} Fetching lists from {} to {} every {} days",
        style("→").cyan(),
        range.start,
        range.end,
        settings.step_days
    );

    let pb = ProgressBar::new(retriever.planned_dates(&range) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let records = retriever
        .fetch_range(&range, |record| {
            if !record.is_fetched() {
                pb.println(format!(
                    "  {} {}: {}",
                    style("✗").red(),
                    record.date,
                    describe(record)
                ));
            }
            pb.set_message(record.date.to_string());
            pb.inc(1);
        })
        .await;
    pb.finish_and_clear();

    let planned = records.len();
    let malformed = malformed_dates(&records);
    let snapshots = successful_snapshots(records);
    storage::write_snapshots(&settings.raw_data_path, &snapshots).with_context(|| {
        format!(
            "failed to write raw data to {}",
            settings.raw_data_path.display()
        )
    })?;

    println!(
        "{} Fetched {}/{} dates into {}",
        style("✓").green(),
        snapshots.len(),
        planned,
        settings.raw_data_path.display()
    );
    if snapshots.len() < planned {
        println!(
            "  {} {} dates skipped",
            style("!").yellow(),
            planned - snapshots.len()
        );
    }
    if !malformed.is_empty() {
        anyhow::bail!(
            "{} responses could not be decoded:\n  {}",
            malformed.len(),
            malformed.join("\n  ")
        );
    }

    Ok(snapshots.len())
}

pub async fn cmd_fetch(settings: &Settings) -> anyhow::Result<()> {
    fetch_to_artifact(settings).await?;
    Ok(())
}
