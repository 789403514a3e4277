//! Full pipeline: fetch, initialize, load, report.

use console::style;

use bestseller_pipeline::config::Settings;
use bestseller_pipeline::repository::MissingDimensionPolicy;

use super::{fetch, init, load, report};

pub async fn cmd_run(settings: &Settings, policy: MissingDimensionPolicy) -> anyhow::Result<()> {
    settings.require_api_key()?;

    let fetched = fetch::fetch_to_artifact(settings).await?;
    if fetched == 0 {
        println!(
            "{} No snapshots fetched; loading an empty artifact",
            style("!").yellow()
        );
    }

    init::cmd_init(settings).await?;
    load::cmd_load(settings, policy).await?;
    report::cmd_report(settings).await?;

    println!("{} Pipeline complete", style("✓").green());
    Ok(())
}
