//! Load command: raw-data artifact into the star schema.

use anyhow::Context;
use console::style;

use bestseller_pipeline::config::Settings;
use bestseller_pipeline::repository::{
    self, create_schema, LoadSummary, Loader, MissingDimensionPolicy,
};
use bestseller_pipeline::storage;

/// Read the artifact and populate every table.
pub fn load_artifact(
    settings: &Settings,
    policy: MissingDimensionPolicy,
) -> anyhow::Result<LoadSummary> {
    let snapshots = storage::read_snapshots(&settings.raw_data_path)?;

    let conn = repository::connect(&settings.database_path)?;
    create_schema(&conn)?;

    let mut loader = Loader::new(&conn, policy)?;
    let summary = loader
        .load(&settings.date_range, &snapshots)
        .with_context(|| format!("failed to load {}", settings.raw_data_path.display()))?;
    Ok(summary)
}

pub fn print_summary(summary: &LoadSummary) {
    println!(
        "  DimDate: {} new ({} observed outside range)",
        summary.dates_inserted + summary.observed_dates_inserted,
        summary.observed_dates_inserted
    );
    println!("  DimBook: {} new", summary.books_inserted);
    println!("  DimList: {} new", summary.lists_inserted);
    println!("  BookRankings: {} written", summary.facts_written);
    if summary.facts_skipped > 0 {
        println!(
            "  {} {} rankings skipped (missing dimension rows)",
            style("!").yellow(),
            summary.facts_skipped
        );
    }
}

pub async fn cmd_load(settings: &Settings, policy: MissingDimensionPolicy) -> anyhow::Result<()> {
    println!(
        "{} Loading {} into {}",
        style("→").cyan(),
        settings.raw_data_path.display(),
        settings.database_path.display()
    );

    let summary = load_artifact(settings, policy)?;
    print_summary(&summary);

    println!("{} Load complete", style("✓").green());
    Ok(())
}
