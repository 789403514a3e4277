//! Report command.

use console::style;

use bestseller_pipeline::config::Settings;
use bestseller_pipeline::reporting::Reporter;
use bestseller_pipeline::repository;

/// Export every report into the configured output directory.
pub async fn cmd_report(settings: &Settings) -> anyhow::Result<()> {
    if !settings.database_path.exists() {
        anyhow::bail!(
            "database {} does not exist; run 'bestsellers load' first",
            settings.database_path.display()
        );
    }

    let conn = repository::connect(&settings.database_path)?;
    let reporter = Reporter::new(&conn, &settings.output_dir, settings.delimiter);
    let outputs = reporter.run_all(&settings.report_params())?;

    for output in &outputs {
        println!(
            "  {} {} ({} rows)",
            style("✓").green(),
            output.path.display(),
            output.rows
        );
    }
    println!(
        "{} {} reports written to {}",
        style("✓").green(),
        outputs.len(),
        reporter.output_dir().display()
    );
    Ok(())
}
