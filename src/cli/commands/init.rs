//! Initialize command.

use console::style;

use bestseller_pipeline::config::Settings;
use bestseller_pipeline::repository::{self, create_schema};

/// Create the database file and star schema.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    let conn = repository::connect(&settings.database_path)?;
    create_schema(&conn)?;

    println!(
        "{} Initialized database at {}",
        style("✓").green(),
        settings.database_path.display()
    );
    Ok(())
}
