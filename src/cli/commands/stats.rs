//! Stats command.

use console::style;

use bestseller_pipeline::config::Settings;
use bestseller_pipeline::repository::{self, create_schema, table_counts};

pub async fn cmd_stats(settings: &Settings) -> anyhow::Result<()> {
    if !settings.database_path.exists() {
        println!(
            "{} No database at {}",
            style("!").yellow(),
            settings.database_path.display()
        );
        return Ok(());
    }

    let conn = repository::connect(&settings.database_path)?;
    create_schema(&conn)?;

    println!("{}", style(settings.database_path.display()).bold());
    for (table, count) in table_counts(&conn)? {
        println!("  {:<14} {:>8}", table, count);
    }
    Ok(())
}
