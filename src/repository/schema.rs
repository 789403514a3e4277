//! Star-schema DDL.

use rusqlite::Connection;

/// Star-schema tables, dimensions first.
pub const TABLES: [&str; 4] = ["DimDate", "DimBook", "DimList", "BookRankings"];

/// Create the dimension and fact tables if they do not exist yet.
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS DimDate (
            date_key INTEGER PRIMARY KEY,
            full_date TEXT NOT NULL,
            year INTEGER NOT NULL,
            quarter INTEGER NOT NULL,
            month INTEGER NOT NULL,
            week INTEGER NOT NULL,
            day_of_week INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS DimBook (
            book_key INTEGER PRIMARY KEY,
            isbn TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            author TEXT,
            publisher TEXT,
            description TEXT,
            amazon_product_url TEXT
        );

        CREATE TABLE IF NOT EXISTS DimList (
            list_key INTEGER PRIMARY KEY,
            list_name TEXT NOT NULL UNIQUE,
            display_name TEXT NOT NULL,
            list_name_encoded TEXT NOT NULL,
            updated_frequency TEXT
        );

        CREATE TABLE IF NOT EXISTS BookRankings (
            ranking_id INTEGER PRIMARY KEY,
            book_key INTEGER NOT NULL REFERENCES DimBook (book_key),
            list_key INTEGER NOT NULL REFERENCES DimList (list_key),
            date_key INTEGER NOT NULL REFERENCES DimDate (date_key),
            rank INTEGER NOT NULL,
            rank_last_week INTEGER NOT NULL DEFAULT 0,
            weeks_on_list INTEGER NOT NULL DEFAULT 0,
            UNIQUE (book_key, list_key, date_key)
        );

        CREATE INDEX IF NOT EXISTS idx_rankings_date ON BookRankings(date_key);
        CREATE INDEX IF NOT EXISTS idx_rankings_list ON BookRankings(list_key);
        CREATE INDEX IF NOT EXISTS idx_dimdate_year_quarter ON DimDate(year, quarter);
    "#,
    )?;
    Ok(())
}
