//! Analytical reports over the star schema.

mod export;
mod queries;

use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use thiserror::Error;
use tracing::info;

pub use export::{escape_field, format_row, write_rows};
pub use queries::{standard_queries, ReportQuery};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("query {name} failed: {source}")]
    Query {
        name: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Years bound into the report queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportParams {
    /// Year for the longest-in-top-3 report.
    pub top3_year: i32,
    /// First year of the publisher standings.
    pub first_year: i32,
    /// Last year of the publisher standings, inclusive.
    pub last_year: i32,
    /// Year compared in the rank-1 versus rank-3 report.
    pub rivalry_year: i32,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            top3_year: 2022,
            first_year: 2021,
            last_year: 2023,
            rivalry_year: 2023,
        }
    }
}

/// A report written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutput {
    pub name: &'static str,
    pub path: PathBuf,
    pub rows: usize,
}

pub struct Reporter<'a> {
    conn: &'a Connection,
    output_dir: PathBuf,
    delimiter: char,
}

impl<'a> Reporter<'a> {
    pub fn new(conn: &'a Connection, output_dir: impl Into<PathBuf>, delimiter: char) -> Self {
        Self {
            conn,
            output_dir: output_dir.into(),
            delimiter,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run a query and collect every row in result order.
    pub fn execute(&self, query: &ReportQuery) -> Result<Vec<Vec<Value>>, ReportError> {
        let run = || -> rusqlite::Result<Vec<Vec<Value>>> {
            let mut stmt = self.conn.prepare(query.sql)?;
            let columns = stmt.column_count();
            let rows = stmt
                .query_map(params_from_iter(query.params.iter()), |row| {
                    (0..columns).map(|i| row.get::<_, Value>(i)).collect()
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        };
        run().map_err(|source| ReportError::Query {
            name: query.name,
            source,
        })
    }

    /// Run a query and write its rows to the output directory.
    pub fn export(&self, query: &ReportQuery) -> Result<ReportOutput, ReportError> {
        let rows = self.execute(query)?;
        let path = self.output_dir.join(query.file_name);
        write_rows(&path, &rows, self.delimiter).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        info!("{}: {} rows written to {}", query.name, rows.len(), path.display());
        Ok(ReportOutput {
            name: query.name,
            path,
            rows: rows.len(),
        })
    }

    /// Export every standard report, creating the output directory first.
    pub fn run_all(&self, params: &ReportParams) -> Result<Vec<ReportOutput>, ReportError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        standard_queries(params)
            .iter()
            .map(|query| self.export(query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{create_schema, open_in_memory};

    fn fixture() -> Connection {
        let conn = open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn.execute_batch(
            r#"
            INSERT INTO DimDate (date_key, full_date, year, quarter, month, week, day_of_week) VALUES
                (20220101, '2022-01-01', 2022, 1, 1, 1, 1),
                (20230101, '2023-01-01', 2023, 1, 1, 1, 1),
                (20230108, '2023-01-08', 2023, 1, 1, 2, 1);
            INSERT INTO DimBook (book_key, isbn, title, author, publisher, description, amazon_product_url) VALUES
                (1, '1234567890', 'Book A', 'Author A', 'Publisher A', 'Description A', 'http://example.com/a'),
                (2, '0987654321', 'Book B', 'Author B', 'Publisher B', 'Description B', 'http://example.com/b'),
                (3, '1357924680', 'Book C', 'Author C', 'Publisher C', 'Description C', 'http://example.com/c');
            INSERT INTO DimList (list_key, list_name, display_name, list_name_encoded, updated_frequency) VALUES
                (0, 'list_0', 'List 0', 'list_0_encoded', 'DAILY'),
                (1, 'list_1', 'List 1', 'list_1_encoded', 'WEEKLY');
            INSERT INTO BookRankings (ranking_id, book_key, list_key, date_key, rank, rank_last_week, weeks_on_list) VALUES
                (0, 3, 0, 20220101, 1, 0, 1),
                (1, 1, 1, 20230101, 1, 0, 1),
                (2, 2, 1, 20230101, 3, 0, 1);
            "#,
        )
        .unwrap();
        conn
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn run(conn: &Connection, index: usize) -> Vec<Vec<Value>> {
        let reporter = Reporter::new(conn, "unused", ',');
        let queries = standard_queries(&ReportParams::default());
        reporter.execute(&queries[index]).unwrap()
    }

    #[test]
    fn test_longest_top3_book() {
        let conn = fixture();
        assert_eq!(run(&conn, 0), vec![vec![text("Book C"), Value::Integer(1)]]);
    }

    #[test]
    fn test_smallest_lists() {
        let conn = fixture();
        let rows = run(&conn, 1);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![text("list_0"), Value::Integer(1)]);
        assert_eq!(rows[1], vec![text("list_1"), Value::Integer(2)]);
    }

    #[test]
    fn test_publisher_standings() {
        let conn = fixture();
        let rows = run(&conn, 2);
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            vec![
                text("Publisher C"),
                Value::Integer(2022),
                Value::Integer(1),
                Value::Integer(5),
                Value::Integer(1)
            ]
        );
        assert_eq!(rows[1][0], text("Publisher A"));
        assert_eq!(rows[1][4], Value::Integer(1));
        assert_eq!(rows[2][0], text("Publisher B"));
        assert_eq!(rows[2][3], Value::Integer(3));
        assert_eq!(rows[2][4], Value::Integer(2));
    }

    #[test]
    fn test_team_rivalry() {
        let conn = fixture();
        let rows = run(&conn, 3);
        assert_eq!(
            rows,
            vec![
                vec![text("Book A"), text("Jake's team")],
                vec![text("Book B"), text("Pete's team")],
            ]
        );
    }

    #[test]
    fn test_team_rivalry_shared_title() {
        let conn = fixture();
        conn.execute(
            "INSERT INTO BookRankings (book_key, list_key, date_key, rank) VALUES (1, 0, 20230108, 3)",
            [],
        )
        .unwrap();

        let rows = run(&conn, 3);
        assert_eq!(
            rows,
            vec![
                vec![text("Book B"), text("Pete's team")],
                vec![text("Book A"), text("Shared")],
            ]
        );
    }

    #[test]
    fn test_run_all_writes_every_file() {
        let conn = fixture();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");

        let outputs = Reporter::new(&conn, &out, ',')
            .run_all(&ReportParams::default())
            .unwrap();

        assert_eq!(outputs.len(), 4);
        assert_eq!(
            std::fs::read_to_string(out.join("query1_result.csv")).unwrap(),
            "Book C,1\r\n"
        );
        assert_eq!(
            std::fs::read_to_string(out.join("query4_result.csv")).unwrap(),
            "Book A,Jake's team\r\nBook B,Pete's team\r\n"
        );
    }
}
