//! Populates the star schema from raw snapshots.
//!
//! Population order is dates, books, lists, then facts. Every step runs in
//! its own transaction. Natural keys map to surrogate keys through in-memory
//! maps warmed from the existing rows, so the first stored row for a natural
//! key always wins.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::DateRange;
use crate::models::{date_key, BookRow, DateRow, ListRow, RankingFact, RawSnapshot};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("snapshot {published_date}: list '{list_name}' not in DimList")]
    MissingList {
        published_date: String,
        list_name: String,
    },
    #[error("snapshot {published_date}: book '{isbn}' on list '{list_name}' not in DimBook")]
    MissingBook {
        published_date: String,
        list_name: String,
        isbn: String,
    },
    #[error("snapshot {published_date}: date key {date_key} not in DimDate")]
    MissingDate {
        published_date: String,
        date_key: i64,
    },
    #[error("invalid published date '{value}'")]
    InvalidPublishedDate { value: String },
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// What to do when a fact references a dimension row that does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingDimensionPolicy {
    /// Roll back the fact step and return the error.
    #[default]
    Abort,
    /// Log the miss, skip the row and keep going.
    Skip,
}

/// Row counts produced by a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub dates_inserted: usize,
    pub observed_dates_inserted: usize,
    pub books_inserted: usize,
    pub lists_inserted: usize,
    pub facts_written: usize,
    pub facts_skipped: usize,
}

/// Fact-step counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FactCounts {
    pub written: usize,
    pub skipped: usize,
}

fn parse_published_date(value: &str) -> Result<NaiveDate, LoadError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| LoadError::InvalidPublishedDate {
        value: value.to_string(),
    })
}

fn insert_date(conn: &Connection, row: &DateRow) -> rusqlite::Result<()> {
    conn.prepare_cached(
        "INSERT OR IGNORE INTO DimDate \
         (date_key, full_date, year, quarter, month, week, day_of_week) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?
    .execute(params![
        row.date_key,
        row.full_date,
        row.year,
        row.quarter,
        row.month,
        row.week,
        row.day_of_week,
    ])?;
    Ok(())
}

pub struct Loader<'a> {
    conn: &'a Connection,
    policy: MissingDimensionPolicy,
    book_keys: HashMap<String, i64>,
    list_keys: HashMap<String, i64>,
    date_keys: HashSet<i64>,
}

impl<'a> Loader<'a> {
    /// Create a loader over an existing schema, reading the natural keys
    /// already stored.
    pub fn new(conn: &'a Connection, policy: MissingDimensionPolicy) -> Result<Self, LoadError> {
        let book_keys = conn
            .prepare("SELECT isbn, book_key FROM DimBook")?
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<rusqlite::Result<HashMap<_, _>>>()?;
        let list_keys = conn
            .prepare("SELECT list_name, list_key FROM DimList")?
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<rusqlite::Result<HashMap<_, _>>>()?;
        let date_keys = conn
            .prepare("SELECT date_key FROM DimDate")?
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<rusqlite::Result<HashSet<_>>>()?;

        debug!(
            books = book_keys.len(),
            lists = list_keys.len(),
            dates = date_keys.len(),
            "Loader warmed key maps"
        );

        Ok(Self {
            conn,
            policy,
            book_keys,
            list_keys,
            date_keys,
        })
    }

    /// Run every population step in order.
    pub fn load(
        &mut self,
        range: &DateRange,
        snapshots: &[RawSnapshot],
    ) -> Result<LoadSummary, LoadError> {
        let dates_inserted = self.populate_dates(range)?;
        let observed_dates_inserted = self.populate_observed_dates(snapshots)?;
        let books_inserted = self.populate_books(snapshots)?;
        let lists_inserted = self.populate_lists(snapshots)?;
        let facts = self.populate_facts(snapshots)?;

        Ok(LoadSummary {
            dates_inserted,
            observed_dates_inserted,
            books_inserted,
            lists_inserted,
            facts_written: facts.written,
            facts_skipped: facts.skipped,
        })
    }

    /// Insert a calendar row for every day in `range` that is not stored yet.
    pub fn populate_dates(&mut self, range: &DateRange) -> Result<usize, LoadError> {
        let conn = self.conn;
        let tx = conn.unchecked_transaction()?;
        let mut added = HashSet::new();

        for date in range.days() {
            let row = DateRow::from_date(date);
            if self.date_keys.contains(&row.date_key) || added.contains(&row.date_key) {
                continue;
            }
            insert_date(&tx, &row)?;
            added.insert(row.date_key);
        }

        tx.commit()?;
        let inserted = added.len();
        self.date_keys.extend(added);
        info!("DimDate: {} rows inserted for {} to {}", inserted, range.start, range.end);
        Ok(inserted)
    }

    /// Add calendar rows for snapshot dates outside the configured range.
    pub fn populate_observed_dates(&mut self, snapshots: &[RawSnapshot]) -> Result<usize, LoadError> {
        let conn = self.conn;
        let tx = conn.unchecked_transaction()?;
        let mut added = HashSet::new();

        for snapshot in snapshots {
            let date = parse_published_date(snapshot.published_date())?;
            let row = DateRow::from_date(date);
            if self.date_keys.contains(&row.date_key) || added.contains(&row.date_key) {
                continue;
            }
            insert_date(&tx, &row)?;
            debug!("DimDate: added observed date {}", row.full_date);
            added.insert(row.date_key);
        }

        tx.commit()?;
        let inserted = added.len();
        self.date_keys.extend(added);
        if inserted > 0 {
            info!("DimDate: {} observed dates outside range inserted", inserted);
        }
        Ok(inserted)
    }

    /// Insert every book not already known by ISBN.
    pub fn populate_books(&mut self, snapshots: &[RawSnapshot]) -> Result<usize, LoadError> {
        let conn = self.conn;
        let tx = conn.unchecked_transaction()?;
        let mut added = HashMap::new();

        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO DimBook \
                 (isbn, title, author, publisher, description, amazon_product_url) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;

            let books = snapshots
                .iter()
                .flat_map(|s| s.lists())
                .flat_map(|l| l.books.iter());
            for book in books {
                if self.book_keys.contains_key(book.isbn()) || added.contains_key(book.isbn()) {
                    continue;
                }
                let row = BookRow::from(book);
                stmt.execute(params![
                    row.isbn,
                    row.title,
                    row.author,
                    row.publisher,
                    row.description,
                    row.amazon_product_url,
                ])?;
                added.insert(row.isbn, tx.last_insert_rowid());
            }
        }

        tx.commit()?;
        let inserted = added.len();
        self.book_keys.extend(added);
        info!("DimBook: {} rows inserted", inserted);
        Ok(inserted)
    }

    /// Insert every list not already known by name.
    pub fn populate_lists(&mut self, snapshots: &[RawSnapshot]) -> Result<usize, LoadError> {
        let conn = self.conn;
        let tx = conn.unchecked_transaction()?;
        let mut added = HashMap::new();

        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO DimList \
                 (list_name, display_name, list_name_encoded, updated_frequency) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;

            for list in snapshots.iter().flat_map(|s| s.lists()) {
                if self.list_keys.contains_key(&list.list_name)
                    || added.contains_key(&list.list_name)
                {
                    continue;
                }
                let row = ListRow::from(list);
                stmt.execute(params![
                    row.list_name,
                    row.display_name,
                    row.list_name_encoded,
                    row.updated_frequency,
                ])?;
                added.insert(row.list_name, tx.last_insert_rowid());
            }
        }

        tx.commit()?;
        let inserted = added.len();
        self.list_keys.extend(added);
        info!("DimList: {} rows inserted", inserted);
        Ok(inserted)
    }

    /// Write one ranking fact per (book, list, date) observation.
    ///
    /// Re-ingesting an observation replaces its measures. Under
    /// [`MissingDimensionPolicy::Abort`] the first lookup miss rolls back
    /// every fact written by this call.
    pub fn populate_facts(&mut self, snapshots: &[RawSnapshot]) -> Result<FactCounts, LoadError> {
        let conn = self.conn;
        let tx = conn.unchecked_transaction()?;
        let mut counts = FactCounts::default();

        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO BookRankings \
                 (book_key, list_key, date_key, rank, rank_last_week, weeks_on_list) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
                 ON CONFLICT(book_key, list_key, date_key) DO UPDATE SET \
                     rank = excluded.rank, \
                     rank_last_week = excluded.rank_last_week, \
                     weeks_on_list = excluded.weeks_on_list",
            )?;

            for snapshot in snapshots {
                let published_date = snapshot.published_date();
                let key = date_key(parse_published_date(published_date)?);

                if !self.date_keys.contains(&key) {
                    let rows: usize = snapshot.lists().iter().map(|l| l.books.len()).sum();
                    self.on_miss(
                        LoadError::MissingDate {
                            published_date: published_date.to_string(),
                            date_key: key,
                        },
                        rows,
                        &mut counts,
                    )?;
                    continue;
                }

                for list in snapshot.lists() {
                    let Some(&list_key) = self.list_keys.get(&list.list_name) else {
                        self.on_miss(
                            LoadError::MissingList {
                                published_date: published_date.to_string(),
                                list_name: list.list_name.clone(),
                            },
                            list.books.len(),
                            &mut counts,
                        )?;
                        continue;
                    };

                    for book in &list.books {
                        let Some(&book_key) = self.book_keys.get(book.isbn()) else {
                            self.on_miss(
                                LoadError::MissingBook {
                                    published_date: published_date.to_string(),
                                    list_name: list.list_name.clone(),
                                    isbn: book.isbn().to_string(),
                                },
                                1,
                                &mut counts,
                            )?;
                            continue;
                        };

                        let fact = RankingFact {
                            book_key,
                            list_key,
                            date_key: key,
                            rank: book.rank,
                            rank_last_week: book.previous_rank(),
                            weeks_on_list: book.weeks_on_list,
                        };
                        stmt.execute(params![
                            fact.book_key,
                            fact.list_key,
                            fact.date_key,
                            fact.rank,
                            fact.rank_last_week,
                            fact.weeks_on_list,
                        ])?;
                        counts.written += 1;
                    }
                }
            }
        }

        tx.commit()?;
        info!(
            "BookRankings: {} rows written, {} skipped",
            counts.written, counts.skipped
        );
        Ok(counts)
    }

    fn on_miss(
        &self,
        error: LoadError,
        rows: usize,
        counts: &mut FactCounts,
    ) -> Result<(), LoadError> {
        match self.policy {
            MissingDimensionPolicy::Abort => Err(error),
            MissingDimensionPolicy::Skip => {
                warn!("Skipping {} ranking rows: {}", rows, error);
                counts.skipped += rows;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{create_schema, open_in_memory};
    use serde_json::json;

    fn setup() -> Connection {
        let conn = open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn
    }

    fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
        .unwrap()
    }

    fn book(isbn: &str, title: &str, rank: i64) -> serde_json::Value {
        json!({
            "primary_isbn13": isbn,
            "title": title,
            "author": format!("Author of {title}"),
            "publisher": "Publisher A",
            "rank": rank,
            "weeks_on_list": 1
        })
    }

    fn snapshot(published_date: &str, lists: Vec<(&str, Vec<serde_json::Value>)>) -> RawSnapshot {
        let lists: Vec<_> = lists
            .into_iter()
            .map(|(name, books)| {
                json!({
                    "list_name": name,
                    "display_name": name.replace('_', " "),
                    "list_name_encoded": name.replace('_', "-"),
                    "updated": "WEEKLY",
                    "books": books
                })
            })
            .collect();
        serde_json::from_value(json!({
            "status": "OK",
            "results": { "published_date": published_date, "lists": lists }
        }))
        .unwrap()
    }

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .unwrap()
    }

    fn sample_data() -> Vec<RawSnapshot> {
        vec![snapshot(
            "2023-01-01",
            vec![(
                "list_1",
                vec![json!({
                    "primary_isbn13": "1234567890",
                    "title": "Book A",
                    "author": "Author A",
                    "publisher": "Publisher A",
                    "description": "Description A",
                    "amazon_product_url": "http://example.com/book_a",
                    "rank": 1,
                    "rank_last_week": 0,
                    "weeks_on_list": 1
                })],
            )],
        )]
    }

    #[test]
    fn test_sample_data_populates_every_table() {
        let conn = setup();
        let mut loader = Loader::new(&conn, MissingDimensionPolicy::Abort).unwrap();
        let summary = loader
            .load(&range((2023, 1, 1), (2023, 1, 8)), &sample_data())
            .unwrap();

        assert_eq!(summary.dates_inserted, 8);
        assert_eq!(summary.books_inserted, 1);
        assert_eq!(summary.lists_inserted, 1);
        assert_eq!(summary.facts_written, 1);

        let date: (String, i32, u32, u32, u32, u32) = conn
            .query_row(
                "SELECT full_date, year, quarter, month, week, day_of_week \
                 FROM DimDate WHERE date_key = 20230101",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?, r.get(5)?)),
            )
            .unwrap();
        assert_eq!(date, ("2023-01-01".to_string(), 2023, 1, 1, 52, 7));

        let book: (String, String, String) = conn
            .query_row(
                "SELECT title, author, publisher FROM DimBook WHERE isbn = '1234567890'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(
            book,
            (
                "Book A".to_string(),
                "Author A".to_string(),
                "Publisher A".to_string()
            )
        );

        let display: String = conn
            .query_row(
                "SELECT display_name FROM DimList WHERE list_name = 'list_1'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(display, "list 1");

        let fact: (i64, i64, i64, i64, i64, i64) = conn
            .query_row(
                "SELECT book_key, list_key, date_key, rank, rank_last_week, weeks_on_list \
                 FROM BookRankings WHERE rank = 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?, r.get(5)?)),
            )
            .unwrap();
        assert_eq!(fact, (1, 1, 20230101, 1, 0, 1));
    }

    #[test]
    fn test_calendar_population_is_idempotent() {
        let conn = setup();
        let span = range((2022, 12, 30), (2023, 1, 2));

        let mut loader = Loader::new(&conn, MissingDimensionPolicy::Abort).unwrap();
        assert_eq!(loader.populate_dates(&span).unwrap(), 4);
        assert_eq!(loader.populate_dates(&span).unwrap(), 0);

        let mut fresh = Loader::new(&conn, MissingDimensionPolicy::Abort).unwrap();
        assert_eq!(fresh.populate_dates(&span).unwrap(), 0);
        assert_eq!(count(&conn, "DimDate"), 4);
    }

    #[test]
    fn test_first_title_wins_for_repeated_isbn() {
        let conn = setup();
        let snapshots = vec![
            snapshot("2023-01-01", vec![("list_1", vec![book("1234567890", "Book A", 1)])]),
            snapshot(
                "2023-01-08",
                vec![("list_1", vec![book("1234567890", "Book A (Reissue)", 1)])],
            ),
        ];

        let mut loader = Loader::new(&conn, MissingDimensionPolicy::Abort).unwrap();
        assert_eq!(loader.populate_books(&snapshots).unwrap(), 1);

        let title: String = conn
            .query_row("SELECT title FROM DimBook WHERE isbn = '1234567890'", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(title, "Book A");

        // A second loader sees the stored row and still keeps the first title.
        let mut again = Loader::new(&conn, MissingDimensionPolicy::Abort).unwrap();
        assert_eq!(again.populate_books(&snapshots[1..]).unwrap(), 0);
        assert_eq!(count(&conn, "DimBook"), 1);
    }

    #[test]
    fn test_missing_isbn_stored_as_empty_string() {
        let conn = setup();
        let mut entry = book("ignored", "No ISBN", 1);
        entry.as_object_mut().unwrap().remove("primary_isbn13");
        let snapshots = vec![snapshot("2023-01-01", vec![("list_1", vec![entry])])];

        let mut loader = Loader::new(&conn, MissingDimensionPolicy::Abort).unwrap();
        loader
            .load(&range((2023, 1, 1), (2023, 1, 1)), &snapshots)
            .unwrap();

        let (isbn, description): (String, String) = conn
            .query_row("SELECT isbn, description FROM DimBook", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(isbn, "");
        assert_eq!(description, "");
        assert_eq!(count(&conn, "BookRankings"), 1);
    }

    #[test]
    fn test_facts_against_empty_dimensions_fail_without_rows() {
        let conn = setup();
        let snapshots = sample_data();

        let mut loader = Loader::new(&conn, MissingDimensionPolicy::Abort).unwrap();
        loader
            .populate_dates(&range((2023, 1, 1), (2023, 1, 8)))
            .unwrap();
        let err = loader.populate_facts(&snapshots).unwrap_err();

        match err {
            LoadError::MissingList {
                published_date,
                list_name,
            } => {
                assert_eq!(published_date, "2023-01-01");
                assert_eq!(list_name, "list_1");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(count(&conn, "BookRankings"), 0);
    }

    #[test]
    fn test_abort_rolls_back_partial_fact_step() {
        let conn = setup();
        let known = snapshot("2023-01-01", vec![("list_1", vec![book("111", "Known", 1)])]);
        let unknown = snapshot("2023-01-01", vec![("list_2", vec![book("222", "Unknown", 1)])]);

        let mut loader = Loader::new(&conn, MissingDimensionPolicy::Abort).unwrap();
        loader
            .populate_dates(&range((2023, 1, 1), (2023, 1, 1)))
            .unwrap();
        loader.populate_books(&[known.clone()]).unwrap();
        loader.populate_lists(&[known.clone()]).unwrap();

        let err = loader.populate_facts(&[known, unknown]).unwrap_err();
        assert!(matches!(err, LoadError::MissingList { .. }));
        assert_eq!(count(&conn, "BookRankings"), 0);
    }

    #[test]
    fn test_failed_dimension_step_leaves_key_maps_unchanged() {
        let conn = setup();
        let snapshots = vec![snapshot(
            "2023-01-01",
            vec![("list_1", vec![book("111", "First", 1), book("222", "Second", 2)])],
        )];
        let span = range((2023, 1, 1), (2023, 1, 3));

        let mut loader = Loader::new(&conn, MissingDimensionPolicy::Abort).unwrap();

        // Another writer stores rows the loader has not seen, so its inserts collide.
        let mut other = Loader::new(&conn, MissingDimensionPolicy::Abort).unwrap();
        let second = snapshot("2023-01-01", vec![("list_1", vec![book("222", "Second", 2)])]);
        other
            .populate_dates(&range((2023, 1, 3), (2023, 1, 3)))
            .unwrap();
        other.populate_books(&[second]).unwrap();

        assert!(loader.populate_dates(&span).is_err());
        assert!(loader.populate_books(&snapshots).is_err());
        assert_eq!(count(&conn, "DimDate"), 1);
        assert_eq!(count(&conn, "DimBook"), 1);

        conn.execute_batch("DELETE FROM DimDate; DELETE FROM DimBook;")
            .unwrap();

        // Rolled-back rows were never recorded, so a retry inserts all of them.
        assert_eq!(loader.populate_dates(&span).unwrap(), 3);
        assert_eq!(loader.populate_books(&snapshots).unwrap(), 2);
        loader.populate_lists(&snapshots).unwrap();
        let counts = loader.populate_facts(&snapshots).unwrap();
        assert_eq!(counts.written, 2);
        assert_eq!(count(&conn, "DimDate"), 3);
        assert_eq!(count(&conn, "DimBook"), 2);
    }

    #[test]
    fn test_skip_policy_counts_missing_rows() {
        let conn = setup();
        let known = snapshot("2023-01-01", vec![("list_1", vec![book("111", "Known", 1)])]);
        let stray = snapshot(
            "2023-01-01",
            vec![("list_1", vec![book("111", "Known", 1), book("999", "Stray", 2)])],
        );

        let mut loader = Loader::new(&conn, MissingDimensionPolicy::Skip).unwrap();
        loader
            .populate_dates(&range((2023, 1, 1), (2023, 1, 1)))
            .unwrap();
        loader.populate_books(&[known.clone()]).unwrap();
        loader.populate_lists(&[known]).unwrap();

        let counts = loader.populate_facts(&[stray]).unwrap();
        assert_eq!(counts, FactCounts { written: 1, skipped: 1 });
        assert_eq!(count(&conn, "BookRankings"), 1);
    }

    #[test]
    fn test_observed_dates_outside_range_are_added() {
        let conn = setup();
        let snapshots = vec![snapshot(
            "2024-02-04",
            vec![("list_1", vec![book("111", "Late", 1)])],
        )];

        let mut loader = Loader::new(&conn, MissingDimensionPolicy::Abort).unwrap();
        let summary = loader
            .load(&range((2023, 1, 1), (2023, 1, 7)), &snapshots)
            .unwrap();

        assert_eq!(summary.dates_inserted, 7);
        assert_eq!(summary.observed_dates_inserted, 1);
        assert_eq!(summary.facts_written, 1);
        assert_eq!(count(&conn, "DimDate"), 8);
    }

    #[test]
    fn test_reingest_updates_instead_of_duplicating() {
        let conn = setup();
        let span = range((2023, 1, 1), (2023, 1, 1));
        let first = snapshot("2023-01-01", vec![("list_1", vec![book("111", "Book", 4)])]);
        let revised = snapshot("2023-01-01", vec![("list_1", vec![book("111", "Book", 2)])]);

        Loader::new(&conn, MissingDimensionPolicy::Abort)
            .unwrap()
            .load(&span, &[first])
            .unwrap();
        Loader::new(&conn, MissingDimensionPolicy::Abort)
            .unwrap()
            .load(&span, &[revised])
            .unwrap();

        assert_eq!(count(&conn, "BookRankings"), 1);
        let rank: i64 = conn
            .query_row("SELECT rank FROM BookRankings", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rank, 2);
    }

    #[test]
    fn test_invalid_published_date_is_rejected() {
        let conn = setup();
        let snapshots = vec![snapshot("01/01/2023", vec![])];

        let mut loader = Loader::new(&conn, MissingDimensionPolicy::Skip).unwrap();
        let err = loader.populate_observed_dates(&snapshots).unwrap_err();
        assert!(matches!(err, LoadError::InvalidPublishedDate { .. }));
    }
}
