//! Row types for the star schema: three dimensions and the ranking fact.

use chrono::{Datelike, NaiveDate};

use super::snapshot::{BookEntry, ListEntry};

/// Integer `YYYYMMDD` surrogate key for a calendar date.
pub fn date_key(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day())
}

/// Calendar dimension row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRow {
    pub date_key: i64,
    /// ISO `YYYY-MM-DD`.
    pub full_date: String,
    pub year: i32,
    pub quarter: u32,
    pub month: u32,
    /// ISO week number.
    pub week: u32,
    /// 1 = Monday ... 7 = Sunday.
    pub day_of_week: u32,
}

impl DateRow {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            date_key: date_key(date),
            full_date: date.format("%Y-%m-%d").to_string(),
            year: date.year(),
            quarter: (date.month() - 1) / 3 + 1,
            month: date.month(),
            week: date.iso_week().week(),
            day_of_week: date.weekday().number_from_monday(),
        }
    }
}

/// Book dimension row, natural-keyed by ISBN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub description: String,
    pub amazon_product_url: String,
}

impl From<&BookEntry> for BookRow {
    fn from(book: &BookEntry) -> Self {
        Self {
            isbn: book.isbn().to_string(),
            title: book.title.clone(),
            author: book.author.clone(),
            publisher: book.publisher.clone(),
            description: book.description().unwrap_or_default().to_string(),
            amazon_product_url: book.amazon_product_url().unwrap_or_default().to_string(),
        }
    }
}

/// List dimension row, natural-keyed by list name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub list_name: String,
    pub display_name: String,
    pub list_name_encoded: String,
    pub updated_frequency: String,
}

impl From<&ListEntry> for ListRow {
    fn from(list: &ListEntry) -> Self {
        Self {
            list_name: list.list_name.clone(),
            display_name: list.display_name.clone(),
            list_name_encoded: list.list_name_encoded.clone(),
            updated_frequency: list.updated.clone(),
        }
    }
}

/// One observation of a book's position on a list at a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingFact {
    pub book_key: i64,
    pub list_key: i64,
    pub date_key: i64,
    pub rank: i64,
    pub rank_last_week: i64,
    pub weeks_on_list: i64,
}
