//! Raw list-overview snapshot as returned by the books API.
//!
//! Only the fields the loader reads are typed; everything else is kept in
//! `extra` so the raw-data artifact stores the response verbatim.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One list-overview response for a single published date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub results: SnapshotResults,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `results` object of a list-overview response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotResults {
    /// Publication date, `YYYY-MM-DD`.
    pub published_date: String,
    pub lists: Vec<ListEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named bestseller list within a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEntry {
    pub list_name: String,
    pub display_name: String,
    pub list_name_encoded: String,
    /// Update cadence, e.g. `WEEKLY` or `MONTHLY`.
    pub updated: String,
    pub books: Vec<BookEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A ranked book entry within a list.
///
/// Optional fields are `None` when the key is absent and `Some(None)` when it
/// is present as `null`, so both forms survive a write to the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntry {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub primary_isbn13: Option<Option<String>>,
    pub title: String,
    pub author: String,
    pub publisher: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub amazon_product_url: Option<Option<String>>,
    pub rank: i64,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub rank_last_week: Option<Option<i64>>,
    pub weeks_on_list: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Only called for keys that are present, so a `null` becomes `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl RawSnapshot {
    /// Publication date string of this snapshot.
    pub fn published_date(&self) -> &str {
        &self.results.published_date
    }

    /// Lists contained in this snapshot.
    pub fn lists(&self) -> &[ListEntry] {
        &self.results.lists
    }
}

impl BookEntry {
    /// Natural key used for book deduplication. Missing ISBNs map to "".
    pub fn isbn(&self) -> &str {
        self.primary_isbn13.as_ref().and_then(|v| v.as_deref()).unwrap_or("")
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().and_then(|v| v.as_deref())
    }

    pub fn amazon_product_url(&self) -> Option<&str> {
        self.amazon_product_url.as_ref().and_then(|v| v.as_deref())
    }

    /// Prior week's rank, 0 when the book is new to the list.
    pub fn previous_rank(&self) -> i64 {
        self.rank_last_week.flatten().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "status": "OK",
        "copyright": "Copyright (c) 2023",
        "num_results": 1,
        "results": {
            "bestsellers_date": "2022-12-24",
            "published_date": "2023-01-01",
            "lists": [{
                "list_id": 704,
                "list_name": "Combined Print and E-Book Fiction",
                "display_name": "Combined Print & E-Book Fiction",
                "list_name_encoded": "combined-print-and-e-book-fiction",
                "updated": "WEEKLY",
                "books": [{
                    "primary_isbn13": "9781668001226",
                    "title": "IT STARTS WITH US",
                    "author": "Colleen Hoover",
                    "publisher": "Atria",
                    "description": null,
                    "amazon_product_url": "https://www.amazon.com/dp/1668001225",
                    "rank": 1,
                    "rank_last_week": 1,
                    "weeks_on_list": 10,
                    "buy_links": [{"name": "Amazon", "url": "https://example.com"}]
                }]
            }]
        }
    }"#;

    #[test]
    fn test_parse_overview_response() {
        let snapshot: RawSnapshot = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(snapshot.published_date(), "2023-01-01");
        assert_eq!(snapshot.lists().len(), 1);

        let book = &snapshot.lists()[0].books[0];
        assert_eq!(book.isbn(), "9781668001226");
        assert_eq!(book.description, Some(None));
        assert_eq!(book.description(), None);
        assert_eq!(book.previous_rank(), 1);
        assert!(book.extra.contains_key("buy_links"));
        assert_eq!(snapshot.extra.get("status"), Some(&Value::from("OK")));
    }

    #[test]
    fn test_optional_book_fields_default() {
        let book: BookEntry = serde_json::from_str(
            r#"{"title": "T", "author": "A", "publisher": "P", "rank": 4, "weeks_on_list": 0}"#,
        )
        .unwrap();
        assert_eq!(book.isbn(), "");
        assert_eq!(book.previous_rank(), 0);
        assert_eq!(book.description, None);
    }

    #[test]
    fn test_null_and_absent_fields_serialize_back_unchanged() {
        let with_nulls = serde_json::json!({
            "primary_isbn13": null, "title": "T", "author": "A", "publisher": "P",
            "description": null, "amazon_product_url": null,
            "rank": 2, "rank_last_week": null, "weeks_on_list": 1
        });
        let book: BookEntry = serde_json::from_value(with_nulls.clone()).unwrap();
        assert_eq!(book.isbn(), "");
        assert_eq!(book.previous_rank(), 0);
        assert_eq!(serde_json::to_value(&book).unwrap(), with_nulls);

        let without = serde_json::json!({
            "title": "T", "author": "A", "publisher": "P", "rank": 2, "weeks_on_list": 1
        });
        let book: BookEntry = serde_json::from_value(without.clone()).unwrap();
        assert_eq!(serde_json::to_value(&book).unwrap(), without);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let result: Result<BookEntry, _> =
            serde_json::from_str(r#"{"title": "T", "author": "A", "rank": 1, "weeks_on_list": 1}"#);
        assert!(result.is_err());
    }
}
