//! Analytical report queries.
//!
//! Each query is plain data: SQL text plus its bound parameters, built from
//! [`ReportParams`]. Column order of each query is the column order of the
//! exported file.

use rusqlite::types::Value;

use super::ReportParams;

/// One report: a query and the file its rows are exported to.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    pub name: &'static str,
    pub file_name: &'static str,
    pub sql: &'static str,
    pub params: Vec<Value>,
}

/// Book with the most top-3 placements in a year. Columns: `title, days_in_top_3`.
pub const LONGEST_TOP3_SQL: &str = r#"
    SELECT b.title, COUNT(*) AS days_in_top_3
    FROM BookRankings br
        JOIN DimBook b ON br.book_key = b.book_key
        JOIN DimDate d ON br.date_key = d.date_key
    WHERE d.year = ?1 AND br.rank <= 3
    GROUP BY b.book_key
    ORDER BY days_in_top_3 DESC
    LIMIT 1
"#;

/// Three lists with the fewest distinct books. Columns: `list_name, unique_books`.
pub const SMALLEST_LISTS_SQL: &str = r#"
    SELECT l.list_name, COUNT(DISTINCT br.book_key) AS unique_books
    FROM BookRankings br
        JOIN DimList l ON br.list_key = l.list_key
    GROUP BY l.list_key
    ORDER BY unique_books ASC
    LIMIT 3
"#;

/// Top five publishers per quarter by points (5/4/3/2/1 for ranks 1 to 5).
/// Columns: `publisher, year, quarter, points, rank`.
pub const PUBLISHER_STANDINGS_SQL: &str = r#"
    WITH publisher_points AS (
        SELECT
            b.publisher,
            d.year,
            d.quarter,
            SUM(CASE
                WHEN br.rank = 1 THEN 5
                WHEN br.rank = 2 THEN 4
                WHEN br.rank = 3 THEN 3
                WHEN br.rank = 4 THEN 2
                WHEN br.rank = 5 THEN 1
                ELSE 0
            END) AS points,
            ROW_NUMBER() OVER (PARTITION BY d.year, d.quarter ORDER BY SUM(CASE
                WHEN br.rank = 1 THEN 5
                WHEN br.rank = 2 THEN 4
                WHEN br.rank = 3 THEN 3
                WHEN br.rank = 4 THEN 2
                WHEN br.rank = 5 THEN 1
                ELSE 0
            END) DESC) AS rank
        FROM BookRankings br
            JOIN DimBook b ON br.book_key = b.book_key
            JOIN DimDate d ON br.date_key = d.date_key
        WHERE d.year BETWEEN ?1 AND ?2
        GROUP BY b.publisher, d.year, d.quarter
    )
    SELECT publisher, year, quarter, points, rank
    FROM publisher_points
    WHERE rank <= 5
    ORDER BY year, quarter, rank
"#;

/// Rank-1 titles against rank-3 titles in one year. Columns: `book_title, bought_by`.
pub const TEAM_RIVALRY_SQL: &str = r#"
    WITH jake_books AS (
        SELECT DISTINCT b.title AS jake_book
        FROM BookRankings br
            JOIN DimBook b ON br.book_key = b.book_key
            JOIN DimDate d ON br.date_key = d.date_key
        WHERE d.year = ?1 AND br.rank = 1
    ),
    pete_books AS (
        SELECT DISTINCT b.title AS pete_book
        FROM BookRankings br
            JOIN DimBook b ON br.book_key = b.book_key
            JOIN DimDate d ON br.date_key = d.date_key
        WHERE d.year = ?1 AND br.rank = 3
    )
    SELECT
        COALESCE(j.jake_book, p.pete_book) AS book_title,
        CASE
            WHEN j.jake_book IS NOT NULL AND p.pete_book IS NULL THEN 'Jake''s team'
            WHEN j.jake_book IS NULL AND p.pete_book IS NOT NULL THEN 'Pete''s team'
            ELSE 'Shared'
        END AS bought_by
    FROM jake_books j
        FULL OUTER JOIN pete_books p ON j.jake_book = p.pete_book
    ORDER BY bought_by, book_title
"#;

/// The four standard reports in export order.
pub fn standard_queries(params: &ReportParams) -> Vec<ReportQuery> {
    vec![
        ReportQuery {
            name: "longest_top3",
            file_name: "query1_result.csv",
            sql: LONGEST_TOP3_SQL,
            params: vec![Value::Integer(params.top3_year.into())],
        },
        ReportQuery {
            name: "smallest_lists",
            file_name: "query2_result.csv",
            sql: SMALLEST_LISTS_SQL,
            params: Vec::new(),
        },
        ReportQuery {
            name: "publisher_standings",
            file_name: "query3_result.csv",
            sql: PUBLISHER_STANDINGS_SQL,
            params: vec![
                Value::Integer(params.first_year.into()),
                Value::Integer(params.last_year.into()),
            ],
        },
        ReportQuery {
            name: "team_rivalry",
            file_name: "query4_result.csv",
            sql: TEAM_RIVALRY_SQL,
            params: vec![Value::Integer(params.rivalry_year.into())],
        },
    ]
}
