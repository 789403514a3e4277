//! Domain models for the bestseller pipeline.

mod dimensions;
mod snapshot;

pub use dimensions::{date_key, BookRow, DateRow, ListRow, RankingFact};
pub use snapshot::{BookEntry, ListEntry, RawSnapshot, SnapshotResults};
