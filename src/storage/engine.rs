use crate::core::{Book, BookDraft, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage backend for book records - allows pluggable collections
///
/// Implementations keep records in insertion order and must run every
/// read-modify-write sequence under exclusive access.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Append a record to the end of the collection
    async fn insert(&self, book: Book) -> Result<()>;

    /// Check whether a record with the given id is present
    async fn contains(&self, id: &str) -> Result<bool>;

    /// Snapshot of all records in collection order
    async fn list(&self) -> Result<Vec<Book>>;

    /// Fetch a single record
    async fn get(&self, id: &str) -> Result<Option<Book>>;

    /// Replace the mutable fields of a record in place
    ///
    /// Returns the updated record, or `None` if the id is unknown.
    async fn update(
        &self,
        id: &str,
        draft: BookDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Book>>;

    /// Remove a record, returning whether it existed
    async fn delete(&self, id: &str) -> Result<bool>;
}
