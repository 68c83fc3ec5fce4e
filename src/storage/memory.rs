use super::BookRepository;
use crate::core::{Book, BookDraft, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Process-wide ordered collection of books.
///
/// Records live in a `Vec` so that listing preserves insertion order; lookups
/// are linear scans. Every mutation holds the write guard for its whole
/// read-modify-write sequence.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of records (kept in the given order).
    #[cfg(test)]
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }
}

fn position(books: &[Book], id: &str) -> Option<usize> {
    books.iter().position(|book| book.id == id)
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn insert(&self, book: Book) -> Result<()> {
        self.books.write().await.push(book);
        Ok(())
    }

    async fn contains(&self, id: &str) -> Result<bool> {
        Ok(position(&self.books.read().await, id).is_some())
    }

    async fn list(&self) -> Result<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Book>> {
        let books = self.books.read().await;
        Ok(position(&books, id).map(|idx| books[idx].clone()))
    }

    async fn update(
        &self,
        id: &str,
        draft: BookDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Book>> {
        let mut books = self.books.write().await;
        let Some(idx) = position(&books, id) else {
            return Ok(None);
        };

        let book = &mut books[idx];
        book.apply(draft, now);
        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut books = self.books.write().await;
        match position(&books, id) {
            Some(idx) => {
                books.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
