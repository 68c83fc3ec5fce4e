//! Book operations behind the HTTP handlers.
//!
//! Each method performs the field validation for one endpoint, derives
//! computed fields and drives the repository. Failures come back as
//! [`BookError`] carrying the client-facing message.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};

use crate::config::FilterMode;
use crate::core::{
    Book, BookError, BookId, BookPayload, BookSummary, DraftRejection, Result, generate_id,
    messages,
};
use crate::storage::BookRepository;

/// Query string of `GET /books`.
///
/// Built from raw key/value pairs so that no query string is ever rejected.
/// A repeated `name` keeps its last value. Repeated `reading` or `finished`
/// values are joined with commas, which never parses as a flag and so
/// matches no book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListBooksQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

impl FromIterator<(String, String)> for ListBooksQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => query.name = Some(value),
                "reading" => append_flag(&mut query.reading, value),
                "finished" => append_flag(&mut query.finished, value),
                _ => {}
            }
        }
        query
    }
}

fn append_flag(slot: &mut Option<String>, value: String) {
    match slot {
        Some(existing) => {
            existing.push(',');
            existing.push_str(&value);
        }
        None => *slot = Some(value),
    }
}

/// A single supplied list filter.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    /// Lowercased needle for a case-insensitive substring match.
    Name(String),
    /// `None` when the raw value is not `0` or `1`; matches nothing.
    Reading(Option<bool>),
    Finished(Option<bool>),
}

impl Predicate {
    fn matches(&self, book: &Book) -> bool {
        match self {
            Predicate::Name(needle) => book.name.to_lowercase().contains(needle.as_str()),
            Predicate::Reading(flag) => *flag == Some(book.reading),
            Predicate::Finished(flag) => *flag == Some(book.finished),
        }
    }
}

/// Interpret a query flag numerically: `1` is true, `0` is false.
///
/// Blank input counts as zero. Any other value maps to `None`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(false);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value == 1.0 => Some(true),
        Ok(value) if value == 0.0 => Some(false),
        _ => None,
    }
}

impl ListBooksQuery {
    /// Supplied filters in evaluation order: name, reading, finished.
    /// Absent and empty values are skipped.
    fn predicates(&self) -> Vec<Predicate> {
        let supplied = |value: &Option<String>| value.clone().filter(|raw| !raw.is_empty());

        let mut predicates = Vec::new();
        if let Some(name) = supplied(&self.name) {
            predicates.push(Predicate::Name(name.to_lowercase()));
        }
        if let Some(raw) = supplied(&self.reading) {
            predicates.push(Predicate::Reading(parse_flag(&raw)));
        }
        if let Some(raw) = supplied(&self.finished) {
            predicates.push(Predicate::Finished(parse_flag(&raw)));
        }
        predicates
    }

    /// Select matching books, keeping collection order.
    pub fn apply<'a>(&self, books: &'a [Book], mode: FilterMode) -> Vec<&'a Book> {
        let predicates = self.predicates();
        match mode {
            // Every filter starts over from the full collection, so only the
            // last supplied one has an effect.
            FilterMode::LastWins => match predicates.last() {
                Some(predicate) => books.iter().filter(|b| predicate.matches(b)).collect(),
                None => books.iter().collect(),
            },
            FilterMode::All => books
                .iter()
                .filter(|b| predicates.iter().all(|p| p.matches(b)))
                .collect(),
        }
    }
}

#[derive(Clone)]
pub struct BookService {
    repository: Arc<dyn BookRepository>,
    filter_mode: FilterMode,
}

impl BookService {
    pub fn new(repository: Arc<dyn BookRepository>, filter_mode: FilterMode) -> Self {
        Self {
            repository,
            filter_mode,
        }
    }

    pub async fn create_book(&self, payload: BookPayload) -> Result<BookId> {
        let draft = payload.into_draft().map_err(|rejection| match rejection {
            DraftRejection::MissingName => BookError::validation(messages::ADD_MISSING_NAME),
            DraftRejection::ReadPageExceedsPageCount { .. } => {
                BookError::validation(messages::ADD_READ_PAGE_EXCEEDS)
            }
        })?;

        let id = generate_id();
        let book = Book::create(id.clone(), draft, Utc::now());
        self.repository.insert(book).await?;

        if !self.repository.contains(&id).await? {
            error!(book_id = %id, "book missing from collection right after insert");
            return Err(BookError::internal(messages::BOOK_ADD_FAILED));
        }

        info!(book_id = %id, "book created");
        Ok(id)
    }

    pub async fn list_books(&self, query: &ListBooksQuery) -> Result<Vec<BookSummary>> {
        let books = self.repository.list().await?;
        let summaries: Vec<BookSummary> = query
            .apply(&books, self.filter_mode)
            .into_iter()
            .map(BookSummary::from)
            .collect();

        debug!(count = summaries.len(), ?query, "books listed");
        Ok(summaries)
    }

    pub async fn get_book(&self, id: &str) -> Result<Book> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| BookError::not_found(messages::BOOK_NOT_FOUND))
    }

    /// Field validation is reported before an unknown id.
    pub async fn update_book(&self, id: &str, payload: BookPayload) -> Result<Book> {
        let draft = payload.into_draft().map_err(|rejection| match rejection {
            DraftRejection::MissingName => BookError::validation(messages::UPDATE_MISSING_NAME),
            DraftRejection::ReadPageExceedsPageCount { .. } => {
                BookError::validation(messages::UPDATE_READ_PAGE_EXCEEDS)
            }
        })?;

        let updated = self
            .repository
            .update(id, draft, Utc::now())
            .await?
            .ok_or_else(|| BookError::not_found(messages::UPDATE_ID_NOT_FOUND))?;

        info!(book_id = %id, "book updated");
        Ok(updated)
    }

    pub async fn delete_book(&self, id: &str) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(BookError::not_found(messages::DELETE_ID_NOT_FOUND));
        }

        info!(book_id = %id, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryBookRepository;
    use async_trait::async_trait;
    use chrono::DateTime;
    use serde_json::json;
    use std::time::Duration;

    fn service(mode: FilterMode) -> (BookService, Arc<InMemoryBookRepository>) {
        let repo = Arc::new(InMemoryBookRepository::new());
        (BookService::new(repo.clone(), mode), repo)
    }

    fn payload(name: &str, page_count: u32, read_page: u32, reading: bool) -> BookPayload {
        BookPayload {
            name: Some(name.to_string()),
            year: Some(json!(2010)),
            author: Some(json!("John Doe")),
            summary: Some(json!("Lorem ipsum")),
            publisher: Some(json!("Dicoding")),
            page_count: Some(page_count),
            read_page: Some(read_page),
            reading: Some(reading),
        }
    }

    fn query(name: Option<&str>, reading: Option<&str>, finished: Option<&str>) -> ListBooksQuery {
        ListBooksQuery {
            name: name.map(str::to_string),
            reading: reading.map(str::to_string),
            finished: finished.map(str::to_string),
        }
    }

    async fn names(service: &BookService, q: ListBooksQuery) -> Vec<String> {
        service
            .list_books(&q)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect()
    }

    async fn seeded(mode: FilterMode) -> BookService {
        let (service, _) = service(mode);
        // name, pages, read, reading -> finished?
        service.create_book(payload("Rust in Action", 100, 100, false)).await.unwrap();
        service.create_book(payload("Learning RUST", 100, 10, true)).await.unwrap();
        service.create_book(payload("Go Basics", 50, 50, true)).await.unwrap();
        service.create_book(payload("Dune", 400, 0, false)).await.unwrap();
        service
    }

    #[tokio::test]
    async fn test_create_without_name_leaves_collection_unchanged() {
        let (service, repo) = service(FilterMode::LastWins);
        let mut p = payload("x", 10, 1, false);
        p.name = None;

        let err = service.create_book(p).await.unwrap_err();

        assert_eq!(err, BookError::validation(messages::ADD_MISSING_NAME));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_read_page_over_page_count() {
        let (service, repo) = service(FilterMode::LastWins);

        let err = service
            .create_book(payload("A", 100, 101, false))
            .await
            .unwrap_err();

        assert_eq!(err, BookError::validation(messages::ADD_READ_PAGE_EXCEEDS));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (service, _) = service(FilterMode::LastWins);

        let id = service.create_book(payload("A", 100, 50, true)).await.unwrap();
        let book = service.get_book(&id).await.unwrap();

        assert_eq!(book.id, id);
        assert_eq!(book.name, "A");
        assert_eq!(book.year, Some(json!(2010)));
        assert_eq!(book.publisher, Some(json!("Dicoding")));
        assert!(book.reading);
        assert!(!book.finished);
        assert_eq!(book.inserted_at, book.updated_at);
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let (service, _) = service(FilterMode::LastWins);
        assert_eq!(
            service.get_book("missing").await.unwrap_err(),
            BookError::not_found(messages::BOOK_NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn test_update_recomputes_and_preserves_identity() {
        let (service, _) = service(FilterMode::LastWins);
        let id = service.create_book(payload("A", 100, 50, true)).await.unwrap();
        let before = service.get_book(&id).await.unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;
        let after = service
            .update_book(&id, payload("B", 100, 100, false))
            .await
            .unwrap();

        assert_eq!(after.id, before.id);
        assert_eq!(after.inserted_at, before.inserted_at);
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.name, "B");
        assert!(after.finished);
        assert!(!after.reading);
    }

    #[tokio::test]
    async fn test_update_validation_wins_over_missing_id() {
        let (service, _) = service(FilterMode::LastWins);
        let mut p = payload("x", 1, 1, false);
        p.name = Some(String::new());

        assert_eq!(
            service.update_book("missing", p).await.unwrap_err(),
            BookError::validation(messages::UPDATE_MISSING_NAME)
        );
        assert_eq!(
            service
                .update_book("missing", payload("x", 1, 2, false))
                .await
                .unwrap_err(),
            BookError::validation(messages::UPDATE_READ_PAGE_EXCEEDS)
        );
    }

    #[tokio::test]
    async fn test_failed_update_and_delete_are_repeatable() {
        let (service, repo) = service(FilterMode::LastWins);
        service.create_book(payload("kept", 1, 1, false)).await.unwrap();
        let snapshot = repo.list().await.unwrap();

        for _ in 0..2 {
            assert_eq!(
                service
                    .update_book("missing", payload("x", 1, 1, false))
                    .await
                    .unwrap_err(),
                BookError::not_found(messages::UPDATE_ID_NOT_FOUND)
            );
            assert_eq!(
                service.delete_book("missing").await.unwrap_err(),
                BookError::not_found(messages::DELETE_ID_NOT_FOUND)
            );
        }

        assert_eq!(repo.list().await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let (service, _) = service(FilterMode::LastWins);
        let id = service.create_book(payload("A", 1, 0, false)).await.unwrap();

        service.delete_book(&id).await.unwrap();

        assert!(matches!(
            service.get_book(&id).await,
            Err(BookError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_without_filters_returns_all_in_order() {
        let service = seeded(FilterMode::LastWins).await;
        assert_eq!(
            names(&service, ListBooksQuery::default()).await,
            vec!["Rust in Action", "Learning RUST", "Go Basics", "Dune"]
        );
    }

    #[tokio::test]
    async fn test_list_name_filter_is_case_insensitive() {
        let service = seeded(FilterMode::LastWins).await;
        assert_eq!(
            names(&service, query(Some("rUsT"), None, None)).await,
            vec!["Rust in Action", "Learning RUST"]
        );
    }

    #[tokio::test]
    async fn test_list_boolean_filters() {
        let service = seeded(FilterMode::LastWins).await;

        assert_eq!(
            names(&service, query(None, Some("1"), None)).await,
            vec!["Learning RUST", "Go Basics"]
        );
        assert_eq!(
            names(&service, query(None, None, Some("0"))).await,
            vec!["Learning RUST", "Dune"]
        );
        assert!(names(&service, query(None, Some("true"), None)).await.is_empty());
        assert!(names(&service, query(None, None, Some("2"))).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_filter_values_are_ignored() {
        let service = seeded(FilterMode::LastWins).await;
        assert_eq!(names(&service, query(Some(""), Some(""), Some(""))).await.len(), 4);
    }

    #[tokio::test]
    async fn test_last_supplied_filter_wins() {
        let service = seeded(FilterMode::LastWins).await;

        // name=rust is discarded, finished=1 alone decides
        assert_eq!(
            names(&service, query(Some("rust"), None, Some("1"))).await,
            vec!["Rust in Action", "Go Basics"]
        );
        assert_eq!(
            names(&service, query(Some("dune"), Some("1"), None)).await,
            vec!["Learning RUST", "Go Basics"]
        );
    }

    #[tokio::test]
    async fn test_all_mode_combines_filters() {
        let service = seeded(FilterMode::All).await;

        assert_eq!(
            names(&service, query(Some("rust"), None, Some("1"))).await,
            vec!["Rust in Action"]
        );
        assert_eq!(
            names(&service, query(Some("rust"), Some("1"), Some("0"))).await,
            vec!["Learning RUST"]
        );
        assert!(names(&service, query(Some("dune"), Some("1"), None)).await.is_empty());
    }

    fn pairs(raw: &[(&str, &str)]) -> ListBooksQuery {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_query_from_pairs() {
        assert_eq!(
            pairs(&[("name", "a"), ("name", "b"), ("reading", "1"), ("page", "2")]),
            query(Some("b"), Some("1"), None)
        );
        assert_eq!(
            pairs(&[("finished", "1"), ("finished", "0")]),
            query(None, None, Some("1,0"))
        );
    }

    #[tokio::test]
    async fn test_repeated_flag_matches_nothing() {
        let service = seeded(FilterMode::LastWins).await;

        assert!(names(&service, pairs(&[("reading", "1"), ("reading", "0")]))
            .await
            .is_empty());
        assert_eq!(
            names(&service, pairs(&[("name", "dune"), ("name", "go")])).await,
            vec!["Go Basics"]
        );
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" 1.0 "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("   "), Some(false));
        assert_eq!(parse_flag("true"), None);
        assert_eq!(parse_flag("-1"), None);
        assert_eq!(parse_flag("NaN"), None);
    }

    /// Accepts inserts but never keeps them.
    struct LossyRepository;

    #[async_trait]
    impl BookRepository for LossyRepository {
        async fn insert(&self, _book: Book) -> Result<()> {
            Ok(())
        }
        async fn contains(&self, _id: &str) -> Result<bool> {
            Ok(false)
        }
        async fn list(&self) -> Result<Vec<Book>> {
            Ok(Vec::new())
        }
        async fn get(&self, _id: &str) -> Result<Option<Book>> {
            Ok(None)
        }
        async fn update(
            &self,
            _id: &str,
            _draft: crate::core::BookDraft,
            _now: DateTime<Utc>,
        ) -> Result<Option<Book>> {
            Ok(None)
        }
        async fn delete(&self, _id: &str) -> Result<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_lost_insert_reports_internal_error() {
        let service = BookService::new(Arc::new(LossyRepository), FilterMode::LastWins);

        assert_eq!(
            service
                .create_book(payload("A", 1, 1, false))
                .await
                .unwrap_err(),
            BookError::internal(messages::BOOK_ADD_FAILED)
        );
    }
}
