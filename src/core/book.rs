use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Opaque book identifier. Consumers must not assume any structure.
pub type BookId = String;

/// Generate a fresh random identifier (UUID v4, 32 lowercase hex chars).
pub fn generate_id() -> BookId {
    Uuid::new_v4().simple().to_string()
}

/// A stored book together with its reading progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub year: Option<Value>,
    pub author: Option<Value>,
    pub summary: Option<Value>,
    pub publisher: Option<Value>,
    pub page_count: u32,
    pub read_page: u32,
    pub finished: bool,
    pub reading: bool,
    #[serde(with = "timestamp")]
    pub inserted_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a new record from validated fields. Both timestamps are `now`.
    pub fn create(id: BookId, draft: BookDraft, now: DateTime<Utc>) -> Self {
        let finished = draft.is_finished();
        Self {
            id,
            name: draft.name,
            year: draft.year,
            author: draft.author,
            summary: draft.summary,
            publisher: draft.publisher,
            page_count: draft.page_count,
            read_page: draft.read_page,
            finished,
            reading: draft.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field. `id` and `inserted_at` are left untouched.
    pub fn apply(&mut self, draft: BookDraft, now: DateTime<Utc>) {
        self.finished = draft.is_finished();
        self.name = draft.name;
        self.year = draft.year;
        self.author = draft.author;
        self.summary = draft.summary;
        self.publisher = draft.publisher;
        self.page_count = draft.page_count;
        self.read_page = draft.read_page;
        self.reading = draft.reading;
        self.updated_at = now;
    }
}

/// List view of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    pub id: BookId,
    pub name: String,
    pub publisher: Option<Value>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Candidate fields as received from a create or update request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[serde(default)]
    pub name: Option<String>,
    /// Descriptive fields are stored as received, whatever their JSON type.
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub author: Option<Value>,
    #[serde(default)]
    pub summary: Option<Value>,
    #[serde(default)]
    pub publisher: Option<Value>,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub read_page: Option<u32>,
    #[serde(default)]
    pub reading: Option<bool>,
}

/// Why a payload could not become a [`BookDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftRejection {
    MissingName,
    ReadPageExceedsPageCount { read_page: u32, page_count: u32 },
}

impl BookPayload {
    /// Check field constraints. The name check runs first.
    pub fn into_draft(self) -> std::result::Result<BookDraft, DraftRejection> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(DraftRejection::MissingName),
        };

        let page_count = self.page_count.unwrap_or(0);
        let read_page = self.read_page.unwrap_or(0);
        if read_page > page_count {
            return Err(DraftRejection::ReadPageExceedsPageCount {
                read_page,
                page_count,
            });
        }

        Ok(BookDraft {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count,
            read_page,
            reading: self.reading.unwrap_or(false),
        })
    }
}

/// Validated mutable fields of a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub name: String,
    pub year: Option<Value>,
    pub author: Option<Value>,
    pub summary: Option<Value>,
    pub publisher: Option<Value>,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl BookDraft {
    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
