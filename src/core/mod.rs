pub mod book;
pub mod error;
pub mod messages;

pub use book::{Book, BookDraft, BookId, BookPayload, BookSummary, DraftRejection, generate_id};
pub use error::{BookError, Result};
