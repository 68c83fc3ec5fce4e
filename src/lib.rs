// ============================================================================
// Bookshelf API Library
// ============================================================================

pub mod app;
pub mod config;
pub mod core;
pub mod service;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod web;

// Re-export main types for convenience
pub use app::{build_router, build_router_with_cors};
pub use config::{AppConfig, FilterMode};
pub use crate::core::{Book, BookError, BookId, BookPayload, BookSummary, Result};
pub use service::{BookService, ListBooksQuery};
pub use state::AppState;
pub use storage::{BookRepository, InMemoryBookRepository};
