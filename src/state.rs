use std::sync::Arc;

use crate::{config::FilterMode, service::BookService, storage::BookRepository};

#[derive(Clone)]
pub struct AppState {
    pub books: BookService,
}

impl AppState {
    pub fn new(repository: Arc<dyn BookRepository>, filter_mode: FilterMode) -> Self {
        Self {
            books: BookService::new(repository, filter_mode),
        }
    }
}
