pub mod engine;
pub mod memory;

pub use engine::BookRepository;
pub use memory::InMemoryBookRepository;
