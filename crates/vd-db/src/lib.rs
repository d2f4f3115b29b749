pub mod models;
pub mod repositories;
pub mod store;

pub use store::{Document, DocumentStore, MemoryStore, StoreError, WriteBatch, WriteOp};

/// Collection holding [`models::WordRecord`] documents.
pub const WORDS: &str = "words";

/// Collection holding [`models::Book`] documents.
pub const BOOKS: &str = "books";
