use std::sync::Arc;

use tokio::sync::Mutex;
use vd_db::{DocumentStore, MemoryStore};

use crate::config::{ApiConfig, Environment};

#[derive(Clone, Debug)]
pub struct ApiState {
    pub store: Arc<dyn DocumentStore>,
    pub environment: Environment,
    pub mastered_book_id: String,
    pub max_import_rows: usize,
    /// Imports read existing words for duplicate detection before writing,
    /// so two imports must not interleave.
    pub import_lock: Arc<Mutex<()>>,
}

impl ApiState {
    pub fn new(config: &ApiConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            environment: config.env,
            mastered_book_id: config.mastered_book_id.clone(),
            max_import_rows: config.max_import_rows,
            import_lock: Arc::new(Mutex::new(())),
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(config: &ApiConfig) -> Self {
        Self::new(config, Arc::new(MemoryStore::new()))
    }
}
