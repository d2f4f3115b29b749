//! Document store seam.
//!
//! Words and books are kept as JSON documents addressed by collection and id.
//! Any backend that can get, list and atomically commit a batch of writes can
//! stand behind [`DocumentStore`]; [`MemoryStore`] is the in-process one.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;

/// A stored document: a JSON object.
pub type Document = Map<String, Value>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("document must be a JSON object, got {0}")]
    InvalidDocument(String),
    #[error("store lock poisoned")]
    Poisoned,
}

/// One write inside a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Create or replace a document
    Set {
        collection: String,
        id: String,
        doc: Document,
    },
    /// Merge top-level fields into an existing document
    Update {
        collection: String,
        id: String,
        patch: Document,
    },
    /// Remove a document; removing a missing document is not an error
    Delete { collection: String, id: String },
}

/// Writes applied all-or-nothing by [`DocumentStore::commit`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, collection: &str, id: &str, doc: Document) -> &mut Self {
        self.ops.push(WriteOp::Set {
            collection: collection.to_string(),
            id: id.to_string(),
            doc,
        });
        self
    }

    pub fn update(&mut self, collection: &str, id: &str, patch: Document) -> &mut Self {
        self.ops.push(WriteOp::Update {
            collection: collection.to_string(),
            id: id.to_string(),
            patch,
        });
        self
    }

    pub fn delete(&mut self, collection: &str, id: &str) -> &mut Self {
        self.ops.push(WriteOp::Delete {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// Key/value document storage used by the repositories.
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Fetch one document.
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Fetch every document of a collection.
    fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Apply a batch atomically: if any write fails, none is applied.
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;

    fn set(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.set(collection, id, doc);
        self.commit(batch)
    }

    fn update(&self, collection: &str, id: &str, patch: Document) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.update(collection, id, patch);
        self.commit(batch)
    }

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.delete(collection, id);
        self.commit(batch)
    }
}

/// In-memory [`DocumentStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut collections = self.collections.write().map_err(|_| StoreError::Poisoned)?;

        // Work on a copy of the touched collections so a failing update
        // leaves the store as it was
        let mut staged: HashMap<String, BTreeMap<String, Document>> = HashMap::new();
        for op in batch.into_ops() {
            let collection = match &op {
                WriteOp::Set { collection, .. }
                | WriteOp::Update { collection, .. }
                | WriteOp::Delete { collection, .. } => collection.clone(),
            };
            let docs = staged
                .entry(collection.clone())
                .or_insert_with(|| collections.get(&collection).cloned().unwrap_or_default());

            match op {
                WriteOp::Set { id, doc, .. } => {
                    docs.insert(id, doc);
                }
                WriteOp::Update { id, patch, .. } => {
                    let Some(existing) = docs.get_mut(&id) else {
                        return Err(StoreError::NotFound { collection, id });
                    };
                    existing.extend(patch);
                }
                WriteOp::Delete { id, .. } => {
                    docs.remove(&id);
                }
            }
        }

        collections.extend(staged);
        Ok(())
    }
}

/// Serialize a model into a document.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument(other.to_string())),
    }
}

/// Deserialize a document into a model.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_set_get_delete() {
        let store = MemoryStore::new();

        store.set("words", "w1", doc(json!({"english": "apple"}))).unwrap();
        let fetched = store.get("words", "w1").unwrap().unwrap();
        assert_eq!(fetched["english"], "apple");

        store.delete("words", "w1").unwrap();
        assert!(store.get("words", "w1").unwrap().is_none());

        // Deleting again is fine
        store.delete("words", "w1").unwrap();
    }

    #[test]
    fn test_update_merges_fields() {
        let store = MemoryStore::new();
        store
            .set("words", "w1", doc(json!({"english": "apple", "checked": false})))
            .unwrap();

        store.update("words", "w1", doc(json!({"checked": true}))).unwrap();

        let fetched = store.get("words", "w1").unwrap().unwrap();
        assert_eq!(fetched["english"], "apple");
        assert_eq!(fetched["checked"], true);
    }

    #[test]
    fn test_update_missing_document_fails() {
        let store = MemoryStore::new();

        let err = store.update("words", "nope", Document::new()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let store = MemoryStore::new();

        let mut batch = WriteBatch::new();
        batch
            .set("words", "w1", doc(json!({"english": "apple"})))
            .update("words", "missing", doc(json!({"checked": true})));
        assert_eq!(batch.len(), 2);

        assert!(store.commit(batch).is_err());
        assert!(store.get("words", "w1").unwrap().is_none());
    }

    #[test]
    fn test_batch_applies_in_order() {
        let store = MemoryStore::new();

        let mut batch = WriteBatch::new();
        batch
            .set("words", "w1", doc(json!({"english": "apple"})))
            .update("words", "w1", doc(json!({"korean": "사과"})))
            .set("books", "b1", doc(json!({"name": "Day list"})));
        store.commit(batch).unwrap();

        let word = store.get("words", "w1").unwrap().unwrap();
        assert_eq!(word["korean"], "사과");
        assert_eq!(store.list("books").unwrap().len(), 1);
        assert!(store.list("unknown").unwrap().is_empty());
    }
}
