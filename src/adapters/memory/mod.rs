//! In-memory adapter: Implementation of DocumentStore.
//!
//! Records live in a `Vec` for the lifetime of the session and are dropped on exit.

use crate::domain::DocumentRecord;
use crate::ports::DocumentStore;

/// Error type for document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document id already in use: {0}")]
    DuplicateId(String),
}

/// Session-scoped document collection.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    records: Vec<DocumentRecord>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryDocumentStore {
    type Error = StoreError;

    fn add(&mut self, record: DocumentRecord) -> Result<(), Self::Error> {
        if self.contains(&record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        tracing::debug!(count = self.records.len() + 1, "Added document to register");
        self.records.push(record);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Option<DocumentRecord> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(pos))
    }

    fn get(&self, id: &str) -> Option<&DocumentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    fn list(&self) -> &[DocumentRecord] {
        &self.records
    }
}
