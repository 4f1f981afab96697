//! Document store port: Trait for the document register's backing collection.
//!
//! The register is session-scoped; implementations must not persist anything.

use crate::domain::DocumentRecord;

/// Ordered collection of uploaded documents.
pub trait DocumentStore {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Append a record at the end of the collection.
    ///
    /// # Errors
    /// Returns error if the store rejects the record.
    fn add(&mut self, record: DocumentRecord) -> Result<(), Self::Error>;

    /// Remove the first record whose id matches.
    ///
    /// # Returns
    /// The removed record, or `None` if no record matched (the store is unchanged).
    fn delete(&mut self, id: &str) -> Option<DocumentRecord>;

    /// Look up the first record whose id matches.
    fn get(&self, id: &str) -> Option<&DocumentRecord>;

    /// All records in insertion order.
    fn list(&self) -> &[DocumentRecord];

    /// Whether any record uses this id.
    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of records held.
    fn len(&self) -> usize {
        self.list().len()
    }

    /// Whether the store is empty.
    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}
