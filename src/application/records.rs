//! Records service: Upload, list, view, download and delete patient documents.
//!
//! Documents are held only for the session. Nothing is written anywhere except
//! when the user asks for a download.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::document::{is_accepted_file, random_document_id};
use crate::domain::{DocumentPreview, DocumentRecord, FileHandle};
use crate::ports::{DocumentStore, DownloadSink};
use crate::HealthError;

/// Service for the patient document register.
pub struct RecordsService<S, D>
where
    S: DocumentStore,
    D: DownloadSink,
{
    store: S,
    sink: Arc<D>,
}

impl<S, D> RecordsService<S, D>
where
    S: DocumentStore,
    S::Error: Into<HealthError>,
    D: DownloadSink,
    D::Error: Into<HealthError>,
{
    pub fn new(store: S, sink: Arc<D>) -> Self {
        Self { store, sink }
    }

    /// Records in upload order.
    #[must_use]
    pub fn documents(&self) -> &[DocumentRecord] {
        self.store.list()
    }

    /// Draw an id no current record uses.
    fn fresh_id(&self) -> String {
        loop {
            let id = random_document_id();
            if !self.store.contains(&id) {
                return id;
            }
            tracing::debug!("Document id collision, drawing again");
        }
    }

    /// Read a file from disk into memory and register it.
    ///
    /// # Returns
    /// The uploaded file name.
    ///
    /// # Errors
    /// Returns error if no path is given, the extension is not accepted, or the file
    /// cannot be read.
    pub fn upload(&mut self, name: &str, description: &str, path: &Path) -> Result<String, HealthError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(HealthError::NoFileSelected)?
            .to_string();
        if !is_accepted_file(&file_name) {
            return Err(HealthError::UnsupportedFile(file_name));
        }

        let bytes = std::fs::read(path)?;
        self.upload_bytes(name, description, &file_name, bytes)
    }

    /// Register in-memory file contents.
    ///
    /// # Errors
    /// Returns error if the extension is not accepted or the store rejects the record.
    pub fn upload_bytes(
        &mut self,
        name: &str,
        description: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, HealthError> {
        if !is_accepted_file(file_name) {
            return Err(HealthError::UnsupportedFile(file_name.to_string()));
        }

        let record = DocumentRecord::new(
            self.fresh_id(),
            name,
            description,
            file_name,
            Some(FileHandle::new(bytes)),
        );
        self.store.add(record).map_err(Into::<HealthError>::into)?;

        tracing::info!(count = self.store.len(), "Document uploaded");
        Ok(file_name.to_string())
    }

    /// Remove the first record with this id.
    ///
    /// # Returns
    /// Whether a record was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let removed = self.store.delete(id).is_some();
        if removed {
            tracing::info!(count = self.store.len(), "Document deleted");
        }
        removed
    }

    fn file_of(&self, id: &str) -> Result<(&DocumentRecord, &FileHandle), HealthError> {
        let record = self
            .store
            .get(id)
            .ok_or_else(|| HealthError::DocumentNotFound(id.to_string()))?;
        let file = record
            .file
            .as_ref()
            .ok_or_else(|| HealthError::MissingFile(record.name.clone()))?;
        Ok((record, file))
    }

    /// Preview a document's contents.
    ///
    /// # Errors
    /// Returns error if the record is unknown or has no file attached.
    pub fn view(&self, id: &str) -> Result<DocumentPreview, HealthError> {
        let (record, file) = self.file_of(id)?;
        Ok(DocumentPreview::from_bytes(&record.file_name, file.bytes()))
    }

    /// Copy a document to the download directory.
    ///
    /// # Errors
    /// Returns error if the record is unknown, has no file, or the write fails.
    pub fn download(&self, id: &str) -> Result<PathBuf, HealthError> {
        let (record, file) = self.file_of(id)?;
        self.sink
            .deliver(&record.file_name, file.bytes())
            .map_err(Into::<HealthError>::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{DownloadDir, MemoryDocumentStore};

    type Service = RecordsService<MemoryDocumentStore, DownloadDir>;

    fn service(dir: &tempfile::TempDir) -> Service {
        let sink = DownloadDir::new(dir.path().join("downloads")).expect("Should create sink");
        RecordsService::new(MemoryDocumentStore::new(), Arc::new(sink))
    }

    #[test]
    fn test_upload_from_disk() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut svc = service(&dir);
        let path = dir.path().join("labs.pdf");
        std::fs::write(&path, b"%PDF-1.7 body").expect("Should write");

        let file_name = svc.upload("Lab results", "Q1 panel", &path).expect("Should upload");
        assert_eq!(file_name, "labs.pdf");

        let docs = svc.documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name, "Lab results");
        assert_eq!(docs[0].description, "Q1 panel");
        assert_eq!(docs[0].id.len(), 9);
    }

    #[test]
    fn test_upload_rejects_unaccepted_extension() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut svc = service(&dir);
        let err = svc
            .upload_bytes("Notes", "", "notes.txt", b"x".to_vec())
            .expect_err("Should reject");
        assert!(matches!(err, HealthError::UnsupportedFile(_)));
        assert!(svc.documents().is_empty());

        assert!(matches!(
            svc.upload("Nothing", "", Path::new("")),
            Err(HealthError::NoFileSelected)
        ));
    }

    #[test]
    fn test_add_then_delete_same_id() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut svc = service(&dir);
        svc.upload_bytes("A", "", "a.png", vec![1]).expect("Should upload");
        svc.upload_bytes("B", "", "b.png", vec![2]).expect("Should upload");

        let id = svc.documents()[0].id.clone();
        assert!(svc.delete(&id));
        assert!(svc.documents().iter().all(|d| d.id != id));
        assert_eq!(svc.documents().len(), 1);

        assert!(!svc.delete("missing00"));
        assert_eq!(svc.documents().len(), 1);
    }

    #[test]
    fn test_view_and_download() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut svc = service(&dir);
        svc.upload_bytes("Letter", "Referral", "letter.doc", b"Dear colleague".to_vec())
            .expect("Should upload");
        let id = svc.documents()[0].id.clone();

        match svc.view(&id).expect("Should preview") {
            DocumentPreview::Text { lines, .. } => assert_eq!(lines, vec!["Dear colleague"]),
            other => panic!("Expected text preview, got {other:?}"),
        }

        let path = svc.download(&id).expect("Should download");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("letter.doc"));
        assert_eq!(std::fs::read(path).expect("Should read"), b"Dear colleague");
    }

    #[test]
    fn test_view_unknown_or_detached() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut store = MemoryDocumentStore::new();
        store
            .add(DocumentRecord::new("detached1", "Old scan", "", "scan.jpg", None))
            .expect("Should add");
        let sink = DownloadDir::new(dir.path()).expect("Should create sink");
        let svc = RecordsService::new(store, Arc::new(sink));

        assert!(matches!(svc.view("nope"), Err(HealthError::DocumentNotFound(_))));
        assert!(matches!(svc.download("detached1"), Err(HealthError::MissingFile(_))));
    }
}
