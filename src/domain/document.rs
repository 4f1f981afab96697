//! Uploaded patient documents.
//!
//! File contents live only in memory, behind a shared handle.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Extensions the upload dialog accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "jpg", "png"];

/// Length of a document id.
const DOCUMENT_ID_LEN: usize = 9;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Shared, immutable file contents.
#[derive(Clone)]
pub struct FileHandle {
    bytes: Arc<[u8]>,
}

impl FileHandle {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::from(bytes),
        }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Contents never go to Debug output.
impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileHandle({} bytes)", self.bytes.len())
    }
}

/// A document kept in the register.
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Local date string, `M/D/YYYY`
    pub date: String,
    pub file_name: String,
    pub file: Option<FileHandle>,
}

impl DocumentRecord {
    /// Create a record stamped with today's local date.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        file_name: impl Into<String>,
        file: Option<FileHandle>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            date: local_date_string(chrono::Local::now().date_naive()),
            file_name: file_name.into(),
            file,
        }
    }
}

/// Format a date the way the register displays it.
#[must_use]
pub fn local_date_string(date: chrono::NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Generate a random 9-character base-36 document id.
///
/// Not a uniqueness guarantee on its own; the register re-draws on collision.
#[must_use]
pub fn random_document_id() -> String {
    let mut rng = ChaCha20Rng::from_entropy();
    (0..DOCUMENT_ID_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// Whether a file name carries one of the accepted extensions.
#[must_use]
pub fn is_accepted_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| ACCEPTED_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// What the viewer shows for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentPreview {
    /// Leading lines of UTF-8 content
    Text { lines: Vec<String>, truncated: bool },
    /// Summary for binary content
    Binary { kind: &'static str, size: usize },
}

/// Lines shown in a text preview.
const PREVIEW_LINES: usize = 40;

impl DocumentPreview {
    /// Build a preview from file contents.
    #[must_use]
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Self {
        if let Ok(text) = std::str::from_utf8(bytes) {
            let total = text.lines().count();
            let lines = text
                .lines()
                .take(PREVIEW_LINES)
                .map(str::to_string)
                .collect();
            return Self::Text {
                lines,
                truncated: total > PREVIEW_LINES,
            };
        }

        Self::Binary {
            kind: kind_of(file_name, bytes),
            size: bytes.len(),
        }
    }
}

fn kind_of(file_name: &str, bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"%PDF") {
        "PDF document"
    } else if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "PNG image"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "JPEG image"
    } else if bytes.starts_with(b"PK\x03\x04") {
        "Office document"
    } else if bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0]) {
        "Word document"
    } else if is_accepted_file(file_name) {
        "Document"
    } else {
        "Unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_format() {
        let id1 = random_document_id();
        let id2 = random_document_id();
        assert_eq!(id1.len(), 9);
        assert!(id1.bytes().all(|b| BASE36.contains(&b)));
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_accepted_files() {
        assert!(is_accepted_file("scan.PDF"));
        assert!(is_accepted_file("/tmp/x-ray.png"));
        assert!(is_accepted_file("letter.docx"));
        assert!(!is_accepted_file("notes.txt"));
        assert!(!is_accepted_file("no_extension"));
    }

    #[test]
    fn test_local_date_string() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 7).expect("Valid date");
        assert_eq!(local_date_string(date), "3/7/2024");
    }

    #[test]
    fn test_preview_text_and_binary() {
        let preview = DocumentPreview::from_bytes("a.pdf", b"line one\nline two");
        assert_eq!(
            preview,
            DocumentPreview::Text {
                lines: vec!["line one".to_string(), "line two".to_string()],
                truncated: false,
            }
        );

        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0xFF];
        assert_eq!(
            DocumentPreview::from_bytes("a.png", &png),
            DocumentPreview::Binary {
                kind: "PNG image",
                size: 9
            }
        );
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let text = "x\n".repeat(100);
        match DocumentPreview::from_bytes("a.doc", text.as_bytes()) {
            DocumentPreview::Text { lines, truncated } => {
                assert_eq!(lines.len(), 40);
                assert!(truncated);
            }
            other => panic!("Expected text preview, got {other:?}"),
        }
    }

    #[test]
    fn test_file_handle_debug_hides_contents() {
        let handle = FileHandle::new(b"secret".to_vec());
        assert_eq!(format!("{handle:?}"), "FileHandle(6 bytes)");
    }
}
