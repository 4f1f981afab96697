//! Adapters layer: Concrete implementations of ports.
//!
//! - `filesystem`: download directory for exports and document copies
//! - `memory`: session-scoped document collection
//! - `sanitize`: PII and credential filtering for logs

pub mod filesystem;
pub mod memory;
pub mod sanitize;

pub use filesystem::{DownloadDir, DownloadError};
pub use memory::{MemoryDocumentStore, StoreError};
