//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and its collaborators (download directory,
//! document collection, dashboard).

mod documents;
mod download;
mod intake;

pub use documents::DocumentStore;
pub use download::DownloadSink;
pub use intake::ProfileConsumer;
