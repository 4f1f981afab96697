//! Download port: where generated exports and document copies are delivered.

use std::path::PathBuf;

/// Destination for files handed back to the user.
pub trait DownloadSink {
    /// Error type for delivery.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Deliver `contents` under `file_name`.
    ///
    /// # Returns
    /// The location the file was written to.
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    fn deliver(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, Self::Error>;
}
