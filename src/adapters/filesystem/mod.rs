//! Filesystem adapter: Implementation of DownloadSink.
//!
//! Files are written to a uniquely named scratch file in the download directory
//! and moved into place without replacing anything. The scratch file is removed
//! on every early exit.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::ports::DownloadSink;

/// Prefix of scratch files; never matches a name a browser would pick.
const SCRATCH_PREFIX: &str = ".healthmonitree-";

/// Give up after this many lost races for a target name.
const MAX_PERSIST_ATTEMPTS: usize = 16;

/// Error type for download delivery.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),
}

/// Download directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DownloadDir {
    root: PathBuf,
}

impl DownloadDir {
    /// Use `root` as the download directory, creating it if needed.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, DownloadError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Pick a path that does not clobber an existing file: `name.ext`, `name (1).ext`, ...
    fn free_path(&self, file_name: &str) -> PathBuf {
        let candidate = self.root.join(file_name);
        if !candidate.exists() {
            return candidate;
        }

        let path = Path::new(file_name);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);
        let ext = path.extension().and_then(|e| e.to_str());

        let mut n = 1u64;
        loop {
            let name = match ext {
                Some(ext) => format!("{stem} ({n}).{ext}"),
                None => format!("{stem} ({n})"),
            };
            let next = self.root.join(name);
            if !next.exists() {
                return next;
            }
            n += 1;
        }
    }

    /// Write `contents` to a fresh scratch file next to the targets.
    fn scratch(&self, contents: &[u8]) -> io::Result<NamedTempFile> {
        let mut scratch = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .suffix(".tmp")
            .tempfile_in(&self.root)?;
        scratch.write_all(contents)?;
        scratch.as_file().sync_all()?;
        Ok(scratch)
    }
}

/// Reject names that would escape the download directory.
fn check_file_name(file_name: &str) -> Result<(), DownloadError> {
    let plain = Path::new(file_name)
        .file_name()
        .map(|n| n == std::ffi::OsStr::new(file_name))
        .unwrap_or(false);
    if file_name.is_empty() || !plain {
        return Err(DownloadError::InvalidFileName(file_name.to_string()));
    }
    Ok(())
}

impl DownloadSink for DownloadDir {
    type Error = DownloadError;

    fn deliver(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, Self::Error> {
        check_file_name(file_name)?;

        let mut scratch = self.scratch(contents)?;
        for _ in 0..MAX_PERSIST_ATTEMPTS {
            let target = self.free_path(file_name);
            // A file created at `target` since `free_path` looked is never replaced.
            match scratch.persist_noclobber(&target) {
                Ok(_) => {
                    tracing::info!(bytes = contents.len(), "Delivered file to download directory");
                    return Ok(target);
                }
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => scratch = e.file,
                Err(e) => return Err(e.error.into()),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("No free name for {file_name}"),
        )
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deliver_writes_file() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let sink = DownloadDir::new(dir.path()).expect("Should create sink");

        let path = sink.deliver("report.csv", b"a,b").expect("Should deliver");
        assert_eq!(path, dir.path().join("report.csv"));
        assert_eq!(fs::read(&path).expect("Should read"), b"a,b");
    }

    #[test]
    fn test_deliver_does_not_overwrite() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let sink = DownloadDir::new(dir.path()).expect("Should create sink");

        sink.deliver("scan.pdf", b"one").expect("Should deliver");
        let second = sink.deliver("scan.pdf", b"two").expect("Should deliver");
        assert_eq!(second, dir.path().join("scan (1).pdf"));
        assert_eq!(fs::read(dir.path().join("scan.pdf")).expect("Should read"), b"one");
    }

    fn scratch_files(dir: &Path) -> usize {
        fs::read_dir(dir)
            .expect("Should list")
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(SCRATCH_PREFIX))
            .count()
    }

    #[test]
    fn test_no_scratch_files_left_behind() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let sink = DownloadDir::new(dir.path()).expect("Should create sink");
        sink.deliver("x.png", b"img").expect("Should deliver");

        assert_eq!(scratch_files(dir.path()), 0);
        assert_eq!(fs::read_dir(dir.path()).expect("Should list").count(), 1);
    }

    #[test]
    fn test_scratch_removed_when_not_persisted() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let sink = DownloadDir::new(dir.path()).expect("Should create sink");
        {
            let _scratch = sink.scratch(b"data").expect("Should create");
            assert_eq!(scratch_files(dir.path()), 1);
        }
        assert_eq!(scratch_files(dir.path()), 0);
    }

    #[test]
    fn test_leaves_in_progress_browser_download_alone() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let sink = DownloadDir::new(dir.path()).expect("Should create sink");
        let foreign = dir.path().join("scan.pdf.part");
        fs::write(&foreign, b"IN-PROGRESS BROWSER DOWNLOAD").expect("Should write");

        let path = sink.deliver("scan.pdf", b"ours").expect("Should deliver");

        assert_eq!(path, dir.path().join("scan.pdf"));
        assert_eq!(fs::read(&path).expect("Should read"), b"ours");
        assert_eq!(
            fs::read(&foreign).expect("Should still exist"),
            b"IN-PROGRESS BROWSER DOWNLOAD"
        );
    }

    #[test]
    fn test_collision_numbering_skips_taken_names() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let sink = DownloadDir::new(dir.path()).expect("Should create sink");
        fs::write(dir.path().join("notes"), b"0").expect("Should write");
        fs::write(dir.path().join("notes (1)"), b"1").expect("Should write");

        let path = sink.deliver("notes", b"2").expect("Should deliver");
        assert_eq!(path, dir.path().join("notes (2)"));
    }

    #[test]
    fn test_rejects_path_traversal() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let sink = DownloadDir::new(dir.path()).expect("Should create sink");
        assert!(matches!(
            sink.deliver("../escape.csv", b"x"),
            Err(DownloadError::InvalidFileName(_))
        ));
        assert!(sink.deliver("", b"x").is_err());
    }
}
