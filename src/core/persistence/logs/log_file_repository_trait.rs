use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// The subset of file metadata the log service cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMeta {
    pub is_file: bool,
    pub is_dir: bool,
    pub len: u64,
    pub modified: DateTime<Utc>,
}

/// Filesystem access used by the log file service.
///
/// Errors are raw `io::Error`s; translating them into the app error taxonomy
/// is the service's job.
#[async_trait]
pub trait LogFileRepository: Send + Sync {
    /// Metadata of `path`, following symlinks.
    async fn metadata(&self, path: &Path) -> io::Result<FileMeta>;

    /// Names of the entries directly inside `dir`.
    async fn list_entry_names(&self, dir: &Path) -> io::Result<Vec<String>>;

    async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Content of `path`, reading at most `limit + 1` bytes so a file over
    /// `limit` is detectable without loading all of it.
    async fn read_bytes(&self, path: &Path, limit: u64) -> io::Result<Vec<u8>>;
}
