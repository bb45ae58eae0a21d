use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing::warn;

use super::log_file_repository_trait::{FileMeta, LogFileRepository};

/// `tokio::fs` backed repository. Each call suspends only the calling task.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFileFsAdapter;

impl LogFileFsAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LogFileRepository for LogFileFsAdapter {
    async fn metadata(&self, path: &Path) -> io::Result<FileMeta> {
        let meta = fs::metadata(path).await?;
        let modified: DateTime<Utc> = meta.modified()?.into();

        Ok(FileMeta {
            is_file: meta.is_file(),
            is_dir: meta.is_dir(),
            len: meta.len(),
            modified,
        })
    }

    async fn list_entry_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut entries = fs::read_dir(dir).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!("Skipping non UTF-8 file name {:?} in {}", raw, dir.display()),
            }
        }

        Ok(names)
    }

    async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path).await
    }

    async fn read_bytes(&self, path: &Path, limit: u64) -> io::Result<Vec<u8>> {
        let file = fs::File::open(path).await?;
        let mut bytes = Vec::new();
        file.take(limit.saturating_add(1)).read_to_end(&mut bytes).await?;
        Ok(bytes)
    }
}
