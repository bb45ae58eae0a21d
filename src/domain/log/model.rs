use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// One readable log file found in the served directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileEntry {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified_at: DateTime<Utc>,
    /// Extension without the leading dot (`log` or `txt`).
    pub extension: String,
}

/// Full text of one log file plus the stats shown next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileContent {
    pub text: String,
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
    pub line_count: usize,
}

impl LogFileContent {
    /// Decodes raw file bytes as UTF-8, replacing invalid sequences.
    pub fn from_bytes(bytes: Vec<u8>, modified_at: DateTime<Utc>) -> Self {
        let size_bytes = bytes.len() as u64;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };
        let line_count = text.split('\n').count();
        Self {
            text,
            size_bytes,
            modified_at,
            line_count,
        }
    }
}

/// A directory listing together with its totals.
#[derive(Debug, Clone, Default)]
pub struct LogFileListing {
    pub files: Vec<LogFileEntry>,
    pub total_size: u64,
}

impl LogFileListing {
    pub fn count(&self) -> usize {
        self.files.len()
    }
}

impl From<Vec<LogFileEntry>> for LogFileListing {
    fn from(files: Vec<LogFileEntry>) -> Self {
        let total_size = files.iter().map(|f| f.size).sum();
        Self { files, total_size }
    }
}
