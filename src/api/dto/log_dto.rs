use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::log::model::{LogFileContent, LogFileEntry, LogFileListing};

#[derive(Debug, Serialize)]
pub struct LogFileDto {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
    #[serde(rename = "type")]
    pub file_type: String,
}

impl From<LogFileEntry> for LogFileDto {
    fn from(entry: LogFileEntry) -> Self {
        Self {
            name: entry.name,
            path: entry.path.display().to_string(),
            size: entry.size,
            modified: entry.modified_at,
            file_type: entry.extension,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFileListResponse {
    pub files: Vec<LogFileDto>,
    pub count: usize,
    pub total_size: u64,
}

impl From<LogFileListing> for LogFileListResponse {
    fn from(listing: LogFileListing) -> Self {
        let count = listing.count();
        Self {
            files: listing.files.into_iter().map(LogFileDto::from).collect(),
            count,
            total_size: listing.total_size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogFileStatsDto {
    pub size: u64,
    pub modified: DateTime<Utc>,
    pub lines: usize,
}

#[derive(Debug, Serialize)]
pub struct LogFileContentResponse {
    pub filename: String,
    pub content: String,
    pub stats: LogFileStatsDto,
}

impl LogFileContentResponse {
    pub fn new(filename: String, content: LogFileContent) -> Self {
        Self {
            filename,
            stats: LogFileStatsDto {
                size: content.size_bytes,
                modified: content.modified_at,
                lines: content.line_count,
            },
            content: content.text,
        }
    }
}
