use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::persistence::logs::log_file_repository_trait::LogFileRepository;
use crate::domain::log::model::{LogFileContent, LogFileEntry, LogFileListing};
use crate::domain::log::validation::{has_allowed_extension, validate_filename};
use crate::errors::AppError;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, Copy)]
pub struct LogFileServiceOptions {
    /// Largest file `read_file` will load, in bytes (inclusive).
    pub max_file_size: u64,
    /// Reject symlinks whose target resolves outside the served directory.
    pub confine_to_root: bool,
}

impl Default for LogFileServiceOptions {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            confine_to_root: true,
        }
    }
}

/// Lists and reads `.log` / `.txt` files of one directory.
///
/// All io failures are translated into [`AppError`] here; nothing above this
/// layer sees an `io::Error`.
pub struct LogFileService<R: LogFileRepository> {
    repo: R,
    options: LogFileServiceOptions,
}

impl<R: LogFileRepository> LogFileService<R> {
    pub fn new(repo: R, options: LogFileServiceOptions) -> Self {
        Self { repo, options }
    }

    /// Readable log files in `directory`, newest first.
    pub async fn list_available_files(&self, directory: &Path) -> Result<Vec<LogFileEntry>, AppError> {
        let dir_meta = self
            .repo
            .metadata(directory)
            .await
            .map_err(|e| map_directory_error(e, directory))?;
        if !dir_meta.is_dir {
            return Err(AppError::DirectoryNotFound);
        }

        let names = self
            .repo
            .list_entry_names(directory)
            .await
            .map_err(|e| map_directory_error(e, directory))?;

        let root = self.confinement_root(directory).await?;
        let mut files = Vec::with_capacity(names.len());

        for name in names {
            if !has_allowed_extension(&name) {
                continue;
            }
            let path = directory.join(&name);

            let meta = match self.repo.metadata(&path).await {
                Ok(meta) => meta,
                Err(e) => {
                    warn!("Could not read file stats for {}: {}", name, e);
                    continue;
                }
            };
            if !meta.is_file {
                continue;
            }

            if let Some(root) = &root {
                match self.repo.canonicalize(&path).await {
                    Ok(resolved) if resolved.starts_with(root) => {}
                    Ok(resolved) => {
                        warn!(
                            "Skipping {} which resolves outside the logs directory ({})",
                            name,
                            resolved.display()
                        );
                        continue;
                    }
                    Err(e) => {
                        warn!("Could not resolve {}: {}", name, e);
                        continue;
                    }
                }
            }

            let extension = Path::new(&name)
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or("txt")
                .to_string();

            files.push(LogFileEntry {
                name,
                path,
                size: meta.len,
                modified_at: meta.modified,
                extension,
            });
        }

        // Newest first; equal timestamps fall back to name for a stable order
        files.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| a.name.cmp(&b.name))
        });

        debug!("Listed {} log files in {}", files.len(), directory.display());
        Ok(files)
    }

    pub async fn list_with_totals(&self, directory: &Path) -> Result<LogFileListing, AppError> {
        self.list_available_files(directory).await.map(LogFileListing::from)
    }

    /// Full content of `filename` inside `directory`.
    ///
    /// The name is validated before anything touches the filesystem.
    pub async fn read_file(&self, directory: &Path, filename: &str) -> Result<LogFileContent, AppError> {
        validate_filename(filename)?;

        let path = directory.join(filename);
        let meta = self.repo.metadata(&path).await.map_err(map_file_error)?;

        if meta.is_dir {
            return Err(AppError::IsADirectory);
        }
        if !meta.is_file {
            // fifos, sockets and devices are never served
            return Err(AppError::InvalidFileType);
        }

        if let Some(root) = self.confinement_root(directory).await? {
            let resolved = self.repo.canonicalize(&path).await.map_err(map_file_error)?;
            if !resolved.starts_with(&root) {
                return Err(AppError::PermissionDenied(
                    "log file resolves outside the logs directory".to_string(),
                ));
            }
        }

        self.ensure_within_limit(meta.len)?;

        let bytes = self
            .repo
            .read_bytes(&path, self.options.max_file_size)
            .await
            .map_err(map_file_error)?;
        // The file may have grown since it was stat'ed; past the limit the
        // reported size is a lower bound
        self.ensure_within_limit(bytes.len() as u64)?;

        Ok(LogFileContent::from_bytes(bytes, meta.modified))
    }

    fn ensure_within_limit(&self, size: u64) -> Result<(), AppError> {
        if size > self.options.max_file_size {
            return Err(AppError::PayloadTooLarge {
                size,
                limit: self.options.max_file_size,
            });
        }
        Ok(())
    }

    async fn confinement_root(&self, directory: &Path) -> Result<Option<PathBuf>, AppError> {
        if !self.options.confine_to_root {
            return Ok(None);
        }
        self.repo
            .canonicalize(directory)
            .await
            .map(Some)
            .map_err(|e| map_directory_error(e, directory))
    }
}

fn map_directory_error(err: io::Error, directory: &Path) -> AppError {
    match err.kind() {
        ErrorKind::NotFound => AppError::DirectoryNotFound,
        ErrorKind::PermissionDenied => {
            AppError::PermissionDenied("cannot access logs directory".to_string())
        }
        _ => AppError::InternalError(format!(
            "Failed to read logs directory {}: {}",
            directory.display(),
            err
        )),
    }
}

fn map_file_error(err: io::Error) -> AppError {
    match err.kind() {
        ErrorKind::NotFound => AppError::FileNotFound,
        ErrorKind::PermissionDenied => {
            AppError::PermissionDenied("cannot read log file".to_string())
        }
        ErrorKind::IsADirectory => AppError::IsADirectory,
        _ => AppError::InternalError(format!("Failed to read log file: {}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::persistence::logs::log_file_fs_adapter::LogFileFsAdapter;
    use crate::core::persistence::logs::log_file_repository_trait::FileMeta;
    use async_trait::async_trait;
    use std::fs::{self, File};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::{Duration, SystemTime};

    /// Counts every filesystem call and fails them all.
    #[derive(Default)]
    struct CountingRepository {
        calls: AtomicUsize,
    }

    impl CountingRepository {
        fn touch(&self) -> io::Error {
            self.calls.fetch_add(1, Ordering::SeqCst);
            io::Error::new(ErrorKind::Other, "unexpected filesystem access")
        }
    }

    #[async_trait]
    impl LogFileRepository for CountingRepository {
        async fn metadata(&self, _path: &Path) -> io::Result<FileMeta> {
            Err(self.touch())
        }

        async fn list_entry_names(&self, _dir: &Path) -> io::Result<Vec<String>> {
            Err(self.touch())
        }

        async fn canonicalize(&self, _path: &Path) -> io::Result<PathBuf> {
            Err(self.touch())
        }

        async fn read_bytes(&self, _path: &Path, _limit: u64) -> io::Result<Vec<u8>> {
            Err(self.touch())
        }
    }

    /// One small regular file at `/logs/app.log`, with selectable failures.
    #[derive(Default)]
    struct ScriptedRepository {
        metadata_error: Option<ErrorKind>,
        read_error: Option<ErrorKind>,
        /// Size the file has grown to by the time it is read.
        grown_to: Option<u64>,
        read_limit: Mutex<Option<u64>>,
    }

    #[async_trait]
    impl LogFileRepository for ScriptedRepository {
        async fn metadata(&self, path: &Path) -> io::Result<FileMeta> {
            if let Some(kind) = self.metadata_error {
                return Err(io::Error::from(kind));
            }
            let is_dir = path == Path::new("/logs");
            Ok(FileMeta {
                is_file: !is_dir,
                is_dir,
                len: 5,
                modified: chrono::Utc::now(),
            })
        }

        async fn list_entry_names(&self, _dir: &Path) -> io::Result<Vec<String>> {
            Ok(vec!["app.log".to_string()])
        }

        async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
            Ok(path.to_path_buf())
        }

        async fn read_bytes(&self, _path: &Path, limit: u64) -> io::Result<Vec<u8>> {
            *self.read_limit.lock().unwrap() = Some(limit);
            if let Some(kind) = self.read_error {
                return Err(io::Error::from(kind));
            }
            let len = self.grown_to.unwrap_or(5).min(limit + 1);
            Ok(vec![b'x'; len as usize])
        }
    }

    fn scripted(repo: ScriptedRepository, max_file_size: u64) -> LogFileService<ScriptedRepository> {
        LogFileService::new(
            repo,
            LogFileServiceOptions {
                max_file_size,
                ..LogFileServiceOptions::default()
            },
        )
    }

    fn fs_service() -> LogFileService<LogFileFsAdapter> {
        LogFileService::new(LogFileFsAdapter::new(), LogFileServiceOptions::default())
    }

    fn write_with_mtime(path: &Path, content: &[u8], mtime: SystemTime) {
        fs::write(path, content).unwrap();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
    }

    #[tokio::test]
    async fn invalid_names_never_touch_the_filesystem() {
        let service = LogFileService::new(CountingRepository::default(), LogFileServiceOptions::default());

        for name in ["../server.js", "a/b.log", "..\\c.txt", "x..log"] {
            let err = service.read_file(Path::new("/logs"), name).await.unwrap_err();
            assert_eq!(err, AppError::InvalidFilename, "{name}");
        }
        for name in ["readme.md", "server.js", "app.log.gz"] {
            let err = service.read_file(Path::new("/logs"), name).await.unwrap_err();
            assert_eq!(err, AppError::InvalidFileType, "{name}");
        }

        assert_eq!(service.repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unexpected_io_errors_become_internal_errors() {
        let service = LogFileService::new(CountingRepository::default(), LogFileServiceOptions::default());

        let err = service.read_file(Path::new("/logs"), "app.log").await.unwrap_err();
        assert!(matches!(err, AppError::InternalError(_)));

        let err = service.list_available_files(Path::new("/logs")).await.unwrap_err();
        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[tokio::test]
    async fn permission_errors_map_to_permission_denied() {
        let dir_denied = scripted(
            ScriptedRepository {
                metadata_error: Some(ErrorKind::PermissionDenied),
                ..ScriptedRepository::default()
            },
            DEFAULT_MAX_FILE_SIZE,
        );
        let err = dir_denied.list_available_files(Path::new("/logs")).await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));
        assert_eq!(err.status_code().as_u16(), 403);
        assert_eq!(err.code(), "PermissionDenied");

        let err = dir_denied.read_file(Path::new("/logs"), "app.log").await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));

        let read_denied = scripted(
            ScriptedRepository {
                read_error: Some(ErrorKind::PermissionDenied),
                ..ScriptedRepository::default()
            },
            DEFAULT_MAX_FILE_SIZE,
        );
        let err = read_denied.read_file(Path::new("/logs"), "app.log").await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn is_a_directory_from_the_read_maps_to_is_a_directory() {
        let service = scripted(
            ScriptedRepository {
                read_error: Some(ErrorKind::IsADirectory),
                ..ScriptedRepository::default()
            },
            DEFAULT_MAX_FILE_SIZE,
        );
        let err = service.read_file(Path::new("/logs"), "app.log").await.unwrap_err();
        assert_eq!(err, AppError::IsADirectory);
    }

    #[tokio::test]
    async fn growth_after_stat_is_caught_with_a_bounded_read() {
        let service = scripted(
            ScriptedRepository {
                grown_to: Some(1_000_000),
                ..ScriptedRepository::default()
            },
            10,
        );

        let err = service.read_file(Path::new("/logs"), "app.log").await.unwrap_err();
        assert_eq!(err, AppError::PayloadTooLarge { size: 11, limit: 10 });
        assert_eq!(*service.repo.read_limit.lock().unwrap(), Some(10));

        let content = scripted(ScriptedRepository::default(), 10)
            .read_file(Path::new("/logs"), "app.log")
            .await
            .unwrap();
        assert_eq!(content.size_bytes, 5);
    }

    #[tokio::test]
    async fn lists_only_log_and_txt_files_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let t1 = SystemTime::now() - Duration::from_secs(3600);
        let t2 = SystemTime::now() - Duration::from_secs(60);

        write_with_mtime(&dir.path().join("old.txt"), b"old\n", t1);
        write_with_mtime(&dir.path().join("app.log"), b"newer entry\n", t2);
        write_with_mtime(&dir.path().join("readme.md"), b"# docs", t2);
        fs::create_dir(dir.path().join("archive.log")).unwrap();

        let listing = fs_service().list_with_totals(dir.path()).await.unwrap();
        let names: Vec<_> = listing.files.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["app.log", "old.txt"]);
        assert_eq!(listing.count(), 2);
        assert_eq!(listing.total_size, 12 + 4);
        assert_eq!(listing.files[0].extension, "log");
        assert_eq!(listing.files[1].extension, "txt");
        assert_eq!(listing.files[0].path, dir.path().join("app.log"));
    }

    #[tokio::test]
    async fn equal_timestamps_are_ordered_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let t = SystemTime::now() - Duration::from_secs(10);
        for name in ["c.log", "a.log", "b.txt"] {
            write_with_mtime(&dir.path().join(name), b"x", t);
        }

        let files = fs_service().list_available_files(dir.path()).await.unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.log", "b.txt", "c.log"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinks_to_directories_are_not_listed() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("linked.log")).unwrap();
        fs::write(dir.path().join("app.log"), "x").unwrap();

        let files = fs_service().list_available_files(dir.path()).await.unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["app.log"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn dangling_symlinks_are_skipped_without_failing_the_listing() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("broken.log")).unwrap();
        fs::write(dir.path().join("app.log"), "x").unwrap();

        let files = fs_service().list_available_files(dir.path()).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "app.log");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinks_escaping_the_root_are_confined() {
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("secret.log"), "secret").unwrap();

        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path().join("secret.log"), dir.path().join("leak.log")).unwrap();
        fs::write(dir.path().join("inner.txt"), "inner").unwrap();
        std::os::unix::fs::symlink(dir.path().join("inner.txt"), dir.path().join("alias.log")).unwrap();

        let service = fs_service();
        let files = service.list_available_files(dir.path()).await.unwrap();
        let mut names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["alias.log", "inner.txt"]);

        let err = service.read_file(dir.path(), "leak.log").await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));
        assert_eq!(service.read_file(dir.path(), "alias.log").await.unwrap().text, "inner");

        let open = LogFileService::new(
            LogFileFsAdapter::new(),
            LogFileServiceOptions {
                confine_to_root: false,
                ..LogFileServiceOptions::default()
            },
        );
        assert_eq!(open.read_file(dir.path(), "leak.log").await.unwrap().text, "secret");
    }

    #[tokio::test]
    async fn missing_directory_is_directory_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = fs_service()
            .list_available_files(&dir.path().join("nope"))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::DirectoryNotFound);
    }

    #[tokio::test]
    async fn a_file_in_place_of_the_directory_is_directory_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("logs");
        fs::write(&file, "not a dir").unwrap();

        let err = fs_service().list_available_files(&file).await.unwrap_err();
        assert_eq!(err, AppError::DirectoryNotFound);
    }

    #[tokio::test]
    async fn reads_content_with_stats() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.log"), "first\nsecond\nthird").unwrap();

        let content = fs_service().read_file(dir.path(), "app.log").await.unwrap();
        assert_eq!(content.text, "first\nsecond\nthird");
        assert_eq!(content.size_bytes, 18);
        assert_eq!(content.line_count, 3);
    }

    #[tokio::test]
    async fn directory_named_like_a_log_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested.log")).unwrap();

        let err = fs_service().read_file(dir.path(), "nested.log").await.unwrap_err();
        assert_eq!(err, AppError::IsADirectory);
        assert_eq!(err.status_code().as_u16(), 400);
    }

    #[tokio::test]
    async fn file_deleted_after_listing_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rotating.log"), "soon gone").unwrap();

        let service = fs_service();
        let files = service.list_available_files(dir.path()).await.unwrap();
        assert_eq!(files.len(), 1);

        fs::remove_file(dir.path().join("rotating.log")).unwrap();

        let err = service.read_file(dir.path(), "rotating.log").await.unwrap_err();
        assert_eq!(err, AppError::FileNotFound);
        assert_eq!(err.status_code().as_u16(), 404);
    }

    #[tokio::test]
    async fn size_limit_is_inclusive() {
        let dir = tempfile::tempdir().unwrap();
        let limit = DEFAULT_MAX_FILE_SIZE;

        File::create(dir.path().join("exact.log"))
            .unwrap()
            .set_len(limit)
            .unwrap();
        File::create(dir.path().join("over.log"))
            .unwrap()
            .set_len(limit + 1)
            .unwrap();

        let service = fs_service();
        let content = service.read_file(dir.path(), "exact.log").await.unwrap();
        assert_eq!(content.size_bytes, limit);

        let err = service.read_file(dir.path(), "over.log").await.unwrap_err();
        assert_eq!(
            err,
            AppError::PayloadTooLarge {
                size: limit + 1,
                limit
            }
        );
        assert_eq!(err.status_code().as_u16(), 413);
        assert!(err.to_string().contains("50.00MB"));
    }

    #[tokio::test]
    async fn smaller_configured_limit_is_honoured() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.log"), "0123456789").unwrap();

        let service = LogFileService::new(
            LogFileFsAdapter::new(),
            LogFileServiceOptions {
                max_file_size: 9,
                ..LogFileServiceOptions::default()
            },
        );
        let err = service.read_file(dir.path(), "app.log").await.unwrap_err();
        assert_eq!(err, AppError::PayloadTooLarge { size: 10, limit: 9 });
    }
}
