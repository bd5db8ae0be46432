//! File-backed append log.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::TaskLogError;
use super::record::TaskRecord;
use super::TaskLogger;

/// Appends task records to a UTF-8 text file, one line per record.
///
/// The file is created on first use and never truncated.
#[derive(Debug, Clone)]
pub struct FileTaskLogger {
    path: PathBuf,
}

impl FileTaskLogger {
    /// Creates a logger writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskLogger for FileTaskLogger {
    fn append(&self, record: &TaskRecord) -> Result<(), TaskLogError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| TaskLogError::Open {
                path: self.path.clone(),
                source,
            })?;

        file.write_all(record.to_line().as_bytes())
            .map_err(|source| TaskLogError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), task = record.name(), "Task recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_creates_file_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        let logger = FileTaskLogger::new(&path);
        let at = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        logger
            .append(&TaskRecord::with_timestamp(at, "first", 25))
            .unwrap();
        logger
            .append(&TaskRecord::with_timestamp(at, "second", 30))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "[2024-01-02 03:04:05] first (25分)\n[2024-01-02 03:04:05] second (30分)\n"
        );
    }

    #[test]
    fn test_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        std::fs::write(&path, "old line\n").unwrap();

        FileTaskLogger::new(&path)
            .append(&TaskRecord::new("new", 5))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("old line\n"));
        assert!(contents.ends_with("new (5分)\n"));
    }

    #[test]
    fn test_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("tasks.txt");

        let result = FileTaskLogger::new(&path).append(&TaskRecord::new("x", 1));

        assert!(matches!(result, Err(TaskLogError::Open { .. })));
    }
}
