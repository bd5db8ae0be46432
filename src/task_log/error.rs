//! Task log error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while appending to the task log.
#[derive(Debug, Error)]
pub enum TaskLogError {
    /// The log file could not be opened or created.
    #[error("タスクログを開けませんでした: {}: {source}", .path.display())]
    Open {
        /// Log file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The record could not be written.
    #[error("タスクログへの書き込みに失敗しました: {}: {source}", .path.display())]
    Write {
        /// Log file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Generic logger failure.
    #[error("タスクログエラー: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskLogError::Open {
            path: PathBuf::from("/tmp/tasks.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = err.to_string();
        assert!(text.contains("/tmp/tasks.txt"));
        assert!(text.contains("denied"));

        let err = TaskLogError::Other("mock".to_string());
        assert!(err.to_string().contains("mock"));
    }
}
