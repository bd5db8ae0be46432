//! Task log for completed work phases.
//!
//! Each finished work phase the user names becomes one [`TaskRecord`],
//! appended as a line of the form:
//!
//! ```text
//! [2024-03-09 14:05:07] design doc (25分)
//! ```
//!
//! The log is write-only from the timer's point of view.

mod error;
mod file;
mod record;

pub use error::TaskLogError;
pub use file::FileTaskLogger;
pub use record::{sanitize_task_name, TaskRecord};

/// Default log file, relative to the working directory.
pub const DEFAULT_TASK_LOG_FILE: &str = "tasks.txt";

/// Trait for durable task record storage.
pub trait TaskLogger {
    /// Appends one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be stored.
    fn append(&self, record: &TaskRecord) -> Result<(), TaskLogError>;
}

/// Mock task logger for testing.
///
/// Clones share the same record list.
#[derive(Debug, Clone, Default)]
pub struct MockTaskLogger {
    records: std::sync::Arc<std::sync::Mutex<Vec<TaskRecord>>>,
    should_fail: std::sync::Arc<std::sync::atomic::AtomicBool>,
}

impl MockTaskLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn records(&self) -> Vec<TaskRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl TaskLogger for MockTaskLogger {
    fn append(&self, record: &TaskRecord) -> Result<(), TaskLogError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(TaskLogError::Other("Mock failure".to_string()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
