//! Task records and their log line format.

use std::fmt;

use chrono::{DateTime, Local};

/// Timestamp format of a log line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One completed work phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    completed_at: DateTime<Local>,
    name: String,
    minutes: u32,
}

impl TaskRecord {
    /// Creates a record completed now.
    pub fn new(name: impl Into<String>, minutes: u32) -> Self {
        Self::with_timestamp(Local::now(), name, minutes)
    }

    /// Creates a record with an explicit completion time.
    pub fn with_timestamp(
        completed_at: DateTime<Local>,
        name: impl Into<String>,
        minutes: u32,
    ) -> Self {
        Self {
            completed_at,
            name: name.into(),
            minutes,
        }
    }

    /// Builds a record from the raw prompt answer.
    ///
    /// Returns `None` when the answer is empty after cleanup.
    pub fn from_input(raw: &str, minutes: u32) -> Option<Self> {
        sanitize_task_name(raw).map(|name| Self::new(name, minutes))
    }

    /// Returns the task name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the work duration in minutes.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Formats the record as one log line, including the trailing newline.
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for TaskRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}分)",
            self.completed_at.format(TIMESTAMP_FORMAT),
            self.name,
            self.minutes
        )
    }
}

/// Cleans a task name so that it fits on one log line.
///
/// Surrounding whitespace is trimmed and every run of line breaks is
/// replaced by a single space. Returns `None` if nothing is left.
pub fn sanitize_task_name(raw: &str) -> Option<String> {
    let joined = raw
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_line_format() {
        let record = TaskRecord::with_timestamp(fixed_time(), "design doc", 25);
        assert_eq!(record.to_line(), "[2024-03-09 14:05:07] design doc (25分)\n");
    }

    #[test]
    fn test_accessors() {
        let record = TaskRecord::with_timestamp(fixed_time(), "review", 50);
        assert_eq!(record.name(), "review");
        assert_eq!(record.minutes(), 50);
    }

    #[test]
    fn test_sanitize_trims() {
        assert_eq!(sanitize_task_name("  write tests "), Some("write tests".to_string()));
    }

    #[test]
    fn test_sanitize_joins_lines() {
        assert_eq!(
            sanitize_task_name("fix bug\r\nand deploy\n"),
            Some("fix bug and deploy".to_string())
        );
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_task_name(""), None);
        assert_eq!(sanitize_task_name(" \n \r\n"), None);
    }

    #[test]
    fn test_from_input() {
        let record = TaskRecord::from_input("猫の世話", 25).unwrap();
        assert_eq!(record.name(), "猫の世話");
        assert!(TaskRecord::from_input("   ", 25).is_none());
    }
}
