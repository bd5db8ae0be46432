//! Timer error types.

use thiserror::Error;

use crate::types::Phase;

/// Errors returned by the timer state machine operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// A duration field did not parse as a positive integer.
    #[error("{phase}の時間が正の整数ではありません: '{input}'")]
    InvalidDurationInput {
        /// Phase whose field was read
        phase: Phase,
        /// Raw field text
        input: String,
    },

    /// Pause or stop requested while nothing is counting.
    #[error("タイマーは実行されていません")]
    NotRunning,

    /// Resume requested while the timer is not paused.
    #[error("タイマーは一時停止していません")]
    NotPaused,
}

impl TimerError {
    /// Returns the title of the error dialog.
    #[must_use]
    pub fn title(&self) -> &'static str {
        "エラー"
    }

    /// Returns the message shown to the user in the error dialog.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidDurationInput { .. } => "数字を入力してニャ！".to_string(),
            other => other.to_string(),
        }
    }
}
