//! Core data types for the cat Pomodoro timer.
//!
//! This module defines the data structures used for:
//! - Phase and run status of the session
//! - The raw duration field values and their validation
//! - Countdown formatting

use std::fmt;

use crate::timer::TimerError;

/// Default value of the work duration field.
pub const DEFAULT_WORK_MINUTES: &str = "25";

/// Default value of the break duration field.
pub const DEFAULT_BREAK_MINUTES: &str = "5";

// ============================================================================
// Phase
// ============================================================================

/// One of the two alternating interval types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Focused work interval
    #[default]
    Work,
    /// Break interval
    Break,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }

    /// Returns the phase that follows this one.
    pub fn next(&self) -> Phase {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }

    /// Returns the status line shown while this phase is counting.
    pub fn status_text(&self) -> &'static str {
        match self {
            Phase::Work => "全集中！作業中ニャ！",
            Phase::Break => "休憩タイムニャ。",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TimerStatus
// ============================================================================

/// Run status of the session, orthogonal to [`Phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerStatus {
    /// Not counting; waiting for a start request
    #[default]
    Idle,
    /// Countdown is ticking
    Counting,
    /// Countdown suspended with time remaining
    Paused,
    /// Work phase finished; waiting for the user to name the task
    AwaitingTaskName,
}

impl TimerStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Counting => "counting",
            TimerStatus::Paused => "paused",
            TimerStatus::AwaitingTaskName => "awaiting_task_name",
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// The single, process-lifetime state of the timer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    /// Active phase
    pub phase: Phase,
    /// Seconds left in the current countdown
    pub remaining_seconds: u64,
    /// Run status
    pub status: TimerStatus,
    /// Minutes in effect for the current phase, captured at start
    pub phase_minutes: u32,
}

impl Session {
    /// Creates the initial session: work phase, idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while the countdown is actively ticking.
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Counting
    }

    /// Returns true if the countdown is paused.
    pub fn is_paused(&self) -> bool {
        self.status == TimerStatus::Paused
    }
}

// ============================================================================
// DurationInputs
// ============================================================================

/// Raw text of the two duration fields.
///
/// The fields are kept as the user typed them and validated only when a
/// phase starts, so an edit between phases takes effect at the next start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationInputs {
    /// Work minutes field
    pub work: String,
    /// Break minutes field
    pub break_: String,
}

impl Default for DurationInputs {
    fn default() -> Self {
        Self {
            work: DEFAULT_WORK_MINUTES.to_string(),
            break_: DEFAULT_BREAK_MINUTES.to_string(),
        }
    }
}

impl DurationInputs {
    /// Creates inputs from the two field values.
    pub fn new(work: impl Into<String>, break_: impl Into<String>) -> Self {
        Self {
            work: work.into(),
            break_: break_.into(),
        }
    }

    /// Returns the raw field for the given phase.
    pub fn field(&self, phase: Phase) -> &str {
        match phase {
            Phase::Work => &self.work,
            Phase::Break => &self.break_,
        }
    }

    /// Parses the field for the given phase as minutes.
    pub fn minutes_for(&self, phase: Phase) -> Result<u32, TimerError> {
        parse_minutes(phase, self.field(phase))
    }
}

/// Parses a duration field as a positive number of minutes.
///
/// Surrounding whitespace is ignored. Zero, negative and non-numeric
/// values are rejected.
pub fn parse_minutes(phase: Phase, input: &str) -> Result<u32, TimerError> {
    match input.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(TimerError::InvalidDurationInput {
            phase,
            input: input.to_string(),
        }),
    }
}

/// Formats seconds as `MM:SS`.
///
/// Minutes are zero-padded to two digits and grow past two digits for
/// durations of 100 minutes or more.
pub fn format_countdown(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// Tests
// ============================================================================
