//! Timer state machine for the cat Pomodoro timer.
//!
//! The machine owns the [`Session`] and never touches the outside world.
//! Every operation returns the list of [`Effect`]s the caller must perform,
//! in order. This keeps the phase chaining (work → prompt → break → work)
//! testable without a terminal, a clock or a file system.
//!
//! ```text
//!            start                 tick (remaining == 0)
//!   Idle ─────────────▶ Counting ─────────────────────▶ finish_period
//!    ▲  ◀── stop ──────  │  ▲                              │
//!    │                pause resume/start                   │ work: prompt
//!    │                   ▼  │                              ▼
//!    │                  Paused                    AwaitingTaskName
//!    │                                                     │ task name
//!    └──── auto-start fails ◀── next phase ◀───────────────┘
//! ```

use std::time::Duration;

use tracing::{debug, info};

use crate::task_log::TaskRecord;
use crate::types::{format_countdown, DurationInputs, Phase, Session, TimerStatus};

use super::error::TimerError;

/// Interval between two ticks of a running countdown.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Status line shown while the timer is idle.
pub const READY_TEXT: &str = "準備はいいニャ？";

/// Status line shown while the timer is paused.
pub const PAUSED_TEXT: &str = "一時停止中ニャ。";

// ============================================================================
// Effect / TimerInput
// ============================================================================

/// Side effects requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the status line
    SetStatusText(String),
    /// Show the image of the given phase
    SetActiveImage(Phase),
    /// Replace the countdown display (`MM:SS`)
    SetCountdown(String),
    /// Fire the next tick after the given delay
    ScheduleTick(Duration),
    /// Drop any pending tick
    CancelTick,
    /// Play the end-of-period alert
    Alert,
    /// Ask the user what task was just finished
    PromptTaskName {
        /// Prompt title
        title: String,
        /// Prompt message
        message: String,
    },
    /// Append a completed task to the task log
    LogTask(TaskRecord),
    /// Show an informational dialog
    ShowInfo {
        /// Dialog title
        title: String,
        /// Dialog message
        message: String,
    },
    /// Show an error dialog
    ShowError {
        /// Dialog title
        title: String,
        /// Dialog message
        message: String,
    },
}

impl Effect {
    fn info(title: &str, message: &str) -> Self {
        Effect::ShowInfo {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    fn error(err: &TimerError) -> Self {
        Effect::ShowError {
            title: err.title().to_string(),
            message: err.user_message(),
        }
    }
}

/// Events fed to [`TimerMachine::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerInput {
    /// The user pressed start
    Start,
    /// One second elapsed
    Tick,
    /// The user answered the task-name prompt (`None` if canceled)
    TaskNamed(Option<String>),
    /// The user pressed pause
    Pause,
    /// The user pressed resume
    Resume,
    /// The user pressed stop
    Stop,
}

// ============================================================================
// TimerMachine
// ============================================================================

/// Countdown state machine alternating between work and break phases.
#[derive(Debug, Clone, Default)]
pub struct TimerMachine {
    session: Session,
}

impl TimerMachine {
    /// Creates a machine in the initial state (work phase, idle).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Applies one input and returns the effects to perform.
    ///
    /// Operation errors are turned into a [`Effect::ShowError`] so the
    /// caller has a single path for everything the user triggers.
    pub fn handle(&mut self, input: TimerInput, inputs: &DurationInputs) -> Vec<Effect> {
        let result = match input {
            TimerInput::Start => self.start(inputs),
            TimerInput::Tick => Ok(self.tick(inputs)),
            TimerInput::TaskNamed(name) => Ok(self.submit_task_name(name, inputs)),
            TimerInput::Pause => self.pause(),
            TimerInput::Resume => self.resume(),
            TimerInput::Stop => self.stop(),
        };

        result.unwrap_or_else(|e| vec![Effect::error(&e)])
    }

    /// Starts the current phase with the duration typed in its field.
    ///
    /// Ignored while counting or while waiting for a task name. A paused
    /// countdown is resumed instead of restarted.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::InvalidDurationInput` if the field for the
    /// current phase is not a positive integer. The session is unchanged.
    pub fn start(&mut self, inputs: &DurationInputs) -> Result<Vec<Effect>, TimerError> {
        match self.session.status {
            TimerStatus::Counting | TimerStatus::AwaitingTaskName => {
                debug!(
                    status = self.session.status.as_str(),
                    "Start ignored, timer is busy"
                );
                return Ok(Vec::new());
            }
            TimerStatus::Paused => return self.resume(),
            TimerStatus::Idle => {}
        }

        let phase = self.session.phase;
        let minutes = inputs.minutes_for(phase)?;

        self.session.phase_minutes = minutes;
        self.session.remaining_seconds = u64::from(minutes) * 60;
        self.session.status = TimerStatus::Counting;

        info!(phase = phase.as_str(), minutes, "Phase started");

        Ok(vec![
            Effect::SetStatusText(phase.status_text().to_string()),
            Effect::SetActiveImage(phase),
            Effect::ScheduleTick(Duration::ZERO),
        ])
    }

    /// Advances a running countdown by one second.
    ///
    /// Ticks that arrive while the countdown is not running are stale and
    /// ignored.
    pub fn tick(&mut self, inputs: &DurationInputs) -> Vec<Effect> {
        if !self.session.is_running() {
            debug!(
                status = self.session.status.as_str(),
                "Stale tick ignored"
            );
            return Vec::new();
        }

        let remaining = self.session.remaining_seconds;
        let mut effects = vec![Effect::SetCountdown(format_countdown(remaining))];

        if remaining > 0 {
            self.session.remaining_seconds -= 1;
            effects.push(Effect::ScheduleTick(TICK_INTERVAL));
        } else {
            self.finish_period(inputs, &mut effects);
        }

        effects
    }

    /// Receives the answer to the task-name prompt and enters the break.
    ///
    /// A non-empty name produces a task record; an empty or canceled
    /// answer does not. Ignored unless a task name is being waited for.
    pub fn submit_task_name(
        &mut self,
        name: Option<String>,
        inputs: &DurationInputs,
    ) -> Vec<Effect> {
        if self.session.status != TimerStatus::AwaitingTaskName {
            debug!("Task name received while not waiting for one, ignored");
            return Vec::new();
        }

        let mut effects = Vec::new();

        match name.and_then(|n| TaskRecord::from_input(&n, self.session.phase_minutes)) {
            Some(record) => effects.push(Effect::LogTask(record)),
            None => debug!("No task name given, nothing logged"),
        }

        self.session.status = TimerStatus::Idle;
        self.enter_phase(Phase::Break, inputs, &mut effects);
        effects
    }

    /// Pauses a running countdown, keeping the remaining time.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::NotRunning` if the countdown is not running.
    pub fn pause(&mut self) -> Result<Vec<Effect>, TimerError> {
        if !self.session.is_running() {
            return Err(TimerError::NotRunning);
        }

        self.session.status = TimerStatus::Paused;
        info!(remaining = self.session.remaining_seconds, "Timer paused");

        Ok(vec![
            Effect::CancelTick,
            Effect::SetStatusText(PAUSED_TEXT.to_string()),
        ])
    }

    /// Resumes a paused countdown.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::NotPaused` if the timer is not paused.
    pub fn resume(&mut self) -> Result<Vec<Effect>, TimerError> {
        if !self.session.is_paused() {
            return Err(TimerError::NotPaused);
        }

        self.session.status = TimerStatus::Counting;
        info!(remaining = self.session.remaining_seconds, "Timer resumed");

        // Paused before the first tick: the full duration was never shown.
        // Otherwise the second shown before the pause has not elapsed yet.
        let full = u64::from(self.session.phase_minutes) * 60;
        let delay = if self.session.remaining_seconds == full {
            Duration::ZERO
        } else {
            TICK_INTERVAL
        };

        Ok(vec![
            Effect::SetStatusText(self.session.phase.status_text().to_string()),
            Effect::ScheduleTick(delay),
        ])
    }

    /// Stops the countdown and returns to idle in the same phase.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::NotRunning` unless counting or paused.
    pub fn stop(&mut self) -> Result<Vec<Effect>, TimerError> {
        if !self.session.is_running() && !self.session.is_paused() {
            return Err(TimerError::NotRunning);
        }

        self.session.status = TimerStatus::Idle;
        self.session.remaining_seconds = 0;
        info!(phase = self.session.phase.as_str(), "Timer stopped");

        Ok(vec![
            Effect::CancelTick,
            Effect::SetCountdown(format_countdown(0)),
            Effect::SetStatusText(READY_TEXT.to_string()),
        ])
    }

    /// Completes the current phase.
    fn finish_period(&mut self, inputs: &DurationInputs, effects: &mut Vec<Effect>) {
        let finished = self.session.phase;
        info!(phase = finished.as_str(), "Phase finished");

        self.session.status = TimerStatus::Idle;
        effects.push(Effect::Alert);

        match finished {
            Phase::Work => {
                // Suspended until submit_task_name.
                self.session.status = TimerStatus::AwaitingTaskName;
                effects.push(Effect::PromptTaskName {
                    title: "タスク完了".to_string(),
                    message: "何の作業が終わったニャ？".to_string(),
                });
            }
            Phase::Break => self.enter_phase(Phase::Work, inputs, effects),
        }
    }

    /// Switches to `next`, announces it and auto-starts it.
    fn enter_phase(&mut self, next: Phase, inputs: &DurationInputs, effects: &mut Vec<Effect>) {
        self.session.phase = next;
        effects.push(match next {
            Phase::Break => Effect::info("お疲れ様！", "休憩に入るニャ！"),
            Phase::Work => Effect::info("休憩終了", "さあ、次の作業を始めるニャ！"),
        });

        match self.start(inputs) {
            Ok(started) => effects.extend(started),
            Err(e) => {
                info!(phase = next.as_str(), error = %e, "Auto-start failed, staying idle");
                effects.push(Effect::SetStatusText(READY_TEXT.to_string()));
                effects.push(Effect::error(&e));
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
