//! Event loop of the cat Pomodoro timer.
//!
//! [`App`] owns the state machine, the two duration fields, the tick handle
//! and the collaborators. Input lines, tick deadlines and the shutdown
//! signal are all handled on one task, so the session has a single writer
//! and no locking is needed.

use std::future::Future;
use std::ops::ControlFlow;
use std::str::Utf8Error;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::assets::PhaseImages;
use crate::cli::{parse_command, Presenter, UserCommand};
use crate::notifier::Notifier;
use crate::task_log::TaskLogger;
use crate::timer::{wait_for_tick, Effect, TickScheduler, TimerInput, TimerMachine, READY_TEXT};
use crate::types::{format_countdown, DurationInputs, Phase, Session, TimerStatus};

/// Title of the dialog shown for an undecodable input line.
const INPUT_ERROR_TITLE: &str = "入力エラー";

/// Message of the dialog shown for an undecodable input line.
const INPUT_ERROR_MESSAGE: &str = "文字が読み取れなかったニャ。UTF-8 でもう一度入力してニャ！";

/// The timer application.
pub struct App<P, N, L> {
    machine: TimerMachine,
    inputs: DurationInputs,
    scheduler: TickScheduler,
    images: PhaseImages,
    presenter: P,
    notifier: N,
    logger: L,
}

impl<P, N, L> App<P, N, L>
where
    P: Presenter,
    N: Notifier,
    L: TaskLogger,
{
    /// Creates the application with initial field values.
    pub fn new(
        inputs: DurationInputs,
        images: PhaseImages,
        presenter: P,
        notifier: N,
        logger: L,
    ) -> Self {
        Self {
            machine: TimerMachine::new(),
            inputs,
            scheduler: TickScheduler::new(),
            images,
            presenter,
            notifier,
            logger,
        }
    }

    /// Returns the current session.
    pub fn session(&self) -> &Session {
        self.machine.session()
    }

    /// Returns the tick handle.
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Draws the initial screen.
    pub fn render_initial(&mut self) {
        self.presenter.set_status_text(READY_TEXT);
        self.presenter
            .set_active_image(Phase::Work, self.images.get(Phase::Work));
        self.presenter.set_countdown_display(&format_countdown(0));
        self.presenter.show_fields(&self.inputs);
        self.presenter.show_help();
    }

    /// Runs until `input` is exhausted, `quit` is entered or `shutdown`
    /// completes.
    ///
    /// A line that is not valid UTF-8 is rejected with an error dialog and
    /// otherwise ignored, so a pending task name can be typed again.
    ///
    /// # Errors
    ///
    /// Returns an error if reading `input` fails.
    pub async fn run<R, S>(&mut self, mut input: R, shutdown: S) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        S: Future<Output = ()>,
    {
        // Survives canceled reads, so a partly received line is kept.
        let mut buf = Vec::new();
        tokio::pin!(shutdown);

        self.render_initial();
        info!("Timer ready");

        loop {
            let deadline = self.scheduler.deadline();

            tokio::select! {
                read = input.read_until(b'\n', &mut buf) => {
                    let read = read.context("端末からの入力の読み取りに失敗しました")?;
                    if read == 0 && buf.is_empty() {
                        debug!("Input closed");
                        break;
                    }
                    let flow = match decode_line(&buf) {
                        Ok(line) => self.handle_line(line),
                        Err(e) => {
                            warn!(bytes = buf.len(), "Input line is not UTF-8: {}", e);
                            self.presenter.show_error(INPUT_ERROR_TITLE, INPUT_ERROR_MESSAGE);
                            ControlFlow::Continue(())
                        }
                    };
                    buf.clear();
                    if flow.is_break() {
                        break;
                    }
                }
                _ = wait_for_tick(deadline) => {
                    if self.scheduler.mark_fired() {
                        self.on_tick();
                    }
                }
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Handles one input line.
    ///
    /// While a task name is awaited the whole line is the answer; an empty
    /// line skips logging.
    pub fn handle_line(&mut self, line: &str) -> ControlFlow<()> {
        if self.session().status == TimerStatus::AwaitingTaskName {
            let name = Some(line.to_string()).filter(|n| !n.trim().is_empty());
            self.dispatch(TimerInput::TaskNamed(name));
            return ControlFlow::Continue(());
        }

        match parse_command(line) {
            UserCommand::Start => self.dispatch(TimerInput::Start),
            UserCommand::Pause => self.dispatch(TimerInput::Pause),
            UserCommand::Resume => self.dispatch(TimerInput::Resume),
            UserCommand::Stop => self.dispatch(TimerInput::Stop),
            UserCommand::SetWork(value) => {
                self.inputs.work = value;
                self.presenter.show_fields(&self.inputs);
            }
            UserCommand::SetBreak(value) => {
                self.inputs.break_ = value;
                self.presenter.show_fields(&self.inputs);
            }
            UserCommand::ShowFields => self.presenter.show_fields(&self.inputs),
            UserCommand::Help => self.presenter.show_help(),
            UserCommand::Quit => return ControlFlow::Break(()),
            UserCommand::Empty => {}
            UserCommand::Unknown(text) => {
                debug!(input = %text, "Unknown command");
                self.presenter.show_help();
            }
        }

        ControlFlow::Continue(())
    }

    /// Handles one elapsed second.
    pub fn on_tick(&mut self) {
        self.dispatch(TimerInput::Tick);
    }

    /// Cancels the pending tick before exiting.
    pub fn shutdown(&mut self) {
        if self.scheduler.is_pending() {
            debug!("Canceling pending tick");
        }
        self.scheduler.cancel();
        info!(
            phase = self.session().phase.as_str(),
            status = self.session().status.as_str(),
            "Timer shut down"
        );
    }

    fn dispatch(&mut self, input: TimerInput) {
        let effects = self.machine.handle(input, &self.inputs);
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SetStatusText(text) => self.presenter.set_status_text(&text),
                Effect::SetActiveImage(phase) => {
                    self.presenter.set_active_image(phase, self.images.get(phase));
                }
                Effect::SetCountdown(text) => self.presenter.set_countdown_display(&text),
                Effect::ScheduleTick(delay) => self.scheduler.schedule(delay),
                Effect::CancelTick => self.scheduler.cancel(),
                Effect::Alert => self.notifier.alert(),
                Effect::PromptTaskName { title, message } => {
                    self.presenter.end_countdown_line();
                    self.notifier.request_task_name(&title, &message);
                }
                Effect::LogTask(record) => {
                    if let Err(e) = self.logger.append(&record) {
                        warn!(task = record.name(), "Task record dropped: {}", e);
                        self.presenter.show_error("記録エラー", &e.to_string());
                    }
                }
                Effect::ShowInfo { title, message } => self.presenter.show_info(&title, &message),
                Effect::ShowError { title, message } => {
                    self.presenter.show_error(&title, &message);
                }
            }
        }
    }
}

/// Strips the line terminator (`\n` or `\r\n`) and decodes the line.
fn decode_line(bytes: &[u8]) -> Result<&str, Utf8Error> {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    std::str::from_utf8(bytes)
}

impl<P, N, L> std::fmt::Debug for App<P, N, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("session", self.machine.session())
            .field("inputs", &self.inputs)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{MockPresenter, PresenterCall};
    use crate::notifier::MockNotifier;
    use crate::task_log::MockTaskLogger;

    type TestApp = App<MockPresenter, MockNotifier, MockTaskLogger>;

    fn create_app(work: &str, break_: &str) -> (TestApp, MockPresenter, MockNotifier, MockTaskLogger) {
        let presenter = MockPresenter::new();
        let notifier = MockNotifier::new();
        let logger = MockTaskLogger::new();
        let app = App::new(
            DurationInputs::new(work, break_),
            PhaseImages::placeholders(),
            presenter.clone(),
            notifier.clone(),
            logger.clone(),
        );
        (app, presenter, notifier, logger)
    }

    /// Fires ticks until none is pending.
    fn drain_ticks(app: &mut TestApp) -> usize {
        let mut count = 0;
        while app.scheduler.mark_fired() {
            app.on_tick();
            count += 1;
        }
        count
    }

    #[test]
    fn test_start_schedules_first_tick() {
        let (mut app, presenter, _, _) = create_app("1", "1");

        let _ = app.handle_line("start");

        assert!(app.scheduler().is_pending());
        assert!(app.session().is_running());
        assert!(presenter.calls().contains(&PresenterCall::Image(Phase::Work)));
    }

    #[test]
    fn test_invalid_field_shows_error_and_stays_idle() {
        let (mut app, presenter, _, _) = create_app("1", "1");

        let _ = app.handle_line("work abc");
        let _ = app.handle_line("s");

        assert_eq!(
            presenter.errors(),
            vec![("エラー".to_string(), "数字を入力してニャ！".to_string())]
        );
        assert!(!app.session().is_running());
        assert!(!app.scheduler().is_pending());
    }

    #[test]
    fn test_full_work_phase_prompts_then_logs() {
        let (mut app, presenter, notifier, logger) = create_app("1", "5");
        let _ = app.handle_line("start");

        let ticks = drain_ticks(&mut app);

        assert_eq!(ticks, 61);
        assert_eq!(notifier.alert_count(), 1);
        assert_eq!(notifier.prompts().len(), 1);
        assert_eq!(presenter.countdowns().last().map(String::as_str), Some("00:00"));
        // The prompt starts below the countdown line.
        assert_eq!(
            presenter.calls().last(),
            Some(&PresenterCall::EndCountdownLine)
        );

        // The answer line is the task name, not a command.
        let _ = app.handle_line("quit");

        let records = logger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "quit");
        assert_eq!(records[0].minutes(), 1);
        assert_eq!(app.session().phase, Phase::Break);
        assert_eq!(app.session().remaining_seconds, 300);
        assert!(app.scheduler().is_pending());
    }

    #[test]
    fn test_empty_answer_logs_nothing() {
        let (mut app, _, _, logger) = create_app("1", "5");
        let _ = app.handle_line("start");
        drain_ticks(&mut app);

        let _ = app.handle_line("   ");

        assert!(logger.records().is_empty());
        assert_eq!(app.session().phase, Phase::Break);
    }

    #[test]
    fn test_log_failure_is_reported_and_timer_continues() {
        let (mut app, presenter, _, logger) = create_app("1", "5");
        logger.set_should_fail(true);
        let _ = app.handle_line("start");
        drain_ticks(&mut app);

        let _ = app.handle_line("design doc");

        let errors = presenter.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, "記録エラー");
        assert!(app.session().is_running());
        assert_eq!(app.session().phase, Phase::Break);
    }

    #[test]
    fn test_pause_cancels_tick_and_resume_reschedules() {
        let (mut app, _, _, _) = create_app("1", "5");
        let _ = app.handle_line("start");
        app.scheduler.mark_fired();
        app.on_tick();

        let _ = app.handle_line("pause");
        assert!(!app.scheduler().is_pending());
        assert!(app.session().is_paused());

        let _ = app.handle_line("resume");
        assert!(app.scheduler().is_pending());
        assert_eq!(app.session().remaining_seconds, 59);
    }

    #[test]
    fn test_stop_cancels_tick() {
        let (mut app, _, _, _) = create_app("1", "5");
        let _ = app.handle_line("start");

        let _ = app.handle_line("stop");

        assert!(!app.scheduler().is_pending());
        assert_eq!(app.session().status, TimerStatus::Idle);
    }

    #[test]
    fn test_field_edit_takes_effect_next_phase() {
        let (mut app, presenter, _, _) = create_app("1", "5");
        let _ = app.handle_line("start");
        let _ = app.handle_line("break 2");

        assert!(presenter
            .calls()
            .contains(&PresenterCall::Fields("1".to_string(), "2".to_string())));

        drain_ticks(&mut app);
        let _ = app.handle_line("");

        assert_eq!(app.session().remaining_seconds, 120);
    }

    #[test]
    fn test_quit_breaks_and_unknown_shows_help() {
        let (mut app, presenter, _, _) = create_app("1", "5");

        assert!(app.handle_line("meow").is_continue());
        assert!(presenter.calls().contains(&PresenterCall::Help));
        assert!(app.handle_line("q").is_break());
    }

    #[test]
    fn test_decode_line_strips_terminators() {
        assert_eq!(decode_line(b"start\n"), Ok("start"));
        assert_eq!(decode_line(b"start\r\n"), Ok("start"));
        assert_eq!(decode_line(b"last"), Ok("last"));
        assert!(decode_line(b"\x90\xdd\n").is_err());
    }

    #[test]
    fn test_shutdown_cancels_pending_tick() {
        let (mut app, _, _, _) = create_app("1", "5");
        let _ = app.handle_line("start");

        app.shutdown();

        assert!(!app.scheduler().is_pending());
    }
}
