//! Display layer for the cat Pomodoro timer.
//!
//! [`Presenter`] is the boundary between the timer and whatever draws it.
//! [`TerminalPresenter`] draws on a terminal: the countdown is redrawn in
//! place on its own line, everything else is printed above it.

use std::io::{self, Write};

use crate::assets::CatImage;
use crate::types::{DurationInputs, Phase};

use super::input::HELP_TEXT;

// ============================================================================
// Presenter
// ============================================================================

/// Output surface driven by the timer.
pub trait Presenter {
    /// Replaces the status line.
    fn set_status_text(&mut self, text: &str);

    /// Shows the image of `phase`.
    fn set_active_image(&mut self, phase: Phase, image: &CatImage);

    /// Replaces the countdown display.
    fn set_countdown_display(&mut self, mmss: &str);

    /// Shows an informational dialog.
    fn show_info(&mut self, title: &str, message: &str);

    /// Shows an error dialog.
    fn show_error(&mut self, title: &str, message: &str);

    /// Shows the current duration fields.
    fn show_fields(&mut self, inputs: &DurationInputs);

    /// Shows the command list.
    fn show_help(&mut self);

    /// Moves off the countdown line so that text written by someone else
    /// starts on a fresh line.
    fn end_countdown_line(&mut self);
}

// ============================================================================
// TerminalPresenter
// ============================================================================

/// Presenter writing to a terminal.
#[derive(Debug)]
pub struct TerminalPresenter<W: Write> {
    out: W,
    /// True while the cursor sits at the end of the countdown line
    countdown_open: bool,
}

impl TerminalPresenter<io::Stdout> {
    /// Creates a presenter writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    /// Creates a presenter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            countdown_open: false,
        }
    }

    /// Consumes the presenter and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes full lines above the countdown.
    fn print_lines(&mut self, text: &str) {
        let result = self.close_countdown().and_then(|()| {
            writeln!(self.out, "{}", text)?;
            self.out.flush()
        });
        if let Err(e) = result {
            tracing::debug!("Terminal write failed: {}", e);
        }
    }

    fn close_countdown(&mut self) -> io::Result<()> {
        if self.countdown_open {
            self.countdown_open = false;
            writeln!(self.out)?;
        }
        Ok(())
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn set_status_text(&mut self, text: &str) {
        self.print_lines(&format!("== {} ==", text));
    }

    fn set_active_image(&mut self, phase: Phase, image: &CatImage) {
        let art = if image.is_placeholder() {
            blank_art()
        } else {
            cat_art(phase)
        };
        self.print_lines(&format!("{}\n  [{}]", art, image.label()));
    }

    fn set_countdown_display(&mut self, mmss: &str) {
        let result = write!(self.out, "\r  ⏱ {}  ", mmss).and_then(|()| self.out.flush());
        match result {
            Ok(()) => self.countdown_open = true,
            Err(e) => tracing::debug!("Terminal write failed: {}", e),
        }
    }

    fn show_info(&mut self, title: &str, message: &str) {
        self.print_lines(&format!("【{}】{}", title, message));
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.print_lines(&format!("【{}】✗ {}", title, message));
    }

    fn show_fields(&mut self, inputs: &DurationInputs) {
        self.print_lines(&format!(
            "作業(分): {}  休憩(分): {}",
            inputs.work, inputs.break_
        ));
    }

    fn show_help(&mut self) {
        self.print_lines(HELP_TEXT);
    }

    fn end_countdown_line(&mut self) {
        let result = self.close_countdown().and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::debug!("Terminal write failed: {}", e);
        }
    }
}

fn cat_art(phase: Phase) -> &'static str {
    match phase {
        Phase::Work => "   /\\_/\\\n  ( o.o )  カタカタ…\n   > ^ <",
        Phase::Break => "   /\\_/\\\n  ( -.- )  zzz\n   > ^ <",
    }
}

fn blank_art() -> &'static str {
    "  +-------+\n  |       |\n  +-------+"
}

// ============================================================================
// MockPresenter
// ============================================================================

/// One call recorded by [`MockPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    Status(String),
    Image(Phase),
    Countdown(String),
    Info(String, String),
    Error(String, String),
    Fields(String, String),
    Help,
    EndCountdownLine,
}

/// Mock presenter for testing.
///
/// Clones share the same call log.
#[derive(Debug, Clone, Default)]
pub struct MockPresenter {
    calls: std::sync::Arc<std::sync::Mutex<Vec<PresenterCall>>>,
}

impl MockPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<PresenterCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns every countdown text shown so far.
    #[must_use]
    pub fn countdowns(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PresenterCall::Countdown(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Returns every error dialog shown so far.
    #[must_use]
    pub fn errors(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PresenterCall::Error(title, message) => Some((title, message)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: PresenterCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Presenter for MockPresenter {
    fn set_status_text(&mut self, text: &str) {
        self.record(PresenterCall::Status(text.to_string()));
    }

    fn set_active_image(&mut self, phase: Phase, _image: &CatImage) {
        self.record(PresenterCall::Image(phase));
    }

    fn set_countdown_display(&mut self, mmss: &str) {
        self.record(PresenterCall::Countdown(mmss.to_string()));
    }

    fn show_info(&mut self, title: &str, message: &str) {
        self.record(PresenterCall::Info(title.to_string(), message.to_string()));
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.record(PresenterCall::Error(title.to_string(), message.to_string()));
    }

    fn show_fields(&mut self, inputs: &DurationInputs) {
        self.record(PresenterCall::Fields(
            inputs.work.clone(),
            inputs.break_.clone(),
        ));
    }

    fn show_help(&mut self) {
        self.record(PresenterCall::Help);
    }

    fn end_countdown_line(&mut self) {
        self.record(PresenterCall::EndCountdownLine);
    }
}

// ============================================================================
// Tests
// ============================================================================
