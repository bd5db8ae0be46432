//! CLI module for the cat Pomodoro timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Line commands typed while the timer runs
//! - `display`: Presenter boundary and terminal output

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{Cli, Commands};
pub use display::{MockPresenter, Presenter, PresenterCall, TerminalPresenter};
pub use input::{parse_command, UserCommand, HELP_TEXT};
