//! Cat Pomodoro Timer Library
//!
//! This library provides the core functionality for the cat Pomodoro timer.
//! It includes:
//! - Timer state machine alternating work and break phases
//! - Cancelable, drift-free tick scheduling
//! - Task log appending one line per completed work phase
//! - Alert notifications with sound playback
//! - Phase images with placeholder fallback
//! - Terminal presentation and the event loop tying it together

pub mod app;
pub mod assets;
pub mod cli;
pub mod notifier;
pub mod sound;
pub mod task_log;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{DurationInputs, Phase, Session, TimerStatus};

pub use app::App;
pub use assets::{AssetError, CatImage, PhaseImages};
pub use cli::{MockPresenter, Presenter, TerminalPresenter};
pub use notifier::{MockNotifier, Notifier, TerminalNotifier};
pub use sound::{MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer, SoundSource};
pub use task_log::{FileTaskLogger, MockTaskLogger, TaskLogError, TaskLogger, TaskRecord};
pub use timer::{Effect, TickScheduler, TimerError, TimerInput, TimerMachine};
