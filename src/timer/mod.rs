//! Timer module for the cat Pomodoro timer.
//!
//! This module contains the countdown core:
//! - `machine`: state machine with phase transitions and effects
//! - `scheduler`: cancelable one-second tick handle
//! - `error`: errors of the timer operations

pub mod error;
pub mod machine;
pub mod scheduler;

pub use error::TimerError;
pub use machine::{Effect, TimerInput, TimerMachine, PAUSED_TEXT, READY_TEXT, TICK_INTERVAL};
pub use scheduler::{wait_for_tick, TickScheduler};
