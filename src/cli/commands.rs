//! Command definitions for the cat Pomodoro timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Parser, Subcommand};

use crate::sound::DEFAULT_VOLUME_PERCENT;

// ============================================================================
// CLI Structure
// ============================================================================

/// Cat Pomodoro - a cat-themed Pomodoro timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "cat-pomodoro",
    version,
    about = "猫のポモドーロ・タイマー",
    long_about = "作業と休憩を交互に繰り返すポモドーロタイマー。\n\
                  作業が終わるたびにタスク名を tasks.txt に記録します。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (runs the timer when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Initial work duration in minutes
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub work: u32,

    /// Initial break duration in minutes
    #[arg(
        short = 'b',
        long = "break",
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub break_time: u32,

    /// Alert volume in percent (0 mutes the alert)
    #[arg(
        long,
        default_value_t = DEFAULT_VOLUME_PERCENT,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub volume: u8,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Tests
// ============================================================================
