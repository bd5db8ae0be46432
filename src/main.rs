//! Cat Pomodoro - a cat-themed Pomodoro timer for the terminal
//!
//! Work and break periods alternate automatically:
//! - 25 minutes of focused work (default)
//! - 5 minutes of break (default)
//! - each finished work period is named and logged to `tasks.txt`

use std::path::Path;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;

use cat_pomodoro::app::App;
use cat_pomodoro::assets::PhaseImages;
use cat_pomodoro::cli::{Cli, Commands, TerminalPresenter};
use cat_pomodoro::notifier::TerminalNotifier;
use cat_pomodoro::sound::{get_default_sound, try_create_player, SoundPlayer};
use cat_pomodoro::task_log::{FileTaskLogger, DEFAULT_TASK_LOG_FILE};
use cat_pomodoro::types::DurationInputs;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        eprintln!("エラー: {:#}", e);
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never break the countdown line.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(())
        }
        None => run_timer(&cli).await,
    }
}

/// Runs the interactive timer in the current directory.
async fn run_timer(cli: &Cli) -> Result<()> {
    let dir = Path::new(".");

    let images = PhaseImages::load(dir);
    let player = try_create_player()
        .map(|p| Box::new(p.with_volume(cli.volume)) as Box<dyn SoundPlayer>);
    let notifier = TerminalNotifier::new(player, get_default_sound(dir));
    let logger = FileTaskLogger::new(DEFAULT_TASK_LOG_FILE);
    let inputs = DurationInputs::new(cli.work.to_string(), cli.break_time.to_string());

    let mut app = App::new(inputs, images, TerminalPresenter::stdout(), notifier, logger);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    app.run(BufReader::new(tokio::io::stdin()), shutdown).await?;
    println!("\nまたニャ！");
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
