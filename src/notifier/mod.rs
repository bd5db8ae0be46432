//! End-of-period notifications.
//!
//! The notifier plays the alert when a phase ends and asks for the name of
//! the task that was just finished. The answer does not come back through
//! the notifier: it arrives later as an input event, so the event loop is
//! never blocked while the user types.

use std::io::Write;

use tracing::{debug, warn};

use crate::sound::{SoundPlayer, SoundSource};

/// ASCII bell, the last-resort alert.
const BELL: &[u8] = b"\x07";

/// Trait for the alert and task-name prompt collaborators.
pub trait Notifier {
    /// Plays the audible alert. Never fails.
    fn alert(&self);

    /// Shows the task-name prompt.
    fn request_task_name(&self, title: &str, message: &str);
}

/// Notifier for the terminal front end.
///
/// Plays the alert through a [`SoundPlayer`] when one is available and
/// rings the terminal bell otherwise.
pub struct TerminalNotifier {
    player: Option<Box<dyn SoundPlayer>>,
    source: SoundSource,
}

impl TerminalNotifier {
    /// Creates a notifier playing `source` through `player`.
    pub fn new(player: Option<Box<dyn SoundPlayer>>, source: SoundSource) -> Self {
        Self { player, source }
    }

    fn ring_bell(&self) {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(BELL).and_then(|()| stdout.flush());
    }
}

impl std::fmt::Debug for TerminalNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalNotifier")
            .field("has_player", &self.player.is_some())
            .field("source", &self.source)
            .finish()
    }
}

impl Notifier for TerminalNotifier {
    fn alert(&self) {
        let Some(player) = &self.player else {
            debug!("No audio output, ringing the bell");
            self.ring_bell();
            return;
        };
        if let Err(e) = player.play(&self.source) {
            warn!("Alert sound failed: {}", e);
            self.ring_bell();
        }
    }

    fn request_task_name(&self, title: &str, message: &str) {
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "【{}】{}\n(空行でスキップ) > ", title, message)
            .and_then(|()| stdout.flush());
    }
}

/// Mock notifier for testing.
///
/// Clones share the same call log.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    alerts: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    prompts: std::sync::Arc<std::sync::Mutex<Vec<(String, String)>>>,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.alerts.load(std::sync::atomic::Ordering::SeqCst)
    }

    #[must_use]
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Notifier for MockNotifier {
    fn alert(&self) {
        self.alerts
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn request_task_name(&self, title: &str, message: &str) {
        self.prompts
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::MockSoundPlayer;
    use std::sync::Arc;

    #[test]
    fn test_alert_plays_configured_sound() {
        let player = Arc::new(MockSoundPlayer::new());
        let notifier = TerminalNotifier::new(
            Some(Box::new(player.clone())),
            SoundSource::file("sound.wav"),
        );

        notifier.alert();

        assert_eq!(player.played(), vec![SoundSource::file("sound.wav")]);
    }

    #[test]
    fn test_alert_survives_playback_failure() {
        let player = Arc::new(MockSoundPlayer::new());
        player.set_should_fail(true);
        let notifier = TerminalNotifier::new(Some(Box::new(player.clone())), SoundSource::Chime);

        notifier.alert();

        assert!(player.played().is_empty());
    }

    #[test]
    fn test_without_player_does_not_panic() {
        let notifier = TerminalNotifier::new(None, SoundSource::Chime);
        notifier.alert();
        notifier.request_task_name("タスク完了", "何の作業が終わったニャ？");
    }

    #[test]
    fn test_mock_notifier() {
        let notifier = MockNotifier::new();
        let shared = notifier.clone();

        notifier.alert();
        notifier.request_task_name("t", "m");

        assert_eq!(shared.alert_count(), 1);
        assert_eq!(shared.prompts(), vec![("t".to_string(), "m".to_string())]);
    }
}
