//! Sound for the end-of-period alert.
//!
//! The alert is `sound.wav` from the working directory when that file
//! exists, otherwise a short synthesized chime. Without an audio device
//! there is no player at all and the notifier rings the terminal bell.

mod error;
mod player;
mod source;

use std::sync::{Arc, Mutex};

pub use error::SoundError;
pub use player::{try_create_player, ChimeNote, RodioSoundPlayer, CHIME, DEFAULT_VOLUME_PERCENT};
pub use source::{get_default_sound, SoundSource, ALERT_SOUND_FILE};

/// Something that can play the alert.
pub trait SoundPlayer {
    /// Starts playing `source` and returns without waiting for it to end.
    ///
    /// # Errors
    ///
    /// Returns an error if playback could not be started.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Arc<T> {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        (**self).play(source)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    played: Mutex<Vec<SoundSource>>,
    should_fail: Mutex<bool>,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    #[must_use]
    pub fn played(&self) -> Vec<SoundSource> {
        self.played.lock().unwrap().clone()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if *self.should_fail.lock().unwrap() {
            return Err(SoundError::Other("mock failure".to_string()));
        }
        self.played.lock().unwrap().push(source.clone());
        Ok(())
    }
}
