//! Alert playback through rodio.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::SoundSource;

/// One note of the built-in chime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChimeNote {
    /// Pitch in Hz
    pub frequency: f32,
    /// How long the note sounds
    pub length: Duration,
}

/// The built-in chime: a rising fifth, A5 then E6.
pub const CHIME: [ChimeNote; 2] = [
    ChimeNote {
        frequency: 880.0,
        length: Duration::from_millis(180),
    },
    ChimeNote {
        frequency: 1318.5,
        length: Duration::from_millis(320),
    },
];

/// Default playback volume in percent.
pub const DEFAULT_VOLUME_PERCENT: u8 = 25;

/// Plays the alert on the default audio output.
///
/// Playback is detached: `play` returns at once and the sound finishes in
/// the background, so the countdown is never held up.
pub struct RodioSoundPlayer {
    // Dropping the stream silences every sink created from it.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    volume: f32,
}

impl RodioSoundPlayer {
    /// Opens the default audio output.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::NoOutputDevice` if there is no usable device.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, handle) = OutputStream::try_default()?;
        debug!("Audio output opened");

        Ok(Self {
            _stream: stream,
            handle,
            volume: percent_to_gain(DEFAULT_VOLUME_PERCENT),
        })
    }

    /// Sets the playback volume in percent, capped at 100.
    #[must_use]
    pub fn with_volume(mut self, percent: u8) -> Self {
        self.volume = percent_to_gain(percent);
        self
    }

    /// Plays `source`.
    ///
    /// A sound file that cannot be opened or decoded is replaced by the
    /// chime.
    ///
    /// # Errors
    ///
    /// Returns an error if the audio output rejects playback.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        let Some(path) = source.path() else {
            return self.play_chime();
        };

        match self.play_file(path) {
            Err(e) if e.is_file_error() => {
                warn!("{}; playing the chime instead", e);
                self.play_chime()
            }
            result => result,
        }
    }

    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path).map_err(|source| SoundError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|source| SoundError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let sink = Sink::try_new(&self.handle)?;
        sink.set_volume(self.volume);
        sink.append(decoder);
        sink.detach();

        debug!(path = %path.display(), "Alert sound started");
        Ok(())
    }

    fn play_chime(&self) -> Result<(), SoundError> {
        let sink = Sink::try_new(&self.handle)?;
        sink.set_volume(self.volume);
        for note in CHIME {
            sink.append(SineWave::new(note.frequency).take_duration(note.length));
        }
        sink.detach();

        debug!("Chime started");
        Ok(())
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("volume", &self.volume)
            .finish_non_exhaustive()
    }
}

fn percent_to_gain(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0
}

/// Opens the audio output, or returns None and logs a warning if there is
/// none.
#[must_use]
pub fn try_create_player() -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("{}; the terminal bell will be used", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Build machines usually have no audio device; those tests return early.

    #[test]
    fn test_chime_is_short() {
        let total: Duration = CHIME.iter().map(|note| note.length).sum();
        assert!(total < Duration::from_secs(1));
        assert!(CHIME.iter().all(|note| note.frequency > 0.0));
    }

    #[test]
    fn test_try_create_player_does_not_panic() {
        let _ = try_create_player();
    }

    #[test]
    fn test_percent_to_gain() {
        assert_eq!(percent_to_gain(DEFAULT_VOLUME_PERCENT), 0.25);
        assert_eq!(percent_to_gain(0), 0.0);
        assert_eq!(percent_to_gain(250), 1.0);
    }

    #[test]
    fn test_with_volume() {
        let Ok(player) = RodioSoundPlayer::new() else {
            return;
        };
        let player = player.with_volume(50);
        assert!(format!("{:?}", player).contains("0.5"));
    }

    #[test]
    fn test_unreadable_file_falls_back_to_chime() {
        let Ok(player) = RodioSoundPlayer::new() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sound.wav");
        std::fs::write(&path, b"not audio").unwrap();

        assert!(player.play(&SoundSource::file(&path)).is_ok());
        assert!(player.play(&SoundSource::file(dir.path().join("missing.wav"))).is_ok());
    }
}
