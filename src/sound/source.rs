//! Sound source selection.

use std::path::{Path, PathBuf};

/// File name of the optional user-supplied alert sound.
pub const ALERT_SOUND_FILE: &str = "sound.wav";

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// An audio file on disk.
    File {
        /// The name of the sound (file stem).
        name: String,
        /// The full path to the sound file.
        path: PathBuf,
    },
    /// The built-in two-tone chime, synthesized at playback time.
    Chime,
}

impl SoundSource {
    /// Creates a file sound source.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sound".to_string());
        Self::File { name, path }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } => name,
            Self::Chime => "chime",
        }
    }

    /// Returns true if this is a file sound.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns the file path if this is a file sound.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Chime => None,
        }
    }
}

/// Picks the alert sound for the given directory.
///
/// Uses [`ALERT_SOUND_FILE`] when it exists there, otherwise the chime.
#[must_use]
pub fn get_default_sound(dir: &Path) -> SoundSource {
    let candidate = dir.join(ALERT_SOUND_FILE);
    if candidate.is_file() {
        SoundSource::file(candidate)
    } else {
        SoundSource::Chime
    }
}
