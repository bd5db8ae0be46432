//! Alert sound error types.
//!
//! None of these stop the timer: the notifier rings the terminal bell
//! instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while playing the alert sound.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No audio output device could be opened.
    #[error("オーディオデバイスが利用できません: {0}")]
    NoOutputDevice(#[from] rodio::StreamError),

    /// The alert sound file could not be opened.
    #[error("サウンドファイルを開けませんでした: {}: {source}", .path.display())]
    Open {
        /// Sound file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The alert sound file is not in a supported audio format.
    #[error("サウンドファイルのデコードに失敗しました: {}: {source}", .path.display())]
    Decode {
        /// Sound file path
        path: PathBuf,
        /// Decoder error
        #[source]
        source: rodio::decoder::DecoderError,
    },

    /// The output stream refused a new sink.
    #[error("オーディオ出力に接続できませんでした: {0}")]
    Sink(#[from] rodio::PlayError),

    /// Generic playback failure.
    #[error("サウンド再生エラー: {0}")]
    Other(String),
}

impl SoundError {
    /// Returns true if the problem lies in the sound file rather than the
    /// audio device, in which case the built-in chime can still be played.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::Decode { .. })
    }
}
