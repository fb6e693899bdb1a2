// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Audio(AudioError),
}

/// Reasons the opening cue could not be played.
///
/// Sound is cosmetic: these errors are logged by the caller and never
/// interrupt the curtain sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The cue asset does not exist at its expected path.
    AssetMissing(String),

    /// The asset exists but could not be decoded.
    Decode(String),

    /// No output device is available on this system.
    NoOutputDevice,

    /// The device refused to start playback.
    PlaybackRejected(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::AssetMissing(path) => write!(f, "Sound asset not found: {}", path),
            AudioError::Decode(msg) => write!(f, "Failed to decode sound: {}", msg),
            AudioError::NoOutputDevice => write!(f, "No audio output device found"),
            AudioError::PlaybackRejected(msg) => write!(f, "Playback rejected: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Audio(e) => write!(f, "Audio Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<AudioError> for Error {
    fn from(err: AudioError) -> Self {
        Error::Audio(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<hound::Error> for Error {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
                Error::Audio(AudioError::AssetMissing(io.to_string()))
            }
            other => Error::Audio(AudioError::Decode(other.to_string())),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn audio_error_wraps_into_error() {
        let err: Error = AudioError::NoOutputDevice.into();
        assert!(matches!(err, Error::Audio(AudioError::NoOutputDevice)));
        assert_eq!(
            format!("{}", err),
            "Audio Error: No audio output device found"
        );
    }

    #[test]
    fn missing_wav_maps_to_asset_missing() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "clapping.wav");
        let err: Error = hound::Error::IoError(io).into();
        assert!(matches!(err, Error::Audio(AudioError::AssetMissing(_))));
    }

    #[test]
    fn malformed_wav_maps_to_decode() {
        let err: Error = hound::Error::FormatError("no RIFF tag found").into();
        match err {
            Error::Audio(AudioError::Decode(msg)) => assert!(msg.contains("RIFF")),
            other => panic!("expected Decode, got {other:?}"),
        }
    }
}
