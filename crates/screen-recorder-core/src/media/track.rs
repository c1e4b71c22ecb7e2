use crate::source::SourceBounds;

use uuid::Uuid;

/// Video or audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    /// Picture track.
    Video,
    /// Sound track.
    Audio,
}

/// What the platform recorder has to capture for a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOrigin {
    /// Pixels of a capture source.
    Screen {
        /// Id of the captured source.
        source_id: String,
        /// Captured region, when known.
        bounds: Option<SourceBounds>,
    },
    /// System output audio. `None` picks the platform default loopback.
    DesktopAudio {
        /// Platform audio input carrying the system mix.
        device: Option<String>,
    },
    /// A microphone.
    Microphone {
        /// Input device name.
        device: String,
    },
}

/// One track of a media stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTrack {
    /// Unique per acquisition.
    pub id: Uuid,
    /// Video or audio.
    pub kind: TrackKind,
    /// Human-readable description.
    pub label: String,
    /// Capture target.
    pub origin: TrackOrigin,
}

impl MediaTrack {
    /// Creates a video track.
    pub fn video(label: impl Into<String>, origin: TrackOrigin) -> Self {
        Self::new(TrackKind::Video, label, origin)
    }

    /// Creates an audio track.
    pub fn audio(label: impl Into<String>, origin: TrackOrigin) -> Self {
        Self::new(TrackKind::Audio, label, origin)
    }

    fn new(kind: TrackKind, label: impl Into<String>, origin: TrackOrigin) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            label: label.into(),
            origin,
        }
    }
}
