use crate::{
    CaptureError, CoreResult,
    media::{MediaTrack, TrackKind},
    source::CaptureSource,
};

use std::panic::Location;

use error_location::ErrorLocation;
use uuid::Uuid;

/// Tracks returned by one acquisition call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaStream {
    tracks: Vec<MediaTrack>,
}

impl MediaStream {
    /// Creates a stream from its tracks.
    pub fn new(tracks: Vec<MediaTrack>) -> Self {
        Self { tracks }
    }

    /// Video tracks, in acquisition order.
    pub fn video_tracks(&self) -> impl Iterator<Item = &MediaTrack> {
        self.tracks.iter().filter(|t| t.kind == TrackKind::Video)
    }

    /// Audio tracks, in acquisition order.
    pub fn audio_tracks(&self) -> impl Iterator<Item = &MediaTrack> {
        self.tracks.iter().filter(|t| t.kind == TrackKind::Audio)
    }
}

/// Desktop video, desktop audio and microphone merged into one logical
/// stream for recording.
///
/// Valid for exactly one recording session; selecting another source
/// replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaStreamBundle {
    id: Uuid,
    source_id: String,
    source_name: String,
    tracks: Vec<MediaTrack>,
}

impl MediaStreamBundle {
    /// Takes the video and audio tracks of `desktop` and the audio tracks of
    /// `microphone`.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::MediaAcquisition`] if `desktop` carries no
    /// video track.
    #[track_caller]
    pub fn merge(
        source: &CaptureSource,
        desktop: MediaStream,
        microphone: MediaStream,
    ) -> CoreResult<Self> {
        if desktop.video_tracks().next().is_none() {
            return Err(CaptureError::MediaAcquisition {
                reason: format!("No video track for source {:?}", source.id),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let tracks = desktop
            .video_tracks()
            .chain(desktop.audio_tracks())
            .chain(microphone.audio_tracks())
            .cloned()
            .collect();

        Ok(Self {
            id: Uuid::new_v4(),
            source_id: source.id.clone(),
            source_name: source.name.clone(),
            tracks,
        })
    }

    /// Unique per merge.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Id of the capture source the video comes from.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Display name of the capture source.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// All tracks.
    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    /// Video tracks.
    pub fn video_tracks(&self) -> impl Iterator<Item = &MediaTrack> {
        self.tracks.iter().filter(|t| t.kind == TrackKind::Video)
    }

    /// Audio tracks.
    pub fn audio_tracks(&self) -> impl Iterator<Item = &MediaTrack> {
        self.tracks.iter().filter(|t| t.kind == TrackKind::Audio)
    }
}
