//! Stream acquisition: resolves capture sources and audio devices into
//! tracks the ffmpeg recorder can open.

use crate::{config::AudioConfig, desktop_sources::screen_index, ffmpeg::CapturePlatform};

use screen_recorder_core::{
    CaptureError, CaptureSource, CoreResult, MediaDevices, MediaStream, MediaTrack, SourceKind,
    TrackOrigin,
};

use std::panic::Location;

use cpal::traits::{DeviceTrait, HostTrait};
use error_location::ErrorLocation;
use tracing::{info, instrument};

/// Desktop capture through ffmpeg inputs, microphone discovery through cpal.
pub struct DesktopMediaDevices {
    audio: AudioConfig,
    platform: CapturePlatform,
}

impl DesktopMediaDevices {
    /// Devices for `platform` honouring the configured audio inputs.
    pub fn new(audio: AudioConfig, platform: CapturePlatform) -> Self {
        Self { audio, platform }
    }

    /// Desktop audio input, configured or platform default.
    pub fn desktop_audio_device(&self) -> Option<String> {
        self.audio
            .desktop_audio_device
            .clone()
            .or_else(|| self.platform.default_desktop_audio().map(str::to_string))
    }
}

impl MediaDevices for DesktopMediaDevices {
    #[instrument(skip(self, source), fields(source_id = %source.id))]
    async fn acquire_desktop(&mut self, source: &CaptureSource) -> CoreResult<MediaStream> {
        if source.kind == SourceKind::Window {
            return Err(acquisition_error(format!(
                "Window capture is not supported: {}",
                source.name
            )));
        }
        if screen_index(&source.id).is_none() {
            return Err(acquisition_error(format!("Unknown screen: {}", source.id)));
        }
        let Some(bounds) = source.bounds else {
            return Err(acquisition_error(format!(
                "Screen {} reported no geometry",
                source.name
            )));
        };

        let mut tracks = vec![MediaTrack::video(
            source.name.clone(),
            TrackOrigin::Screen {
                source_id: source.id.clone(),
                bounds: Some(bounds),
            },
        )];

        match self.desktop_audio_device() {
            Some(device) => tracks.push(MediaTrack::audio(
                format!("Desktop audio ({})", device),
                TrackOrigin::DesktopAudio {
                    device: Some(device),
                },
            )),
            None => info!("No desktop audio input on this platform, recording without it"),
        }

        Ok(MediaStream::new(tracks))
    }

    #[instrument(skip(self))]
    async fn acquire_microphone(&mut self) -> CoreResult<MediaStream> {
        if let Some(device) = self.audio.microphone_device.clone() {
            return Ok(MediaStream::new(vec![MediaTrack::audio(
                device.clone(),
                TrackOrigin::Microphone { device },
            )]));
        }

        let name = tokio::task::spawn_blocking(default_microphone_name)
            .await
            .map_err(|e| CaptureError::MediaAcquisition {
                reason: format!("Microphone lookup task failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })??;

        let device = self
            .platform
            .default_microphone()
            .map_or_else(|| name.clone(), str::to_string);

        info!(microphone = %name, device = %device, "Microphone acquired");

        Ok(MediaStream::new(vec![MediaTrack::audio(
            name,
            TrackOrigin::Microphone { device },
        )]))
    }
}

#[track_caller]
fn acquisition_error(reason: String) -> CaptureError {
    CaptureError::MediaAcquisition {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn default_microphone_name() -> CoreResult<String> {
    let host = cpal::default_host();

    let device = host
        .default_input_device()
        .ok_or_else(|| CaptureError::MediaAcquisition {
            reason: "No microphone found".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    #[allow(deprecated)]
    let name = device.name().map_err(|e| CaptureError::MediaAcquisition {
        reason: format!("Failed to read microphone name: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(name)
}
