//! ffmpeg command lines for screen capture and source thumbnails.
//!
//! Recordings are written as fragmented MP4 to stdout so every read from
//! the pipe is a self-contained segment of the final file.

use crate::desktop_sources::screen_index;

use screen_recorder_core::{
    CaptureError, CoreResult, MediaStreamBundle, SourceBounds, TrackOrigin,
};

use std::{env, panic::Location};

use error_location::ErrorLocation;
use tracing::warn;

/// Capture backend family, one per desktop OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePlatform {
    /// X11 screen grab with PulseAudio inputs.
    Linux,
    /// AVFoundation screens and audio devices.
    MacOs,
    /// GDI screen grab with DirectShow audio.
    Windows,
}

impl CapturePlatform {
    /// Platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            CapturePlatform::MacOs
        } else if cfg!(target_os = "windows") {
            CapturePlatform::Windows
        } else {
            CapturePlatform::Linux
        }
    }

    /// Input carrying the system audio mix when none is configured.
    pub fn default_desktop_audio(self) -> Option<&'static str> {
        match self {
            CapturePlatform::Linux => Some("@DEFAULT_MONITOR@"),
            CapturePlatform::MacOs | CapturePlatform::Windows => None,
        }
    }

    /// ffmpeg's own name for the default microphone, where it has one.
    pub fn default_microphone(self) -> Option<&'static str> {
        match self {
            CapturePlatform::Linux | CapturePlatform::MacOs => Some("default"),
            CapturePlatform::Windows => None,
        }
    }
}

/// Builds ffmpeg argument lists for one platform.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    platform: CapturePlatform,
    fps: u32,
    x11_display: String,
}

impl FfmpegCommand {
    /// Commands for `platform` at `fps` frames per second.
    pub fn new(platform: CapturePlatform, fps: u32) -> Self {
        Self {
            platform,
            fps,
            x11_display: env::var("DISPLAY").unwrap_or_else(|_| ":0.0".to_string()),
        }
    }

    /// Overrides the X server grabbed on Linux.
    pub fn with_x11_display(mut self, display: impl Into<String>) -> Self {
        self.x11_display = display.into();
        self
    }

    /// Target platform.
    pub fn platform(&self) -> CapturePlatform {
        self.platform
    }

    /// Input arguments grabbing monitor `index` covering `bounds`.
    pub fn screen_input(&self, index: usize, bounds: SourceBounds) -> Vec<String> {
        let fps = self.fps.to_string();
        let size = format!("{}x{}", bounds.width, bounds.height);

        match self.platform {
            CapturePlatform::Linux => args([
                "-f",
                "x11grab",
                "-framerate",
                fps.as_str(),
                "-video_size",
                size.as_str(),
                "-draw_mouse",
                "1",
                "-i",
                format!("{}+{},{}", self.x11_display, bounds.x, bounds.y).as_str(),
            ]),
            CapturePlatform::MacOs => args([
                "-f",
                "avfoundation",
                "-framerate",
                fps.as_str(),
                "-capture_cursor",
                "1",
                "-i",
                format!("Capture screen {}:none", index).as_str(),
            ]),
            CapturePlatform::Windows => args([
                "-f",
                "gdigrab",
                "-framerate",
                fps.as_str(),
                "-draw_mouse",
                "1",
                "-offset_x",
                bounds.x.to_string().as_str(),
                "-offset_y",
                bounds.y.to_string().as_str(),
                "-video_size",
                size.as_str(),
                "-i",
                "desktop",
            ]),
        }
    }

    /// Input arguments for the audio device `device`.
    pub fn audio_input(&self, device: &str) -> Vec<String> {
        match self.platform {
            CapturePlatform::Linux => {
                args(["-thread_queue_size", "512", "-f", "pulse", "-i", device])
            }
            CapturePlatform::MacOs => args([
                "-thread_queue_size",
                "512",
                "-f",
                "avfoundation",
                "-i",
                format!(":{}", device).as_str(),
            ]),
            CapturePlatform::Windows => args([
                "-thread_queue_size",
                "512",
                "-f",
                "dshow",
                "-i",
                format!("audio={}", device).as_str(),
            ]),
        }
    }

    /// Full argument list recording `bundle` as fragmented MP4 on stdout.
    ///
    /// All audio tracks are mixed into a single AAC track.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Recorder`] if the bundle's video track does
    /// not name a screen with known bounds.
    #[track_caller]
    pub fn recording_args(&self, bundle: &MediaStreamBundle) -> CoreResult<Vec<String>> {
        let Some((index, bounds)) = bundle.video_tracks().find_map(|track| match &track.origin {
            TrackOrigin::Screen {
                source_id,
                bounds: Some(bounds),
            } => screen_index(source_id).map(|index| (index, *bounds)),
            _ => None,
        }) else {
            return Err(recorder_error(format!(
                "Source {} has no capturable screen region",
                bundle.source_id()
            )));
        };

        let mut out = args(["-hide_banner", "-loglevel", "error"]);
        out.extend(self.screen_input(index, bounds));

        let mut audio_inputs = 0usize;
        for track in bundle.audio_tracks() {
            let device = match &track.origin {
                TrackOrigin::DesktopAudio { device } => device
                    .as_deref()
                    .or_else(|| self.platform.default_desktop_audio()),
                TrackOrigin::Microphone { device } => Some(device.as_str()),
                TrackOrigin::Screen { .. } => None,
            };

            match device {
                Some(device) => {
                    out.extend(self.audio_input(device));
                    audio_inputs += 1;
                }
                None => warn!(track = %track.label, "No capture input for audio track, skipping"),
            }
        }

        // libx264 with yuv420p needs even dimensions.
        out.extend(args(["-vf", "scale=trunc(iw/2)*2:trunc(ih/2)*2"]));

        match audio_inputs {
            0 => out.extend(args(["-map", "0:v"])),
            1 => out.extend(args(["-map", "0:v", "-map", "1:a"])),
            n => {
                let labels: String = (1..=n).map(|i| format!("[{}:a]", i)).collect();
                out.extend(args([
                    "-filter_complex",
                    format!("{}amix=inputs={}:duration=longest[aout]", labels, n).as_str(),
                    "-map",
                    "0:v",
                    "-map",
                    "[aout]",
                ]));
            }
        }

        out.extend(args([
            "-c:v",
            "libx264",
            "-preset",
            "veryfast",
            "-pix_fmt",
            "yuv420p",
        ]));
        if audio_inputs > 0 {
            out.extend(args(["-c:a", "aac", "-b:a", "128k"]));
        }
        out.extend(args([
            "-movflags",
            "frag_keyframe+empty_moov+default_base_moof",
            "-f",
            "mp4",
            "pipe:1",
        ]));

        Ok(out)
    }

    /// Argument list writing one PNG frame of monitor `index` to stdout.
    pub fn thumbnail_args(&self, index: usize, bounds: SourceBounds) -> Vec<String> {
        let mut out = args(["-hide_banner", "-loglevel", "error"]);
        out.extend(self.screen_input(index, bounds));
        out.extend(args([
            "-frames:v",
            "1",
            "-f",
            "image2pipe",
            "-c:v",
            "png",
            "pipe:1",
        ]));
        out
    }
}

#[track_caller]
pub(crate) fn recorder_error(reason: String) -> CaptureError {
    CaptureError::Recorder {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}

fn args<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
