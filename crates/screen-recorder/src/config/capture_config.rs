use crate::config::{
    default_ffmpeg_path, default_fps, default_stop_timeout_ms, default_thumbnail_timeout_ms,
    default_thumbnail_width,
};

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

/// Screen capture and encoder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// ffmpeg executable, resolved through PATH when relative.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Frames per second.
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Width of source thumbnails in the picker. 0 disables thumbnails.
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: u32,

    /// Longest a single thumbnail grab may take before it is abandoned.
    #[serde(default = "default_thumbnail_timeout_ms")]
    pub thumbnail_timeout_ms: u64,

    /// How long to wait for ffmpeg to finish after a stop before killing it.
    #[serde(default = "default_stop_timeout_ms")]
    pub stop_timeout_ms: u64,
}

impl CaptureConfig {
    /// Stop timeout as a duration.
    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }

    /// Thumbnail grab timeout as a duration.
    pub fn thumbnail_timeout(&self) -> Duration {
        Duration::from_millis(self.thumbnail_timeout_ms)
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            fps: default_fps(),
            thumbnail_width: default_thumbnail_width(),
            thumbnail_timeout_ms: default_thumbnail_timeout_ms(),
            stop_timeout_ms: default_stop_timeout_ms(),
        }
    }
}
