mod audio_config;
mod capture_config;
#[allow(clippy::module_inception)]
mod config;
mod recording_config;

pub(crate) use {
    audio_config::AudioConfig, capture_config::CaptureConfig, config::Config,
    recording_config::RecordingConfig,
};

pub(crate) const DEFAULT_FPS: u32 = 30;
pub(crate) const DEFAULT_THUMBNAIL_WIDTH: u32 = 160;
pub(crate) const DEFAULT_STOP_TIMEOUT_MS: u64 = 5_000;
pub(crate) const DEFAULT_THUMBNAIL_TIMEOUT_MS: u64 = 3_000;
pub(crate) const DEFAULT_SEGMENT_BYTES: usize = 64 * 1024;

pub(crate) fn default_fps() -> u32 {
    DEFAULT_FPS
}

pub(crate) fn default_thumbnail_width() -> u32 {
    DEFAULT_THUMBNAIL_WIDTH
}

pub(crate) fn default_stop_timeout_ms() -> u64 {
    DEFAULT_STOP_TIMEOUT_MS
}

pub(crate) fn default_thumbnail_timeout_ms() -> u64 {
    DEFAULT_THUMBNAIL_TIMEOUT_MS
}

pub(crate) fn default_segment_bytes() -> usize {
    DEFAULT_SEGMENT_BYTES
}

pub(crate) fn default_ffmpeg_path() -> std::path::PathBuf {
    std::path::PathBuf::from("ffmpeg")
}

pub(crate) fn default_file_name() -> String {
    screen_recorder_core::DEFAULT_FILE_NAME.to_string()
}
