mod download;
mod recorder;
mod session;

pub use {
    download::{Blob, DownloadDirectory, DownloadSink, ObjectUrl, ObjectUrlStore},
    recorder::{MediaRecorder, RecorderEvent},
    session::{RecordingSession, RecordingState},
};

/// Default name of the saved recording.
pub const DEFAULT_FILE_NAME: &str = "recording.mp4";

/// Container type of the saved recording.
pub const VIDEO_MIME_TYPE: &str = "video/mp4";
