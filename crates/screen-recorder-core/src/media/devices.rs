use crate::{CoreResult, media::MediaStream, source::CaptureSource};

/// Platform media stream acquisition.
#[allow(async_fn_in_trait)]
pub trait MediaDevices {
    /// Acquires video plus desktop audio for `source`.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::MediaAcquisition`](crate::CaptureError::MediaAcquisition)
    /// if capture is denied or the source is gone.
    async fn acquire_desktop(&mut self, source: &CaptureSource) -> CoreResult<MediaStream>;

    /// Acquires a microphone-only audio stream.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::MediaAcquisition`](crate::CaptureError::MediaAcquisition)
    /// if no microphone is available or access is denied.
    async fn acquire_microphone(&mut self) -> CoreResult<MediaStream>;
}
