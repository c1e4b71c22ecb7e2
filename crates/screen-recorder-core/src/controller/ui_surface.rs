use crate::{CaptureError, media::MediaStreamBundle, source::CaptureSource};

use std::path::Path;

/// User-facing feedback channel of the controller.
///
/// Implementations report their own failures through logging; the
/// controller never fails because feedback could not be shown.
pub trait UiSurface {
    /// Binds `bundle` to the live preview and starts playback.
    fn attach_preview(&mut self, source: &CaptureSource, bundle: &MediaStreamBundle, muted: bool);

    /// Shows the persistent "recording in progress" indicator.
    fn show_recording_indicator(&mut self, message: &str);

    /// Hides the recording indicator.
    fn hide_recording_indicator(&mut self);

    /// Tells the user something went wrong.
    fn report_error(&mut self, error: &CaptureError);

    /// Tells the user where the finished recording was saved.
    fn recording_saved(&mut self, path: &Path);
}
