//! `UiSurface` for a tray-only app: the tray icon is the preview and the
//! recording indicator, everything else is a desktop notification.

use crate::{TrayCommand, TrayIconState};

use screen_recorder_core::{CaptureError, CaptureSource, MediaStreamBundle, UiSurface};

use std::path::Path;

use notify_rust::Notification;
use tao::event_loop::EventLoopProxy;
use tracing::{info, instrument, warn};

const APP_NAME: &str = "Screen Recorder";

/// Forwards controller feedback to the tray and the notification center.
pub struct TrayUi {
    proxy: EventLoopProxy<TrayCommand>,
}

impl TrayUi {
    /// Feedback through the event loop behind `proxy`.
    pub fn new(proxy: EventLoopProxy<TrayCommand>) -> Self {
        Self { proxy }
    }

    fn send(&self, command: TrayCommand) {
        if self.proxy.send_event(command).is_err() {
            warn!("Event loop closed, dropping tray update");
        }
    }

    fn notify(&self, summary: &str, body: &str) {
        if let Err(e) = Notification::new()
            .appname(APP_NAME)
            .summary(summary)
            .body(body)
            .show()
        {
            warn!(error = %e, summary, "Failed to show notification");
        }
    }
}

impl UiSurface for TrayUi {
    #[instrument(skip(self, source, bundle), fields(source_id = %source.id))]
    fn attach_preview(&mut self, source: &CaptureSource, bundle: &MediaStreamBundle, muted: bool) {
        let label = if muted {
            format!("Previewing {} (muted)", source.name)
        } else {
            format!("Previewing {}", source.name)
        };

        info!(
            video_tracks = bundle.video_tracks().count(),
            audio_tracks = bundle.audio_tracks().count(),
            muted,
            "Preview attached"
        );

        self.send(TrayCommand::Preview {
            label,
            thumbnail: source.thumbnail.clone(),
        });
    }

    fn show_recording_indicator(&mut self, message: &str) {
        self.send(TrayCommand::SetState(TrayIconState::Recording));
        self.notify(APP_NAME, message);
    }

    fn hide_recording_indicator(&mut self) {
        self.send(TrayCommand::SetState(TrayIconState::Idle));
    }

    fn report_error(&mut self, error: &CaptureError) {
        let summary = match error {
            CaptureError::MediaAcquisition { .. } => "Could not capture the selected source",
            CaptureError::Download { .. } => "Could not save the recording",
            _ => "Recording failed",
        };
        self.notify(summary, &error.to_string());
    }

    fn recording_saved(&mut self, path: &Path) {
        info!(path = ?path, "Recording saved");
        self.notify("Recording saved", &path.display().to_string());
    }
}
