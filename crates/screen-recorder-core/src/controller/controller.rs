//! UI-side orchestration: source picking, stream acquisition and the
//! record/stop state machine.
//!
//! The controller is meant to be owned by a single task. Every mutation of
//! the session and its chunk list happens through `&mut self`, so chunk
//! order is the order in which the owning task feeds recorder events in.

use crate::{
    CaptureError, CoreResult,
    controller::{RECORDING_MESSAGE, UiSurface},
    media::{MediaDevices, MediaStreamBundle},
    protocol::{HostApi, HostEvent},
    recording::{
        Blob, DEFAULT_FILE_NAME, DownloadSink, MediaRecorder, ObjectUrlStore, RecorderEvent,
        RecordingSession, RecordingState,
    },
    source::{CaptureSource, menu_items},
};

use std::{panic::Location, path::PathBuf};

use error_location::ErrorLocation;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, trace, warn};
use uuid::Uuid;

/// Drives the capture flow against the host channel and platform seams.
pub struct UiController<H, D, R, U, S> {
    host: H,
    devices: D,
    recorder: R,
    ui: U,
    sink: S,
    recorder_events: mpsc::UnboundedSender<RecorderEvent>,
    sources: Vec<CaptureSource>,
    session: Option<RecordingSession>,
    // A replaced session whose stopped capture has not flushed yet.
    finishing: Option<RecordingSession>,
    urls: ObjectUrlStore,
    file_name: String,
}

impl<H, D, R, U, S> UiController<H, D, R, U, S>
where
    H: HostApi,
    D: MediaDevices,
    R: MediaRecorder,
    U: UiSurface,
    S: DownloadSink,
{
    /// Creates an idle controller. Recorder events must be fed back through
    /// [`handle_recorder_event`](Self::handle_recorder_event) by whoever owns
    /// the receiving end of `recorder_events`.
    pub fn new(
        host: H,
        devices: D,
        recorder: R,
        ui: U,
        sink: S,
        recorder_events: mpsc::UnboundedSender<RecorderEvent>,
    ) -> Self {
        Self {
            host,
            devices,
            recorder,
            ui,
            sink,
            recorder_events,
            sources: Vec::new(),
            session: None,
            finishing: None,
            urls: ObjectUrlStore::new(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    /// Overrides the default download file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Fetches sources and pops up the picker.
    ///
    /// Failures are logged and end the flow; the current session is left
    /// untouched.
    #[instrument(skip(self))]
    pub async fn select_source(&mut self) {
        let sources = match self.host.get_sources().await {
            Ok(sources) => sources,
            Err(e) => {
                error!(error = %e, "Error getting sources");
                return;
            }
        };

        let items = menu_items(&sources);
        self.sources = sources;

        if let Err(e) = self.host.show_context_menu(items).await {
            error!(error = %e, "Error showing source menu");
        }
    }

    /// Dispatches a one-way event from the host.
    pub async fn handle_host_event(&mut self, event: HostEvent) -> CoreResult<()> {
        match event {
            HostEvent::ContextMenuSelection { id } => self.on_menu_selection(&id).await,
        }
    }

    /// Switches to the picked source.
    ///
    /// An id missing from the last fetched list is ignored. Acquisition
    /// failures are reported to the user and returned.
    #[instrument(skip(self))]
    pub async fn on_menu_selection(&mut self, id: &str) -> CoreResult<()> {
        let source = match self.resolve(id) {
            Ok(source) => source.clone(),
            Err(e @ CaptureError::StaleSelection { .. }) => {
                debug!(error = %e, "Ignoring stale selection");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        info!(source_id = %source.id, source_name = %source.name, "Selected source");

        if let Err(e) = self.use_source(&source).await {
            error!(source_id = %source.id, error = %e, "Failed to acquire media streams");
            self.ui.report_error(&e);
            return Err(e);
        }

        Ok(())
    }

    /// Looks `id` up in the last fetched source list.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::StaleSelection`] if no source has that id.
    #[track_caller]
    pub fn resolve(&self, id: &str) -> CoreResult<&CaptureSource> {
        self.sources
            .iter()
            .find(|source| source.id == id)
            .ok_or_else(|| CaptureError::StaleSelection {
                id: id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    async fn use_source(&mut self, source: &CaptureSource) -> CoreResult<()> {
        self.release_session().await;

        let desktop = self.devices.acquire_desktop(source).await?;
        let microphone = self.devices.acquire_microphone().await?;
        let bundle = MediaStreamBundle::merge(source, desktop, microphone)?;

        // Muted so the captured desktop audio does not loop through playback.
        self.ui.attach_preview(source, &bundle, true);

        let session = RecordingSession::new(bundle);
        info!(
            session_id = %session.id(),
            track_count = session.bundle().tracks().len(),
            "Recording session ready"
        );
        self.session = Some(session);

        Ok(())
    }

    // Drops the current session. A running capture is stopped and thrown
    // away; a stopped one that is still flushing is kept until it lands.
    async fn release_session(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        match session.state() {
            RecordingState::Recording => {
                if let Err(e) = self.recorder.stop().await {
                    warn!(error = %e, "Failed to stop abandoned capture");
                }
                if let Some(capture_id) = session.abort() {
                    info!(capture_id = %capture_id, "Discarded running capture");
                }
                self.ui.hide_recording_indicator();
            }
            RecordingState::Idle if session.is_finalizing() => {
                if let Some(previous) = self.finishing.replace(session) {
                    warn!(session_id = %previous.id(), "Dropping unfinished recording");
                }
            }
            RecordingState::Idle => {
                debug!(session_id = %session.id(), "Session released");
            }
        }
    }

    /// Starts recording. Does nothing without a session or while a capture
    /// is active.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> CoreResult<()> {
        let Some(session) = self.session.as_mut() else {
            debug!("Start ignored, no source selected");
            return Ok(());
        };

        let Some(capture_id) = session.begin() else {
            debug!(session_id = %session.id(), "Start ignored, capture already active");
            return Ok(());
        };

        let started = self
            .recorder
            .start(capture_id, session.bundle(), self.recorder_events.clone())
            .await;

        if let Err(e) = started {
            session.abort();
            error!(capture_id = %capture_id, error = %e, "Failed to start recorder");
            self.ui.report_error(&e);
            return Err(e);
        }

        self.ui.show_recording_indicator(RECORDING_MESSAGE);
        info!(capture_id = %capture_id, "Recording started");

        Ok(())
    }

    /// Stops recording. Does nothing unless recording. The file is
    /// produced when the recorder reports the capture stopped.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> CoreResult<()> {
        let Some(session) = self.session.as_mut() else {
            debug!("Stop ignored, no source selected");
            return Ok(());
        };

        if session.state() != RecordingState::Recording {
            debug!(session_id = %session.id(), "Stop ignored, not recording");
            return Ok(());
        }

        if let Err(e) = self.recorder.stop().await {
            session.abort();
            self.ui.hide_recording_indicator();
            error!(error = %e, "Failed to stop recorder");
            self.ui.report_error(&e);
            return Err(e);
        }

        session.end();
        self.ui.hide_recording_indicator();
        info!("Recording stopped");

        Ok(())
    }

    /// Starts when idle, stops when recording.
    pub async fn toggle(&mut self) -> CoreResult<()> {
        match self.state() {
            RecordingState::Idle => self.start().await,
            RecordingState::Recording => self.stop().await,
        }
    }

    /// Abandons any running capture.
    pub async fn shutdown(&mut self) {
        self.release_session().await;
        self.finishing = None;
    }

    /// Feeds one recorder event into the session it belongs to.
    ///
    /// Returns the saved file path when the event completed a recording.
    ///
    /// # Errors
    ///
    /// Returns the recorder failure, or the download failure when saving
    /// the finished file did not work. Both are reported to the user.
    #[instrument(skip(self, event), fields(capture_id = %event.capture_id()))]
    pub fn handle_recorder_event(&mut self, event: RecorderEvent) -> CoreResult<Option<PathBuf>> {
        let capture_id = event.capture_id();

        let Some(session) = self.session_for(capture_id) else {
            trace!("Dropping event of abandoned capture");
            return Ok(None);
        };

        let blob = match event {
            RecorderEvent::DataAvailable { data, .. } => {
                let segment_len = data.len();
                if session.push_segment(capture_id, data) {
                    trace!(segment_len, chunk_count = session.chunk_count(), "Segment appended");
                }
                return Ok(None);
            }
            RecorderEvent::Stopped { .. } => session.finish(capture_id),
            RecorderEvent::Failed { reason, .. } => {
                let was_recording = session.state() == RecordingState::Recording;
                session.abort();
                if was_recording {
                    self.ui.hide_recording_indicator();
                }

                self.clear_settled_finishing();

                let e = CaptureError::Recorder {
                    reason,
                    location: ErrorLocation::from(Location::caller()),
                };
                error!(error = %e, "Recorder failed");
                self.ui.report_error(&e);
                return Err(e);
            }
        };

        self.clear_settled_finishing();

        match blob {
            Some(blob) => self.save(blob).map(Some),
            None => Ok(None),
        }
    }

    /// Drops the replaced session once its capture has ended.
    fn clear_settled_finishing(&mut self) {
        if self
            .finishing
            .as_ref()
            .is_some_and(|s| s.active_capture().is_none())
        {
            self.finishing = None;
        }
    }

    fn session_for(&mut self, capture_id: Uuid) -> Option<&mut RecordingSession> {
        let owns = |session: &Option<RecordingSession>| {
            session
                .as_ref()
                .and_then(RecordingSession::active_capture)
                == Some(capture_id)
        };

        if owns(&self.session) {
            self.session.as_mut()
        } else if owns(&self.finishing) {
            self.finishing.as_mut()
        } else {
            None
        }
    }

    // Registers the blob under a local URL, downloads it, releases the URL.
    fn save(&mut self, blob: Blob) -> CoreResult<PathBuf> {
        if blob.is_empty() {
            warn!("Recording produced no data");
        }

        let url = self.urls.create(blob);
        let result = match self.urls.resolve(&url) {
            Some(blob) => self.sink.download(blob, &self.file_name),
            None => Err(CaptureError::Download {
                reason: format!("Object URL {} is not registered", url.as_str()),
                location: ErrorLocation::from(Location::caller()),
            }),
        };
        self.urls.revoke(&url);

        match result {
            Ok(path) => {
                self.ui.recording_saved(&path);
                Ok(path)
            }
            Err(e) => {
                error!(error = %e, "Failed to save recording");
                self.ui.report_error(&e);
                Err(e)
            }
        }
    }

    /// Current recording state. `Idle` when no source is selected.
    pub fn state(&self) -> RecordingState {
        self.session
            .as_ref()
            .map_or(RecordingState::Idle, RecordingSession::state)
    }

    /// Session bound to the selected source, if any.
    pub fn session(&self) -> Option<&RecordingSession> {
        self.session.as_ref()
    }

    /// Replaced session whose capture is still flushing, if any.
    pub fn finishing_session(&self) -> Option<&RecordingSession> {
        self.finishing.as_ref()
    }

    /// Sources from the last successful enumeration.
    pub fn sources(&self) -> &[CaptureSource] {
        &self.sources
    }

    /// Number of object URLs not yet revoked.
    pub fn live_object_urls(&self) -> usize {
        self.urls.len()
    }

    /// The host channel.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The UI surface.
    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// The platform recorder.
    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// The download sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
