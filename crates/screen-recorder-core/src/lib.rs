//! Screen Recorder Core Library
//!
//! Platform-free half of the screen recorder: the data model, the message
//! contract between the privileged host and the UI, the host's request
//! handling, and the UI controller's record/stop state machine. Every OS
//! facility sits behind a trait ([`SourceBackend`], [`MenuPresenter`],
//! [`MediaDevices`], [`MediaRecorder`], [`UiSurface`], [`DownloadSink`]).
//!
//! # Example
//!
//! ```no_run
//! use screen_recorder_core::{
//!     CaptureSource, CoreResult, Host, HostBridge, MenuItem, MenuPresenter,
//!     SelectionNotifier, SourceBackend, SourceKind,
//! };
//! use screen_recorder_core::HostApi;
//! use tokio::sync::mpsc;
//!
//! struct Screens;
//!
//! impl SourceBackend for Screens {
//!     fn list_sources(&mut self) -> CoreResult<Vec<CaptureSource>> {
//!         Ok(vec![CaptureSource::new("s1", "Screen 1", SourceKind::Screen)])
//!     }
//! }
//!
//! struct Picker;
//!
//! impl MenuPresenter for Picker {
//!     fn popup(&mut self, items: &[MenuItem], notifier: SelectionNotifier) -> CoreResult<()> {
//!         if let Some(first) = items.first() {
//!             notifier.notify(&first.id);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # async fn run() -> CoreResult<()> {
//! let (request_tx, request_rx) = mpsc::unbounded_channel();
//! let (event_tx, mut event_rx) = mpsc::unbounded_channel();
//! tokio::spawn(Host::new(Screens, Picker, SelectionNotifier::new(event_tx)).serve(request_rx));
//!
//! let bridge = HostBridge::new(request_tx);
//! let sources = bridge.get_sources().await?;
//! bridge.show_context_menu(screen_recorder_core::menu_items(&sources)).await?;
//! let selection = event_rx.recv().await;
//! # Ok(())
//! # }
//! ```

mod controller;
mod error;
mod host;
mod media;
mod protocol;
mod recording;
mod source;

pub use {
    controller::{RECORDING_MESSAGE, UiController, UiSurface},
    error::CaptureError,
    error::Result as CoreResult,
    host::{Host, MenuPresenter, SelectionNotifier, SourceBackend},
    media::{MediaDevices, MediaStream, MediaStreamBundle, MediaTrack, TrackKind, TrackOrigin},
    protocol::{
        CONTEXT_MENU_SELECTION, GET_SOURCES, HostApi, HostBridge, HostEvent, HostRequest,
        RequestSink, SHOW_CONTEXT_MENU,
    },
    recording::{
        Blob, DEFAULT_FILE_NAME, DownloadDirectory, DownloadSink, MediaRecorder, ObjectUrl,
        ObjectUrlStore, RecorderEvent, RecordingSession, RecordingState, VIDEO_MIME_TYPE,
    },
    source::{CaptureSource, MenuItem, SourceBounds, SourceKind, Thumbnail, menu_items},
};

#[cfg(test)]
mod tests;
