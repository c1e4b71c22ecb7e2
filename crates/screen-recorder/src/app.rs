use crate::{
    AppCommand, AppResult, DesktopMediaDevices, FfmpegRecorder, MainThreadSink,
    ThumbnailingHost, TrayCommand, TrayUi, tray_manager::MenuIds,
};

use screen_recorder_core::{
    DownloadDirectory, HostBridge, HostEvent, RecorderEvent, RecordingSession, RecordingState,
    UiController,
};

use std::{fs, path::PathBuf, time::Duration};

use tao::event_loop::EventLoopProxy;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, instrument, warn};
use tray_icon::menu::{MenuEvent, MenuId};

/// Controller wired to the desktop implementations.
pub(crate) type DesktopController = UiController<
    ThumbnailingHost<HostBridge<MainThreadSink>>,
    DesktopMediaDevices,
    FfmpegRecorder,
    TrayUi,
    DownloadDirectory,
>;

/// How long exit waits for a stopped capture to land on disk.
const SHUTDOWN_FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Main application state.
///
/// Runs on the async runtime thread and owns the controller, so every
/// controller mutation happens on this one task. Tray updates and host
/// requests go back to the main thread through `tray_proxy` because
/// `TrayIcon` is `!Send` and must remain on the UI thread.
pub struct App {
    pub(crate) controller: DesktopController,
    pub(crate) tray_proxy: EventLoopProxy<TrayCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) host_events: mpsc::UnboundedReceiver<HostEvent>,
    pub(crate) recorder_events: mpsc::UnboundedReceiver<RecorderEvent>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) menu_ids: MenuIds,
    pub(crate) recordings_dir: PathBuf,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Screen Recorder starting");

        // MenuEvent::receiver() is a blocking crossbeam receiver. The task
        // ends when tray_event_rx is dropped and blocking_send fails.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    match menu_command(&self.menu_ids, &event.id) {
                        Some(AppCommand::Shutdown) => {
                            info!("Exit requested from tray menu");
                            break;
                        }
                        Some(cmd) => self.run_command(cmd).await,
                        None => {
                            if self.tray_proxy.send_event(TrayCommand::MenuActivated(event.id)).is_err() {
                                warn!("Event loop closed, dropping menu click");
                            }
                        }
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    if cmd == AppCommand::Shutdown {
                        info!("Shutdown requested");
                        break;
                    }
                    self.run_command(cmd).await;
                }

                Some(event) = self.host_events.recv() => {
                    if let Err(e) = self.handle_host_event(event).await {
                        error!(error = %e, "Failed to handle source selection");
                    }
                }

                Some(event) = self.recorder_events.recv() => {
                    self.on_recorder_event(event);
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        drop(tray_event_rx);

        self.finish_recording().await;
        self.controller.shutdown().await;

        match tokio::time::timeout(Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        let _ = self.shutdown_tx.send(true);
        let _ = self.tray_proxy.send_event(TrayCommand::Shutdown);
        info!("Screen Recorder shut down successfully");

        Ok(())
    }

    async fn run_command(&mut self, cmd: AppCommand) {
        if let Err(e) = self.handle_command(cmd).await {
            error!(command = ?cmd, error = %e, "Command failed");
        }
    }

    #[instrument(skip(self))]
    async fn handle_command(&mut self, cmd: AppCommand) -> AppResult<()> {
        match cmd {
            AppCommand::SelectSource => self.controller.select_source().await,
            AppCommand::StartRecording => self.controller.start().await?,
            AppCommand::StopRecording => self.controller.stop().await?,
            AppCommand::ToggleRecording => self.controller.toggle().await?,
            AppCommand::OpenRecordingsFolder => self.open_recordings_folder()?,
            AppCommand::Shutdown => {}
        }

        Ok(())
    }

    async fn handle_host_event(&mut self, event: HostEvent) -> AppResult<()> {
        self.controller.handle_host_event(event).await?;
        Ok(())
    }

    fn on_recorder_event(&mut self, event: RecorderEvent) {
        match self.controller.handle_recorder_event(event) {
            Ok(Some(path)) => info!(path = ?path, "Recording written"),
            Ok(None) => {}
            Err(e) => error!(error = %e, "Recorder event failed"),
        }
    }

    // Stops a running capture and waits for its file so exiting mid-recording
    // still saves what was captured.
    async fn finish_recording(&mut self) {
        if self.controller.state() == RecordingState::Recording {
            if let Err(e) = self.controller.stop().await {
                error!(error = %e, "Failed to stop recording on exit");
                return;
            }
        }

        let deadline = tokio::time::Instant::now() + SHUTDOWN_FLUSH_TIMEOUT;
        while self
            .controller
            .session()
            .is_some_and(RecordingSession::is_finalizing)
        {
            match tokio::time::timeout_at(deadline, self.recorder_events.recv()).await {
                Ok(Some(event)) => self.on_recorder_event(event),
                Ok(None) => break,
                Err(_) => {
                    warn!("Recording did not finish before exit, discarding it");
                    break;
                }
            }
        }
    }

    fn open_recordings_folder(&self) -> AppResult<()> {
        fs::create_dir_all(&self.recordings_dir)?;
        open::that(&self.recordings_dir)?;
        info!(dir = ?self.recordings_dir, "Opened recordings folder");
        Ok(())
    }
}

/// Command behind a fixed tray menu item. `None` for picker entries.
pub(crate) fn menu_command(ids: &MenuIds, id: &MenuId) -> Option<AppCommand> {
    if *id == ids.select_source {
        Some(AppCommand::SelectSource)
    } else if *id == ids.start {
        Some(AppCommand::StartRecording)
    } else if *id == ids.stop {
        Some(AppCommand::StopRecording)
    } else if *id == ids.open_folder {
        Some(AppCommand::OpenRecordingsFolder)
    } else if *id == ids.exit {
        Some(AppCommand::Shutdown)
    } else {
        None
    }
}
