//! `MediaRecorder` backed by an ffmpeg child process.
//!
//! ffmpeg writes fragmented MP4 to stdout; a reader task forwards each read
//! as one data segment. Stopping sends `q` on stdin so ffmpeg finalizes the
//! last fragment, and the reader reports `Stopped` once stdout closes.

use crate::ffmpeg::{FfmpegCommand, recorder_error};

use screen_recorder_core::{CoreResult, MediaRecorder, MediaStreamBundle, RecorderEvent};

use std::{
    path::PathBuf,
    process::Stdio,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader},
    process::{Child, ChildStdin, Command},
    sync::mpsc,
    task::JoinHandle,
};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Settings for spawning ffmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegSettings {
    /// ffmpeg executable.
    pub ffmpeg_path: PathBuf,
    /// Argument builder for the target platform.
    pub command: FfmpegCommand,
    /// Largest segment read from stdout at once.
    pub segment_bytes: usize,
    /// Grace period between `q` and killing the process.
    pub stop_timeout: Duration,
}

struct RunningCapture {
    capture_id: Uuid,
    child: Child,
    stdin: Option<ChildStdin>,
    stop_requested: Arc<AtomicBool>,
    output_closed: Arc<AtomicBool>,
    reader: JoinHandle<()>,
}

impl RunningCapture {
    /// ffmpeg has closed its output or already exited.
    fn has_ended(&mut self) -> bool {
        self.output_closed.load(Ordering::Acquire) || matches!(self.child.try_wait(), Ok(Some(_)))
    }
}

/// Records one bundle at a time with ffmpeg.
pub struct FfmpegRecorder {
    settings: FfmpegSettings,
    running: Option<RunningCapture>,
}

impl FfmpegRecorder {
    /// Creates an idle recorder.
    pub fn new(settings: FfmpegSettings) -> Self {
        Self {
            settings,
            running: None,
        }
    }

    /// Capture currently owned by the recorder, if any.
    pub fn active_capture(&self) -> Option<Uuid> {
        self.running.as_ref().map(|running| running.capture_id)
    }
}

impl MediaRecorder for FfmpegRecorder {
    #[instrument(skip(self, bundle, events), fields(source_id = bundle.source_id()))]
    async fn start(
        &mut self,
        capture_id: Uuid,
        bundle: &MediaStreamBundle,
        events: mpsc::UnboundedSender<RecorderEvent>,
    ) -> CoreResult<()> {
        if let Some(running) = self.running.as_mut() {
            if !running.has_ended() {
                return Err(recorder_error(format!(
                    "Capture {} is still running",
                    running.capture_id
                )));
            }
            debug!(capture_id = %running.capture_id, "Reaping ended ffmpeg capture");
            self.running = None;
        }

        let args = self.settings.command.recording_args(bundle)?;
        debug!(args = ?args, "Spawning ffmpeg");

        let mut child = Command::new(&self.settings.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| recorder_error(format!("Failed to spawn ffmpeg: {}", e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| recorder_error("ffmpeg stdout not captured".to_string()))?;
        let stdin = child.stdin.take();

        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(capture_id = %capture_id, ffmpeg = %line, "ffmpeg");
                }
            });
        }

        let stop_requested = Arc::new(AtomicBool::new(false));
        let output_closed = Arc::new(AtomicBool::new(false));
        let reader = tokio::spawn(forward_segments(
            capture_id,
            stdout,
            self.settings.segment_bytes,
            Arc::clone(&stop_requested),
            Arc::clone(&output_closed),
            events,
        ));

        self.running = Some(RunningCapture {
            capture_id,
            child,
            stdin,
            stop_requested,
            output_closed,
            reader,
        });

        info!(capture_id = %capture_id, track_count = bundle.tracks().len(), "ffmpeg capture started");

        Ok(())
    }

    #[instrument(skip(self))]
    async fn stop(&mut self) -> CoreResult<()> {
        let Some(mut running) = self.running.take() else {
            debug!("Stop ignored, no capture running");
            return Ok(());
        };

        running.stop_requested.store(true, Ordering::Release);

        if let Some(mut stdin) = running.stdin.take() {
            // A dead ffmpeg has closed the pipe; the wait below still reaps it.
            if let Err(e) = stdin.write_all(b"q").await {
                warn!(capture_id = %running.capture_id, error = %e, "Failed to ask ffmpeg to quit");
            }
            drop(stdin);
        }

        match tokio::time::timeout(self.settings.stop_timeout, running.child.wait()).await {
            Ok(Ok(status)) if status.success() => {
                debug!(capture_id = %running.capture_id, status = %status, "ffmpeg exited")
            }
            Ok(Ok(status)) => {
                warn!(capture_id = %running.capture_id, status = %status, "ffmpeg exited abnormally")
            }
            Ok(Err(e)) => warn!(capture_id = %running.capture_id, error = %e, "Failed to wait for ffmpeg"),
            Err(_) => {
                warn!(capture_id = %running.capture_id, "ffmpeg did not stop in time, killing it");
                if let Err(e) = running.child.kill().await {
                    error!(capture_id = %running.capture_id, error = %e, "Failed to kill ffmpeg");
                }
            }
        }

        // The reader finishes on its own once stdout closes; it owns the
        // Stopped event, so it is left running rather than awaited here.
        drop(running.reader);

        info!(capture_id = %running.capture_id, "ffmpeg capture stopped");

        Ok(())
    }
}

/// Forwards stdout reads as data segments until EOF, then reports the
/// capture as stopped if a stop was requested and as failed otherwise.
///
/// `output_closed` is raised before the final event is sent.
pub(crate) async fn forward_segments<R>(
    capture_id: Uuid,
    mut stdout: R,
    segment_bytes: usize,
    stop_requested: Arc<AtomicBool>,
    output_closed: Arc<AtomicBool>,
    events: mpsc::UnboundedSender<RecorderEvent>,
) where
    R: AsyncRead + Unpin,
{
    let mut buffer = vec![0u8; segment_bytes.max(1)];

    loop {
        match stdout.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => {
                let event = RecorderEvent::DataAvailable {
                    capture_id,
                    data: buffer[..n].to_vec(),
                };
                if events.send(event).is_err() {
                    debug!(capture_id = %capture_id, "Recorder event receiver gone");
                    output_closed.store(true, Ordering::Release);
                    return;
                }
            }
            Err(e) => {
                output_closed.store(true, Ordering::Release);
                let _ = events.send(RecorderEvent::Failed {
                    capture_id,
                    reason: format!("Failed to read ffmpeg output: {}", e),
                });
                return;
            }
        }
    }

    output_closed.store(true, Ordering::Release);
    let event = if stop_requested.load(Ordering::Acquire) {
        RecorderEvent::Stopped { capture_id }
    } else {
        RecorderEvent::Failed {
            capture_id,
            reason: "ffmpeg exited unexpectedly".to_string(),
        }
    };
    let _ = events.send(event);
}
