//! Source thumbnails grabbed on the async runtime.
//!
//! The host lists screens without images so the event loop never waits on
//! ffmpeg. [`ThumbnailingHost`] fills the images in before the sources reach
//! the controller, each grab bounded by a timeout.

use crate::{desktop_sources::screen_index, ffmpeg::FfmpegCommand};

use screen_recorder_core::{
    CaptureError, CaptureSource, CoreResult, HostApi, MenuItem, SourceBounds, Thumbnail,
};

use std::{
    ffi::OsStr,
    panic::Location,
    path::{Path, PathBuf},
    process::{Output, Stdio},
    time::Duration,
};

use error_location::ErrorLocation;
use tokio::{process::Command, task::JoinSet};
use tracing::{debug, instrument, warn};

/// Grabs single PNG frames of monitors with ffmpeg.
#[derive(Debug, Clone)]
pub struct ThumbnailGrabber {
    ffmpeg_path: PathBuf,
    command: FfmpegCommand,
    width: u32,
    timeout: Duration,
}

impl ThumbnailGrabber {
    /// Grabs thumbnails at most `width` pixels wide, giving each ffmpeg run
    /// `timeout` before it is killed.
    pub fn new(
        ffmpeg_path: impl Into<PathBuf>,
        command: FfmpegCommand,
        width: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            command,
            width,
            timeout,
        }
    }

    /// One downscaled frame of monitor `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Platform`] if ffmpeg cannot run, fails, takes
    /// longer than the timeout, or produces an unreadable image.
    pub async fn grab(&self, index: usize, bounds: SourceBounds) -> CoreResult<Thumbnail> {
        let output = run_with_timeout(
            &self.ffmpeg_path,
            self.command.thumbnail_args(index, bounds),
            self.timeout,
        )
        .await?;

        if !output.status.success() {
            return Err(platform_error(format!(
                "ffmpeg frame grab exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Thumbnail::from_png(&output.stdout, self.width)
    }

    /// Attaches a thumbnail to every screen source. Grabs run concurrently
    /// and a failed grab leaves its source without an image.
    #[instrument(skip(self, sources), fields(source_count = sources.len()))]
    pub async fn fill(&self, sources: &mut [CaptureSource]) {
        let mut grabs = JoinSet::new();

        for (position, source) in sources.iter().enumerate() {
            let (Some(index), Some(bounds)) = (screen_index(&source.id), source.bounds) else {
                continue;
            };
            let grabber = self.clone();
            grabs.spawn(async move { (position, grabber.grab(index, bounds).await) });
        }

        while let Some(joined) = grabs.join_next().await {
            let (position, result) = match joined {
                Ok(grabbed) => grabbed,
                Err(e) => {
                    warn!(error = %e, "Thumbnail task failed");
                    continue;
                }
            };
            let Some(source) = sources.get_mut(position) else {
                continue;
            };
            match result {
                Ok(thumbnail) => {
                    debug!(source_id = %source.id, "Thumbnail grabbed");
                    source.thumbnail = Some(thumbnail);
                }
                Err(e) => warn!(source_id = %source.id, error = %e, "No thumbnail for source"),
            }
        }
    }
}

/// Host client that adds thumbnails to the sources the host enumerates.
pub struct ThumbnailingHost<H> {
    inner: H,
    grabber: Option<ThumbnailGrabber>,
}

impl<H> ThumbnailingHost<H> {
    /// Wraps `inner`. Without a grabber sources pass through unchanged.
    pub fn new(inner: H, grabber: Option<ThumbnailGrabber>) -> Self {
        Self { inner, grabber }
    }
}

impl<H: HostApi> HostApi for ThumbnailingHost<H> {
    async fn get_sources(&self) -> CoreResult<Vec<CaptureSource>> {
        let mut sources = self.inner.get_sources().await?;
        if let Some(grabber) = &self.grabber {
            grabber.fill(&mut sources).await;
        }
        Ok(sources)
    }

    async fn show_context_menu(&self, items: Vec<MenuItem>) -> CoreResult<()> {
        self.inner.show_context_menu(items).await
    }
}

/// Runs `program` to completion and collects its output, killing it once
/// `timeout` has passed.
pub(crate) async fn run_with_timeout<I, S>(
    program: &Path,
    args: I,
    timeout: Duration,
) -> CoreResult<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| platform_error(format!("Failed to run {}: {}", program.display(), e)))?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(output) => output.map_err(|e| {
            platform_error(format!("Failed to read {} output: {}", program.display(), e))
        }),
        Err(_) => Err(platform_error(format!(
            "{} did not finish within {:?}",
            program.display(),
            timeout
        ))),
    }
}

#[track_caller]
fn platform_error(reason: String) -> CaptureError {
    CaptureError::Platform {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}
