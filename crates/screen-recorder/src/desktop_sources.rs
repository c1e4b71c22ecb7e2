//! Screen enumeration backed by the event loop's monitor list.
//!
//! Enumeration only copies geometry the loop already has; thumbnails are
//! grabbed later on the runtime by [`ThumbnailingHost`](crate::ThumbnailingHost).

use screen_recorder_core::{
    CaptureError, CaptureSource, CoreResult, SourceBackend, SourceBounds, SourceKind,
};

use std::panic::Location;

use error_location::ErrorLocation;
use tao::monitor::MonitorHandle;
use tracing::{debug, instrument};

const SCREEN_ID_PREFIX: &str = "screen:";

/// Source id of monitor `index`.
pub(crate) fn screen_id(index: usize) -> String {
    format!("{}{}", SCREEN_ID_PREFIX, index)
}

/// Monitor index encoded in a screen source id.
pub(crate) fn screen_index(id: &str) -> Option<usize> {
    id.strip_prefix(SCREEN_ID_PREFIX)?.parse().ok()
}

/// Monitor geometry copied out of the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSnapshot {
    /// OS-reported monitor name.
    pub name: Option<String>,
    /// Position and size on the virtual desktop.
    pub bounds: SourceBounds,
}

impl MonitorSnapshot {
    /// Copies name and geometry out of a live monitor handle.
    pub fn from_handle(handle: &MonitorHandle) -> Self {
        let position = handle.position();
        let size = handle.size();

        Self {
            name: handle.name(),
            bounds: SourceBounds {
                x: position.x,
                y: position.y,
                width: size.width,
                height: size.height,
            },
        }
    }
}

/// Lists every monitor as a screen source.
///
/// Monitors can only be queried on the event loop thread, so the loop
/// calls [`refresh`](Self::refresh) right before each enumeration request.
#[derive(Debug, Default)]
pub struct DesktopSources {
    monitors: Vec<MonitorSnapshot>,
}

impl DesktopSources {
    /// A backend that has not seen any monitor yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the known monitors.
    pub fn refresh(&mut self, monitors: impl IntoIterator<Item = MonitorHandle>) {
        self.set_monitors(monitors.into_iter().map(|m| MonitorSnapshot::from_handle(&m)).collect());
    }

    /// Replaces the known monitors with already captured snapshots.
    pub fn set_monitors(&mut self, monitors: Vec<MonitorSnapshot>) {
        debug!(monitor_count = monitors.len(), "Monitor list refreshed");
        self.monitors = monitors;
    }

    /// One screen source per known monitor, without thumbnails.
    pub fn screen_sources(&self) -> Vec<CaptureSource> {
        self.monitors
            .iter()
            .enumerate()
            .map(|(index, monitor)| {
                let name = match &monitor.name {
                    Some(name) => format!("Screen {} ({})", index + 1, name),
                    None => format!("Screen {}", index + 1),
                };
                CaptureSource::new(screen_id(index), name, SourceKind::Screen)
                    .with_display_id(index.to_string())
                    .with_bounds(monitor.bounds)
            })
            .collect()
    }
}

impl SourceBackend for DesktopSources {
    #[track_caller]
    #[instrument(skip(self), fields(monitor_count = self.monitors.len()))]
    fn list_sources(&mut self) -> CoreResult<Vec<CaptureSource>> {
        if self.monitors.is_empty() {
            return Err(CaptureError::Platform {
                reason: "No screens available".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(self.screen_sources())
    }
}
