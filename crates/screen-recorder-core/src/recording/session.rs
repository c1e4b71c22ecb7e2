use crate::{
    media::MediaStreamBundle,
    recording::{Blob, VIDEO_MIME_TYPE},
};

use std::time::Instant;

use tracing::debug;
use uuid::Uuid;

/// User-visible recording state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    /// Not recording.
    Idle,
    /// Capturing data.
    Recording,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Recording { capture_id: Uuid, started_at: Instant },
    // Stopped by the user, waiting for the recorder's final flush.
    Finalizing { capture_id: Uuid },
}

/// Recording state and accumulated data for one media bundle.
///
/// Cycles `Idle -> Recording -> Idle` any number of times. Each start
/// begins a new capture with its own id and an empty chunk list.
#[derive(Debug)]
pub struct RecordingSession {
    id: Uuid,
    bundle: MediaStreamBundle,
    phase: Phase,
    chunks: Vec<Vec<u8>>,
}

impl RecordingSession {
    /// Creates an idle session bound to `bundle`.
    pub fn new(bundle: MediaStreamBundle) -> Self {
        Self {
            id: Uuid::new_v4(),
            bundle,
            phase: Phase::Idle,
            chunks: Vec::new(),
        }
    }

    /// Unique per session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Bundle this session records.
    pub fn bundle(&self) -> &MediaStreamBundle {
        &self.bundle
    }

    /// `Recording` between a start and its stop, `Idle` otherwise.
    pub fn state(&self) -> RecordingState {
        match self.phase {
            Phase::Recording { .. } => RecordingState::Recording,
            Phase::Idle | Phase::Finalizing { .. } => RecordingState::Idle,
        }
    }

    /// Id of the capture currently recording or finalizing.
    pub fn active_capture(&self) -> Option<Uuid> {
        match self.phase {
            Phase::Recording { capture_id, .. } | Phase::Finalizing { capture_id } => {
                Some(capture_id)
            }
            Phase::Idle => None,
        }
    }

    /// True while a stopped capture has not delivered its final flush.
    pub fn is_finalizing(&self) -> bool {
        matches!(self.phase, Phase::Finalizing { .. })
    }

    /// Number of buffered segments.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total buffered bytes.
    pub fn byte_len(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    /// Starts a new capture and returns its id. Returns `None` unless the
    /// session is fully idle.
    ///
    /// Chunks of an earlier capture are dropped: every capture is its own
    /// fMP4 stream and saves to its own file.
    pub fn begin(&mut self) -> Option<Uuid> {
        if self.phase != Phase::Idle {
            return None;
        }

        let capture_id = Uuid::new_v4();
        self.chunks.clear();
        self.phase = Phase::Recording {
            capture_id,
            started_at: Instant::now(),
        };
        Some(capture_id)
    }

    /// Appends a segment of the active capture. Empty segments and
    /// segments of any other capture are dropped.
    pub fn push_segment(&mut self, capture_id: Uuid, data: Vec<u8>) -> bool {
        if data.is_empty() || self.active_capture() != Some(capture_id) {
            return false;
        }

        self.chunks.push(data);
        true
    }

    /// Moves a recording capture to finalizing. Returns `false` if not
    /// recording.
    pub fn end(&mut self) -> bool {
        match self.phase {
            Phase::Recording {
                capture_id,
                started_at,
            } => {
                debug!(
                    session_id = %self.id,
                    capture_id = %capture_id,
                    duration_ms = started_at.elapsed().as_millis(),
                    "Capture ended"
                );
                self.phase = Phase::Finalizing { capture_id };
                true
            }
            Phase::Idle | Phase::Finalizing { .. } => false,
        }
    }

    /// Completes capture `capture_id` and concatenates its segments into
    /// one video blob. Returns `None` if that capture is not the one
    /// finalizing.
    pub fn finish(&mut self, capture_id: Uuid) -> Option<Blob> {
        match self.phase {
            Phase::Finalizing { capture_id: active } if active == capture_id => {
                self.phase = Phase::Idle;
                let bytes = std::mem::take(&mut self.chunks).concat();
                Some(Blob::new(bytes, VIDEO_MIME_TYPE))
            }
            _ => None,
        }
    }

    /// Abandons the active capture, if any, and discards its data.
    pub fn abort(&mut self) -> Option<Uuid> {
        let aborted = self.active_capture();
        self.phase = Phase::Idle;
        self.chunks.clear();
        aborted
    }
}
