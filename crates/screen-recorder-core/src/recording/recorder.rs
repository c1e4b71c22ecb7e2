use crate::{CoreResult, media::MediaStreamBundle};

use tokio::sync::mpsc;
use uuid::Uuid;

/// Notifications from a running platform recorder.
///
/// Every event carries the capture id passed to [`MediaRecorder::start`] so
/// that late events from an abandoned capture can be told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderEvent {
    /// The recorder flushed a segment of encoded data.
    DataAvailable {
        /// Capture the data belongs to.
        capture_id: Uuid,
        /// Encoded bytes. May be empty.
        data: Vec<u8>,
    },
    /// The recorder finished flushing after a stop.
    Stopped {
        /// Capture that finished.
        capture_id: Uuid,
    },
    /// The recorder died on its own.
    Failed {
        /// Capture that failed.
        capture_id: Uuid,
        /// What went wrong.
        reason: String,
    },
}

impl RecorderEvent {
    /// Capture this event belongs to.
    pub fn capture_id(&self) -> Uuid {
        match self {
            RecorderEvent::DataAvailable { capture_id, .. }
            | RecorderEvent::Stopped { capture_id }
            | RecorderEvent::Failed { capture_id, .. } => *capture_id,
        }
    }
}

/// Encodes a media bundle into a video container, segment by segment.
#[allow(async_fn_in_trait)]
pub trait MediaRecorder {
    /// Starts capturing `bundle`. Data segments and the final
    /// [`RecorderEvent::Stopped`] are sent on `events`, in capture order.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Recorder`](crate::CaptureError::Recorder) if
    /// capture could not be started.
    async fn start(
        &mut self,
        capture_id: Uuid,
        bundle: &MediaStreamBundle,
        events: mpsc::UnboundedSender<RecorderEvent>,
    ) -> CoreResult<()>;

    /// Requests the running capture to stop. Remaining data and the
    /// `Stopped` event follow asynchronously.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Recorder`](crate::CaptureError::Recorder) if
    /// the stop request could not be delivered.
    async fn stop(&mut self) -> CoreResult<()>;
}
