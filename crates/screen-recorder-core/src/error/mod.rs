use error_location::ErrorLocation;
use thiserror::Error;

/// Capture pipeline errors with source location tracking.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Capture source enumeration failed on the privileged side.
    #[error("Platform error: {reason} {location}")]
    Platform {
        /// Description of the enumeration failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The OS denied a media stream or the source disappeared.
    #[error("Media acquisition failed: {reason} {location}")]
    MediaAcquisition {
        /// Description of the acquisition failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A menu selection no longer matches any known source.
    #[error("Selection {id:?} matches no known capture source {location}")]
    StaleSelection {
        /// The selected id that could not be resolved.
        id: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Native menu could not be built or shown.
    #[error("Menu error: {reason} {location}")]
    Menu {
        /// Description of the menu failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The platform recorder failed to start or stop.
    #[error("Recorder error: {reason} {location}")]
    Recorder {
        /// Description of the recorder failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Saving the finished recording failed.
    #[error("Download failed: {reason} {location}")]
    Download {
        /// Description of the download failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The other end of a host or recorder channel is gone.
    #[error("Channel closed: {channel} {location}")]
    ChannelClosed {
        /// Name of the closed channel.
        channel: &'static str,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CaptureError`].
pub type Result<T> = std::result::Result<T, CaptureError>;
