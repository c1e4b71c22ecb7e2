use crate::source::Thumbnail;

/// Whether a source is a whole screen or a single application window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// An entire monitor.
    Screen,
    /// One top-level application window.
    Window,
}

/// Region of the virtual desktop covered by a source, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceBounds {
    /// Left edge relative to the virtual desktop origin.
    pub x: i32,
    /// Top edge relative to the virtual desktop origin.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A screen or window the platform can capture.
///
/// Produced by one enumeration request and immutable afterwards. The UI
/// keeps the last enumerated list only until the next enumeration
/// replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSource {
    /// Opaque identifier, the capture target for stream acquisition.
    pub id: String,
    /// Human-readable name shown in the picker.
    pub name: String,
    /// Screen or window.
    pub kind: SourceKind,
    /// Monitor identifier when the platform reports one.
    pub display_id: Option<String>,
    /// Captured region, when known.
    pub bounds: Option<SourceBounds>,
    /// Small preview image, when one could be grabbed.
    pub thumbnail: Option<Thumbnail>,
}

impl CaptureSource {
    /// Creates a source with no bounds, display id or thumbnail.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            display_id: None,
            bounds: None,
            thumbnail: None,
        }
    }

    /// Sets the captured region.
    pub fn with_bounds(mut self, bounds: SourceBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Sets the monitor identifier.
    pub fn with_display_id(mut self, display_id: impl Into<String>) -> Self {
        self.display_id = Some(display_id.into());
        self
    }

    /// Attaches a preview thumbnail.
    pub fn with_thumbnail(mut self, thumbnail: Thumbnail) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }
}
