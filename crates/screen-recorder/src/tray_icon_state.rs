/// Tray icon states corresponding to the recording workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Not recording.
    Idle,
    /// Capture running. Doubles as the persistent recording indicator.
    Recording,
}
