/// Commands sent from the hotkey handler and tray menu to the main application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Fetch sources and show the picker.
    SelectSource,
    /// Start recording the selected source.
    StartRecording,
    /// Stop the running capture.
    StopRecording,
    /// Start when idle, stop when recording.
    ToggleRecording,
    /// Open the recordings folder in the file manager.
    OpenRecordingsFolder,
    /// Request application shutdown.
    Shutdown,
}
