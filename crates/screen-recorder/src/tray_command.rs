use crate::TrayIconState;

use screen_recorder_core::{HostRequest, Thumbnail};
use tray_icon::menu::MenuId;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns the tray and the privileged host (because
/// `TrayIcon` is `!Send` and monitor enumeration needs the event loop),
/// so tray mutations, host requests and process lifecycle events all flow
/// through this enum.
pub enum TrayCommand {
    /// Update the tray icon to a new state.
    SetState(TrayIconState),
    /// Show the selected source as the idle tray icon.
    Preview {
        /// Tooltip text naming the previewed source.
        label: String,
        /// Source thumbnail, if one was captured.
        thumbnail: Option<Thumbnail>,
    },
    /// Request for the privileged host.
    Host(HostRequest),
    /// A tray menu item that is not one of the fixed controls was clicked.
    MenuActivated(MenuId),
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
