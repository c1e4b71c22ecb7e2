use crate::{CoreResult, source::CaptureSource, source::MenuItem};

use tokio::sync::oneshot;

/// Channel name of the source enumeration request.
pub const GET_SOURCES: &str = "get-sources";
/// Channel name of the context menu request.
pub const SHOW_CONTEXT_MENU: &str = "show-context-menu";
/// Channel name of the menu selection event.
pub const CONTEXT_MENU_SELECTION: &str = "context-menu-selection";

/// Requests the UI may send to the privileged host. This is the whole
/// whitelisted surface.
#[derive(Debug)]
pub enum HostRequest {
    /// Enumerate capture sources.
    GetSources {
        /// Receives the source list or the enumeration error.
        reply: oneshot::Sender<CoreResult<Vec<CaptureSource>>>,
    },
    /// Pop up a native menu with one entry per item.
    ShowContextMenu {
        /// Entries in display order.
        items: Vec<MenuItem>,
        /// Acknowledged once the menu is shown, not when an item is picked.
        reply: oneshot::Sender<CoreResult<()>>,
    },
}

impl HostRequest {
    /// Channel name this request travels on.
    pub fn channel(&self) -> &'static str {
        match self {
            HostRequest::GetSources { .. } => GET_SOURCES,
            HostRequest::ShowContextMenu { .. } => SHOW_CONTEXT_MENU,
        }
    }
}

/// One-way notifications from the host to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The user picked a menu entry.
    ContextMenuSelection {
        /// Id of the picked [`MenuItem`].
        id: String,
    },
}

impl HostEvent {
    /// Channel name this event travels on.
    pub fn channel(&self) -> &'static str {
        match self {
            HostEvent::ContextMenuSelection { .. } => CONTEXT_MENU_SELECTION,
        }
    }
}
