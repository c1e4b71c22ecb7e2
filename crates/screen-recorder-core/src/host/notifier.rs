use crate::protocol::HostEvent;

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Delivers menu clicks back to the UI as one-way events.
///
/// Cloned into every click handler a [`MenuPresenter`](crate::MenuPresenter)
/// registers. Sending never blocks and never fails loudly: if the UI has
/// gone away the click is dropped with a warning.
#[derive(Debug, Clone)]
pub struct SelectionNotifier {
    events: mpsc::UnboundedSender<HostEvent>,
}

impl SelectionNotifier {
    /// Creates a notifier writing into the UI's event channel.
    pub fn new(events: mpsc::UnboundedSender<HostEvent>) -> Self {
        Self { events }
    }

    /// Reports that the entry with `id` was picked.
    pub fn notify(&self, id: &str) {
        let event = HostEvent::ContextMenuSelection { id: id.to_string() };
        debug!(channel = event.channel(), id, "Forwarding menu selection");

        if self.events.send(event).is_err() {
            warn!(id, "Menu selection dropped, UI channel closed");
        }
    }
}
