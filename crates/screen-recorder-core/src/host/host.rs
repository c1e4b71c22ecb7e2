//! Privileged side of the capture app.
//!
//! Owns OS-level source enumeration and native menus. Only the two
//! operations of the host channel are reachable from the UI.

use crate::{
    CoreResult,
    host::SelectionNotifier,
    protocol::HostRequest,
    source::{CaptureSource, MenuItem},
};

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

/// Enumerates screens and windows available for capture.
pub trait SourceBackend {
    /// Returns every capturable source, or fails as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Platform`](crate::CaptureError::Platform) if
    /// the OS query fails. No partial lists.
    fn list_sources(&mut self) -> CoreResult<Vec<CaptureSource>>;
}

/// Shows native popup menus.
pub trait MenuPresenter {
    /// Shows one entry per item and returns without waiting for a choice.
    ///
    /// Each entry's click handler must call `notifier.notify(&item.id)`.
    /// Dismissing the menu fires nothing.
    fn popup(&mut self, items: &[MenuItem], notifier: SelectionNotifier) -> CoreResult<()>;
}

/// Serves [`HostRequest`]s against a platform backend and presenter.
pub struct Host<B, P> {
    backend: B,
    presenter: P,
    notifier: SelectionNotifier,
}

impl<B: SourceBackend, P: MenuPresenter> Host<B, P> {
    /// Creates a host whose menu clicks are delivered through `notifier`.
    pub fn new(backend: B, presenter: P, notifier: SelectionNotifier) -> Self {
        Self {
            backend,
            presenter,
            notifier,
        }
    }

    /// Enumerates capture sources. Errors are logged and returned unchanged.
    #[instrument(skip(self))]
    pub fn list_capture_sources(&mut self) -> CoreResult<Vec<CaptureSource>> {
        match self.backend.list_sources() {
            Ok(sources) => {
                info!(source_count = sources.len(), "Capture sources enumerated");
                Ok(sources)
            }
            Err(e) => {
                error!(error = %e, "Error fetching sources");
                Err(e)
            }
        }
    }

    /// Pops up the source picker.
    #[instrument(skip(self, items), fields(item_count = items.len()))]
    pub fn show_context_menu(&mut self, items: &[MenuItem]) -> CoreResult<()> {
        self.presenter.popup(items, self.notifier.clone())?;
        debug!("Context menu shown");
        Ok(())
    }

    /// Handles one request and replies on its oneshot.
    ///
    /// A reply nobody waits for anymore is discarded.
    pub fn handle(&mut self, request: HostRequest) {
        match request {
            HostRequest::GetSources { reply } => {
                let _ = reply.send(self.list_capture_sources());
            }
            HostRequest::ShowContextMenu { items, reply } => {
                let _ = reply.send(self.show_context_menu(&items));
            }
        }
    }

    /// Serves requests until every sender is dropped.
    pub async fn serve(mut self, mut requests: mpsc::UnboundedReceiver<HostRequest>) {
        while let Some(request) = requests.recv().await {
            debug!(channel = request.channel(), "Host request received");
            self.handle(request);
        }
        info!("Host channel closed");
    }

    /// Mutable access to the enumeration backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Mutable access to the menu presenter.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}
