use crate::{
    CaptureError, CoreResult,
    protocol::HostRequest,
    source::{CaptureSource, MenuItem},
};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, instrument};

/// Operations the UI controller may invoke on the privileged host.
#[allow(async_fn_in_trait)]
pub trait HostApi {
    /// Enumerates capture sources.
    async fn get_sources(&self) -> CoreResult<Vec<CaptureSource>>;

    /// Shows a native picker. Resolves once the menu is up; the choice
    /// arrives later as a [`HostEvent`](crate::HostEvent).
    async fn show_context_menu(&self, items: Vec<MenuItem>) -> CoreResult<()>;
}

/// Transport that delivers requests to wherever the host runs.
pub trait RequestSink {
    /// Hands a request to the host without waiting for the reply.
    fn dispatch(&self, request: HostRequest) -> CoreResult<()>;
}

impl RequestSink for mpsc::UnboundedSender<HostRequest> {
    #[track_caller]
    fn dispatch(&self, request: HostRequest) -> CoreResult<()> {
        let channel = request.channel();
        self.send(request)
            .map_err(|_| CaptureError::ChannelClosed {
                channel,
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// UI-side end of the host channel: turns [`HostApi`] calls into
/// request/reply round trips over a [`RequestSink`].
pub struct HostBridge<S> {
    sink: S,
}

impl<S: RequestSink> HostBridge<S> {
    /// Wraps a transport.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: RequestSink> HostApi for HostBridge<S> {
    #[instrument(skip(self))]
    async fn get_sources(&self) -> CoreResult<Vec<CaptureSource>> {
        let (reply, response) = oneshot::channel();
        self.sink.dispatch(HostRequest::GetSources { reply })?;

        let result = await_reply(response, crate::protocol::GET_SOURCES).await?;
        if let Err(ref e) = result {
            error!(error = %e, "Error in get_sources");
        }
        result
    }

    #[instrument(skip(self, items), fields(item_count = items.len()))]
    async fn show_context_menu(&self, items: Vec<MenuItem>) -> CoreResult<()> {
        let (reply, response) = oneshot::channel();
        self.sink
            .dispatch(HostRequest::ShowContextMenu { items, reply })?;

        let result = await_reply(response, crate::protocol::SHOW_CONTEXT_MENU).await?;
        if let Err(ref e) = result {
            error!(error = %e, "Error in show_context_menu");
        }
        result
    }
}

// A dropped responder means the host went away mid-request.
#[track_caller]
fn await_reply<T>(
    response: oneshot::Receiver<CoreResult<T>>,
    channel: &'static str,
) -> impl Future<Output = CoreResult<CoreResult<T>>> {
    let location = ErrorLocation::from(Location::caller());
    async move {
        response
            .await
            .map_err(|_| CaptureError::ChannelClosed { channel, location })
    }
}
