use crate::TrayCommand;

use screen_recorder_core::{CaptureError, CoreResult, HostRequest, RequestSink};

use std::panic::Location;

use error_location::ErrorLocation;
use tao::event_loop::EventLoopProxy;

/// Delivers host requests to the main thread as tray commands.
#[derive(Clone)]
pub struct MainThreadSink {
    proxy: EventLoopProxy<TrayCommand>,
}

impl MainThreadSink {
    /// Sink posting to the event loop behind `proxy`.
    pub fn new(proxy: EventLoopProxy<TrayCommand>) -> Self {
        Self { proxy }
    }
}

impl RequestSink for MainThreadSink {
    #[track_caller]
    fn dispatch(&self, request: HostRequest) -> CoreResult<()> {
        let channel = request.channel();
        self.proxy
            .send_event(TrayCommand::Host(request))
            .map_err(|_| CaptureError::ChannelClosed {
                channel,
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
