use crate::{
    CaptureError, GET_SOURCES, Host, HostApi, HostBridge, HostEvent, HostRequest, MenuItem,
    SelectionNotifier, menu_items,
    tests::fakes::{self, FakeBackend, FakePresenter},
};

use tokio::sync::{mpsc, oneshot};

/// WHAT: GetSources replies with the backend's list
/// WHY: The host is a pass-through for enumeration
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_backend_sources_when_handling_get_sources_then_reply_contains_them() {
    // Given: A host over two sources
    let (event_tx, _event_rx) = mpsc::unbounded_channel();
    let backend = FakeBackend {
        sources: vec![fakes::screen("s1", "Screen 1"), fakes::window("w2", "Window A")],
        fail: false,
    };
    let mut host = Host::new(backend, FakePresenter::default(), SelectionNotifier::new(event_tx));

    // When: Handling a GetSources request
    let (reply, response) = oneshot::channel();
    let request = HostRequest::GetSources { reply };
    assert_eq!(request.channel(), GET_SOURCES);
    host.handle(request);

    // Then: The reply holds both sources in order
    let sources = response.await.unwrap().unwrap();
    let ids: Vec<_> = sources.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["s1", "w2"]);
}

/// WHAT: Enumeration failure is re-signaled unchanged
/// WHY: The UI must see a rejected request, never a partial list
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_failing_backend_when_handling_get_sources_then_platform_error_replied() {
    // Given: A backend that fails
    let (event_tx, _event_rx) = mpsc::unbounded_channel();
    let backend = FakeBackend {
        sources: vec![fakes::screen("s1", "Screen 1")],
        fail: true,
    };
    let mut host = Host::new(backend, FakePresenter::default(), SelectionNotifier::new(event_tx));

    // When: Handling GetSources
    let (reply, response) = oneshot::channel();
    host.handle(HostRequest::GetSources { reply });

    // Then: Platform error
    let result = response.await.unwrap();
    assert!(matches!(result, Err(CaptureError::Platform { .. })));
}

/// WHAT: ShowContextMenu acks without waiting for a click
/// WHY: Dismissing the menu must not leave the UI waiting
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_items_when_showing_menu_then_acked_and_no_event_without_click() {
    // Given: A host with a presenter that never clicks
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut host = Host::new(
        FakeBackend::default(),
        FakePresenter::default(),
        SelectionNotifier::new(event_tx),
    );
    let items = menu_items(&[fakes::screen("s1", "Screen 1")]);

    // When: Showing the menu
    let (reply, response) = oneshot::channel();
    host.handle(HostRequest::ShowContextMenu {
        items: items.clone(),
        reply,
    });

    // Then: Acked, presenter saw the items, no selection event
    assert!(response.await.unwrap().is_ok());
    assert_eq!(host.presenter_mut().shown, vec![items]);
    assert!(event_rx.try_recv().is_err());
}

/// WHAT: A click arrives as a one-way selection event
/// WHY: The choice is delivered later on the event channel
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_click_when_menu_shown_then_selection_event_carries_id() {
    // Given: A presenter that clicks "w2"
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let presenter = FakePresenter {
        shown: Vec::new(),
        auto_click: Some("w2".to_string()),
    };
    let mut host = Host::new(FakeBackend::default(), presenter, SelectionNotifier::new(event_tx));

    // When: Showing the menu
    let (reply, _response) = oneshot::channel();
    host.handle(HostRequest::ShowContextMenu {
        items: vec![MenuItem {
            id: "w2".to_string(),
            label: "Window A".to_string(),
        }],
        reply,
    });

    // Then: One selection event for "w2"
    assert_eq!(
        event_rx.recv().await.unwrap(),
        HostEvent::ContextMenuSelection {
            id: "w2".to_string()
        }
    );
}

/// WHAT: The bridge round-trips through a served host
/// WHY: Validates the request/reply contract end to end
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_served_host_when_calling_bridge_then_sources_and_ack_returned() {
    // Given: A host served on its own task
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let backend = FakeBackend {
        sources: vec![fakes::screen("s1", "Screen 1")],
        fail: false,
    };
    let presenter = FakePresenter {
        shown: Vec::new(),
        auto_click: Some("s1".to_string()),
    };
    let served = tokio::spawn(
        Host::new(backend, presenter, SelectionNotifier::new(event_tx)).serve(request_rx),
    );
    let bridge = HostBridge::new(request_tx);

    // When: Enumerating and showing the picker
    let sources = bridge.get_sources().await.unwrap();
    bridge.show_context_menu(menu_items(&sources)).await.unwrap();

    // Then: The selection comes back, and the host stops once the bridge is gone
    assert_eq!(
        event_rx.recv().await.unwrap(),
        HostEvent::ContextMenuSelection {
            id: "s1".to_string()
        }
    );
    drop(bridge);
    served.await.unwrap();
}

/// WHAT: A bridge whose host is gone reports a closed channel
/// WHY: The UI must not hang when the host went away
#[tokio::test]
async fn given_dropped_host_when_requesting_sources_then_channel_closed() {
    // Given: A bridge whose receiving end is dropped
    let (request_tx, request_rx) = mpsc::unbounded_channel::<HostRequest>();
    drop(request_rx);
    let bridge = HostBridge::new(request_tx);

    // When: Requesting sources
    let result = bridge.get_sources().await;

    // Then: Channel closed on get-sources
    assert!(matches!(
        result,
        Err(CaptureError::ChannelClosed {
            channel: GET_SOURCES,
            ..
        })
    ));
}
