use crate::{AppCommand, HotkeyHandler};

use tokio::sync::mpsc;

/// WHAT: A hotkey press becomes a toggle command
/// WHY: The controller, not the hotkey, decides whether to start or stop
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_open_channel_when_hotkey_pressed_then_toggle_sent() {
    // Given: A handler with an open command channel
    let (command_tx, mut command_rx) = mpsc::channel(32);
    let handler = HotkeyHandler::new(7, command_tx);

    // When: The hotkey is pressed twice
    handler.handle_hotkey_press().await.unwrap();
    handler.handle_hotkey_press().await.unwrap();

    // Then: Two toggles are queued
    assert_eq!(command_rx.recv().await, Some(AppCommand::ToggleRecording));
    assert_eq!(command_rx.recv().await, Some(AppCommand::ToggleRecording));
}

/// WHAT: A press with the application gone is an error
/// WHY: The handler loop must surface a dead receiver instead of spinning
#[tokio::test]
async fn given_closed_channel_when_hotkey_pressed_then_error() {
    // Given: A closed command channel
    let (command_tx, command_rx) = mpsc::channel(1);
    drop(command_rx);
    let handler = HotkeyHandler::new(7, command_tx);

    // When: The hotkey is pressed
    let result = handler.handle_hotkey_press().await;

    // Then: Sending fails
    assert!(result.is_err());
}
