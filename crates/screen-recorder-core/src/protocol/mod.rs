//! Message contract between the privileged host and the UI controller.
//!
//! The UI never touches enumeration or native menus directly. It sends a
//! [`HostRequest`] and awaits the reply carried on the request's oneshot,
//! and it receives menu selections as one-way [`HostEvent`]s.

mod bridge;
mod message;

pub use {
    bridge::{HostApi, HostBridge, RequestSink},
    message::{CONTEXT_MENU_SELECTION, GET_SOURCES, HostEvent, HostRequest, SHOW_CONTEXT_MENU},
};
