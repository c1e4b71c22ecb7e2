#[allow(clippy::module_inception)]
mod controller;
mod ui_surface;

pub use {controller::UiController, ui_surface::UiSurface};

/// Message shown while a capture is running.
pub const RECORDING_MESSAGE: &str = "Recording has started...";
