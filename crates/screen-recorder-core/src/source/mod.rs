mod capture_source;
mod menu_item;
mod thumbnail;

pub use {
    capture_source::{CaptureSource, SourceBounds, SourceKind},
    menu_item::{MenuItem, menu_items},
    thumbnail::Thumbnail,
};
