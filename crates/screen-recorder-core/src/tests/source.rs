use crate::{MenuItem, SourceBounds, Thumbnail, menu_items, tests::fakes};

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

/// WHAT: Menu items mirror sources one-to-one in order
/// WHY: The picker must offer exactly what was enumerated
#[test]
fn given_sources_when_projecting_menu_then_ids_labels_and_order_preserved() {
    // Given: A screen and a window
    let sources = vec![
        fakes::screen("s1", "Screen 1"),
        fakes::window("w2", "Window A"),
    ];

    // When: Projecting to menu items
    let items = menu_items(&sources);

    // Then: Same length and order, label taken from name
    assert_eq!(
        items,
        vec![
            MenuItem {
                id: "s1".to_string(),
                label: "Screen 1".to_string(),
            },
            MenuItem {
                id: "w2".to_string(),
                label: "Window A".to_string(),
            },
        ]
    );
}

/// WHAT: Duplicate names still produce distinct entries
/// WHY: Two windows titled alike must stay selectable by id
#[test]
fn given_sources_with_same_name_when_projecting_then_each_keeps_its_id() {
    // Given: Two windows with identical titles
    let sources = vec![
        fakes::window("w1", "Terminal"),
        fakes::window("w2", "Terminal"),
    ];

    // When: Projecting
    let items = menu_items(&sources);

    // Then: Both entries exist with their own ids
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "w1");
    assert_eq!(items[1].id, "w2");
    assert!(items.iter().all(|item| item.label == "Terminal"));
}

/// WHAT: Builder methods fill optional source metadata
/// WHY: Backends attach geometry the recorder needs later
#[test]
fn given_bounds_and_display_when_building_source_then_fields_set() {
    // Given: Monitor geometry
    let bounds = SourceBounds {
        x: 1920,
        y: 0,
        width: 2560,
        height: 1440,
    };

    // When: Building a source with them
    let source = fakes::screen("screen:1", "DELL U2720Q")
        .with_bounds(bounds)
        .with_display_id("1");

    // Then: Metadata is kept, no thumbnail yet
    assert_eq!(source.bounds, Some(bounds));
    assert_eq!(source.display_id.as_deref(), Some("1"));
    assert!(source.thumbnail.is_none());
}

/// WHAT: Wide PNG frames are shrunk to the requested width
/// WHY: Thumbnails stay small regardless of monitor resolution
#[test]
#[allow(clippy::unwrap_used)]
fn given_wide_png_when_decoding_thumbnail_then_scaled_keeping_aspect() {
    // Given: A 640x360 PNG frame
    let frame = RgbaImage::from_pixel(640, 360, Rgba([10, 20, 30, 255]));
    let mut png = Cursor::new(Vec::new());
    frame.write_to(&mut png, ImageFormat::Png).unwrap();

    // When: Decoding with a 160 pixel limit
    let thumbnail = Thumbnail::from_png(png.get_ref(), 160).unwrap();

    // Then: 160x90 RGBA
    assert_eq!((thumbnail.width(), thumbnail.height()), (160, 90));
    assert_eq!(thumbnail.as_rgba().len(), 160 * 90 * 4);
}

/// WHAT: Frames narrower than the limit are kept as is
/// WHY: Upscaling would only blur the preview
#[test]
#[allow(clippy::unwrap_used)]
fn given_small_png_when_decoding_thumbnail_then_size_unchanged() {
    // Given: A 64x48 PNG frame
    let frame = RgbaImage::from_pixel(64, 48, Rgba([255, 0, 0, 255]));
    let mut png = Cursor::new(Vec::new());
    frame.write_to(&mut png, ImageFormat::Png).unwrap();

    // When: Decoding with a 160 pixel limit
    let thumbnail = Thumbnail::from_png(png.get_ref(), 160).unwrap();

    // Then: Original size
    assert_eq!((thumbnail.width(), thumbnail.height()), (64, 48));
}

/// WHAT: Garbage bytes are rejected as a platform error
/// WHY: A broken grab must not crash enumeration
#[test]
fn given_invalid_bytes_when_decoding_thumbnail_then_platform_error() {
    // Given: Bytes that are not an image
    let bytes = b"not a png";

    // When: Decoding
    let result = Thumbnail::from_png(bytes, 160);

    // Then: Platform error
    assert!(matches!(result, Err(crate::CaptureError::Platform { .. })));
}

/// WHAT: Raw RGBA with a wrong length is refused
/// WHY: Prevents out-of-bounds pixel access later
#[test]
fn given_short_buffer_when_wrapping_rgba_then_none() {
    // Given: 2x2 image needs 16 bytes, only 12 provided
    let rgba = vec![0u8; 12];

    // When: Wrapping
    let thumbnail = Thumbnail::from_rgba(2, 2, rgba);

    // Then: Rejected
    assert!(thumbnail.is_none());
}
