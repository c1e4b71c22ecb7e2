use crate::{
    DesktopSources,
    desktop_sources::{MonitorSnapshot, screen_id, screen_index},
};

use screen_recorder_core::{CaptureError, SourceBackend, SourceBounds, SourceKind};

fn monitors() -> Vec<MonitorSnapshot> {
    vec![
        MonitorSnapshot {
            name: Some("DELL U2720Q".to_string()),
            bounds: SourceBounds {
                x: 0,
                y: 0,
                width: 3840,
                height: 2160,
            },
        },
        MonitorSnapshot {
            name: None,
            bounds: SourceBounds {
                x: 3840,
                y: 0,
                width: 1920,
                height: 1080,
            },
        },
    ]
}

/// WHAT: Screen ids encode the monitor index and decode back
/// WHY: The recorder finds the monitor to grab from the source id alone
#[test]
fn given_screen_id_when_parsing_then_index_recovered() {
    // Given/When/Then: Ids round-trip, foreign ids do not parse
    assert_eq!(screen_index(&screen_id(3)), Some(3));
    assert_eq!(screen_index("window:42"), None);
    assert_eq!(screen_index("screen:abc"), None);
}

/// WHAT: Each monitor becomes one screen source with its geometry
/// WHY: The picker lists every monitor and the recorder grabs its region
#[test]
#[allow(clippy::unwrap_used)]
fn given_two_monitors_when_listing_then_two_screen_sources() {
    // Given: Two known monitors
    let mut backend = DesktopSources::new();
    backend.set_monitors(monitors());

    // When: Listing sources
    let sources = backend.list_sources().unwrap();

    // Then: Both monitors are listed in order
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].id, "screen:0");
    assert_eq!(sources[0].name, "Screen 1 (DELL U2720Q)");
    assert_eq!(sources[1].name, "Screen 2");
    assert!(sources.iter().all(|s| s.kind == SourceKind::Screen));
    assert_eq!(sources[1].bounds.map(|b| b.x), Some(3840));
    assert!(sources.iter().all(|s| s.thumbnail.is_none()));
}

/// WHAT: Listing with no monitors is a platform error
/// WHY: The UI logs the failure instead of showing an empty picker
#[test]
fn given_no_monitors_when_listing_then_platform_error() {
    // Given: A backend that has not seen any monitor
    let mut backend = DesktopSources::new();

    // When: Listing sources
    let result = backend.list_sources();

    // Then: Enumeration fails
    assert!(matches!(result, Err(CaptureError::Platform { .. })));
}
