use crate::{AppError, AppResult};

use screen_recorder_core::{CaptureError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;

fn failing_start() -> CoreResult<()> {
    Err(CaptureError::Recorder {
        reason: "ffmpeg exited".to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

fn run_start() -> AppResult<()> {
    failing_start()?;
    Ok(())
}

/// WHAT: A controller error propagated with `?` becomes a capture app error
/// WHY: Command failures are logged with both the capture cause and the app call site
#[test]
fn given_capture_error_when_propagated_then_wrapped_with_source() {
    // When: A capture failure crosses into the application layer
    let result = run_start();

    // Then: It is wrapped and keeps the recorder reason
    assert!(matches!(
        &result,
        Err(AppError::Capture {
            source: CaptureError::Recorder { reason, .. },
            location,
        }) if reason == "ffmpeg exited" && location.file.replace('\\', "/").ends_with("tests/error.rs")
    ));
    assert!(result.is_err_and(|e| e.to_string().contains("ffmpeg exited")));
}
