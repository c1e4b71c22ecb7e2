use crate::{
    MediaStream, MediaStreamBundle, MediaTrack, RecordingSession, RecordingState, TrackKind,
    TrackOrigin, VIDEO_MIME_TYPE, tests::fakes,
};

use uuid::Uuid;

#[allow(clippy::unwrap_used)]
fn session() -> RecordingSession {
    let source = fakes::screen("s1", "Screen 1");
    let desktop = MediaStream::new(vec![
        MediaTrack::video(
            "Screen 1",
            TrackOrigin::Screen {
                source_id: "s1".to_string(),
                bounds: None,
            },
        ),
        MediaTrack::audio("System audio", TrackOrigin::DesktopAudio { device: None }),
    ]);
    let microphone = MediaStream::new(vec![MediaTrack::audio(
        "Mic",
        TrackOrigin::Microphone {
            device: "Mic".to_string(),
        },
    )]);
    RecordingSession::new(MediaStreamBundle::merge(&source, desktop, microphone).unwrap())
}

/// WHAT: Merged bundle has one video and two audio tracks
/// WHY: Desktop audio and microphone must both be recorded
#[test]
fn given_desktop_and_mic_streams_when_merging_then_video_and_both_audio_tracks_kept() {
    // Given/When: A session over a merged bundle
    let session = session();
    let bundle = session.bundle();

    // Then: One video track, two audio tracks, bound to the source
    assert_eq!(bundle.source_id(), "s1");
    assert_eq!(bundle.video_tracks().count(), 1);
    assert_eq!(bundle.audio_tracks().count(), 2);
    assert!(
        bundle
            .audio_tracks()
            .any(|t| matches!(t.origin, TrackOrigin::Microphone { .. }))
    );
}

/// WHAT: Video tracks on the microphone stream are ignored
/// WHY: Only the microphone's audio belongs in the bundle
#[test]
#[allow(clippy::unwrap_used)]
fn given_mic_stream_with_video_when_merging_then_only_its_audio_taken() {
    // Given: A microphone stream that also carries a video track
    let source = fakes::screen("s1", "Screen 1");
    let desktop = MediaStream::new(vec![MediaTrack::video(
        "Screen 1",
        TrackOrigin::Screen {
            source_id: "s1".to_string(),
            bounds: None,
        },
    )]);
    let microphone = MediaStream::new(vec![
        MediaTrack::video(
            "Webcam",
            TrackOrigin::Screen {
                source_id: "cam".to_string(),
                bounds: None,
            },
        ),
        MediaTrack::audio(
            "Mic",
            TrackOrigin::Microphone {
                device: "Mic".to_string(),
            },
        ),
    ]);

    // When: Merging
    let bundle = MediaStreamBundle::merge(&source, desktop, microphone).unwrap();

    // Then: Webcam video dropped
    assert_eq!(bundle.video_tracks().count(), 1);
    assert_eq!(bundle.tracks().len(), 2);
    assert_eq!(bundle.tracks()[1].kind, TrackKind::Audio);
}

/// WHAT: A desktop stream without video cannot form a bundle
/// WHY: A recording without picture is an acquisition failure
#[test]
fn given_desktop_stream_without_video_when_merging_then_media_acquisition_error() {
    // Given: Audio-only desktop stream
    let source = fakes::screen("s1", "Screen 1");
    let desktop = MediaStream::new(vec![MediaTrack::audio(
        "System audio",
        TrackOrigin::DesktopAudio { device: None },
    )]);

    // When: Merging
    let result = MediaStreamBundle::merge(&source, desktop, MediaStream::default());

    // Then: Acquisition error
    assert!(matches!(
        result,
        Err(crate::CaptureError::MediaAcquisition { .. })
    ));
}

/// WHAT: Segments are concatenated in arrival order, empties skipped
/// WHY: The saved file must be exactly the captured byte stream
#[test]
#[allow(clippy::unwrap_used)]
fn given_segments_with_empty_one_when_finishing_then_ordered_concatenation() {
    // Given: A recording session
    let mut session = session();
    let capture_id = session.begin().unwrap();
    assert_eq!(session.state(), RecordingState::Recording);

    // When: b1, b2, empty, b3 arrive and the capture finishes
    assert!(session.push_segment(capture_id, b"b1".to_vec()));
    assert!(session.push_segment(capture_id, b"b2".to_vec()));
    assert!(!session.push_segment(capture_id, Vec::new()));
    assert!(session.push_segment(capture_id, b"b3".to_vec()));
    assert_eq!(session.chunk_count(), 3);
    assert!(session.end());
    let blob = session.finish(capture_id).unwrap();

    // Then: b1b2b3 as video/mp4, session idle and empty
    assert_eq!(blob.bytes(), b"b1b2b3");
    assert_eq!(blob.mime_type(), VIDEO_MIME_TYPE);
    assert_eq!(session.state(), RecordingState::Idle);
    assert_eq!(session.chunk_count(), 0);
}

/// WHAT: Segments of a different capture are dropped
/// WHY: Late data from an abandoned capture must not leak in
#[test]
#[allow(clippy::unwrap_used)]
fn given_foreign_capture_id_when_pushing_segment_then_rejected() {
    // Given: A recording session
    let mut session = session();
    session.begin().unwrap();

    // When: A segment tagged with another capture arrives
    let accepted = session.push_segment(Uuid::new_v4(), b"stale".to_vec());

    // Then: Dropped
    assert!(!accepted);
    assert_eq!(session.byte_len(), 0);
}

/// WHAT: The final flush after stop is still kept
/// WHY: Recorders deliver their last segment after the stop request
#[test]
#[allow(clippy::unwrap_used)]
fn given_finalizing_capture_when_tail_segment_arrives_then_appended() {
    // Given: A stopped capture waiting for its final flush
    let mut session = session();
    let capture_id = session.begin().unwrap();
    session.push_segment(capture_id, b"head".to_vec());
    session.end();
    assert_eq!(session.state(), RecordingState::Idle);
    assert!(session.is_finalizing());

    // When: The tail arrives, then the stop completes
    assert!(session.push_segment(capture_id, b"tail".to_vec()));
    let blob = session.finish(capture_id).unwrap();

    // Then: Both parts are in the blob
    assert_eq!(blob.bytes(), b"headtail");
}

/// WHAT: Begin is refused while a capture is active or finalizing
/// WHY: Double start must not restart or clear a live capture
#[test]
#[allow(clippy::unwrap_used)]
fn given_active_capture_when_beginning_again_then_refused() {
    // Given: A recording session
    let mut session = session();
    let capture_id = session.begin().unwrap();

    // When/Then: Begin refused while recording and while finalizing
    assert!(session.begin().is_none());
    session.end();
    assert!(session.begin().is_none());

    // And: Allowed again once finished
    session.finish(capture_id).unwrap();
    assert!(session.begin().is_some());
}

/// WHAT: End while idle is a no-op
/// WHY: Guards against double stop
#[test]
fn given_idle_session_when_ending_then_false() {
    // Given: An idle session
    let mut session = session();

    // When/Then: End does nothing
    assert!(!session.end());
    assert_eq!(session.state(), RecordingState::Idle);
}

/// WHAT: Every capture starts with an empty chunk list
/// WHY: A second recording must never contain bytes of the first
#[test]
#[allow(clippy::unwrap_used)]
fn given_finished_capture_when_recording_again_then_output_has_only_new_bytes() {
    // Given: One finished capture
    let mut session = session();
    let first = session.begin().unwrap();
    session.push_segment(first, b"first".to_vec());
    session.end();
    session.finish(first).unwrap();

    // When: Recording a second time
    let second = session.begin().unwrap();
    session.push_segment(second, b"second".to_vec());
    session.end();
    let blob = session.finish(second).unwrap();

    // Then: Only the second capture's bytes
    assert_eq!(blob.bytes(), b"second");
}
