use crate::{Blob, DownloadDirectory, DownloadSink, ObjectUrlStore, VIDEO_MIME_TYPE};

use std::{fs, path::PathBuf};

use uuid::Uuid;

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("screen-recorder-test-{}", Uuid::new_v4()))
}

/// WHAT: Created URLs resolve until revoked
/// WHY: The download must read the blob through its local reference
#[test]
#[allow(clippy::unwrap_used)]
fn given_blob_when_creating_url_then_resolves_until_revoked() {
    // Given: A store and a blob
    let mut store = ObjectUrlStore::new();
    let blob = Blob::new(b"video".to_vec(), VIDEO_MIME_TYPE);

    // When: Registering it
    let url = store.create(blob.clone());

    // Then: It resolves, and no longer after revoke
    assert!(url.as_str().starts_with("blob:"));
    assert_eq!(store.resolve(&url).unwrap(), &blob);
    store.revoke(&url);
    assert!(store.resolve(&url).is_none());
    assert!(store.is_empty());

    // And: Revoking twice is harmless
    store.revoke(&url);
}

/// WHAT: Blob bytes land in the directory under the given name
/// WHY: The user expects recording.mp4 in the downloads folder
#[test]
#[allow(clippy::unwrap_used)]
fn given_blob_when_downloading_then_file_written_with_name() {
    // Given: An empty target directory
    let dir = scratch_dir();
    let mut sink = DownloadDirectory::new(&dir);
    let blob = Blob::new(b"b1b2b3".to_vec(), VIDEO_MIME_TYPE);

    // When: Downloading
    let path = sink.download(&blob, "recording.mp4").unwrap();

    // Then: File exists with the exact content and no temp file remains
    assert_eq!(path, dir.join("recording.mp4"));
    assert_eq!(fs::read(&path).unwrap(), b"b1b2b3");
    assert!(!dir.join("recording.part").exists());

    fs::remove_dir_all(&dir).unwrap();
}

/// WHAT: Existing files are never overwritten
/// WHY: Each recording must survive the next one
#[test]
#[allow(clippy::unwrap_used)]
fn given_existing_file_when_downloading_again_then_numbered_name_used() {
    // Given: Two earlier downloads
    let dir = scratch_dir();
    let mut sink = DownloadDirectory::new(&dir);
    sink.download(&Blob::new(b"one".to_vec(), VIDEO_MIME_TYPE), "recording.mp4")
        .unwrap();
    sink.download(&Blob::new(b"two".to_vec(), VIDEO_MIME_TYPE), "recording.mp4")
        .unwrap();

    // When: Downloading a third time
    let path = sink
        .download(&Blob::new(b"three".to_vec(), VIDEO_MIME_TYPE), "recording.mp4")
        .unwrap();

    // Then: "recording (2).mp4", earlier files intact
    assert_eq!(path, dir.join("recording (2).mp4"));
    assert_eq!(fs::read(dir.join("recording.mp4")).unwrap(), b"one");
    assert_eq!(fs::read(dir.join("recording (1).mp4")).unwrap(), b"two");
    assert_eq!(fs::read(&path).unwrap(), b"three");

    fs::remove_dir_all(&dir).unwrap();
}
