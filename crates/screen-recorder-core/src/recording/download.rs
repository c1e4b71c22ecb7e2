//! Finished-recording hand-off: blobs, local object URLs and the
//! save-as download into a directory.

use crate::{CaptureError, CoreResult};

use std::{
    collections::HashMap,
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
    sync::Arc,
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Immutable binary object with a MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    bytes: Arc<[u8]>,
    mime_type: &'static str,
}

impl Blob {
    /// Wraps `bytes` as a blob of type `mime_type`.
    pub fn new(bytes: Vec<u8>, mime_type: &'static str) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type,
        }
    }

    /// Content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the blob holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// MIME type.
    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }
}

/// Process-local reference to a registered [`Blob`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// The `blob:` URL string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Registry of live object URLs.
#[derive(Debug, Default)]
pub struct ObjectUrlStore {
    entries: HashMap<ObjectUrl, Blob>,
}

impl ObjectUrlStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `blob` and returns a fresh URL for it.
    pub fn create(&mut self, blob: Blob) -> ObjectUrl {
        let url = ObjectUrl(format!("blob:screen-recorder/{}", Uuid::new_v4()));
        self.entries.insert(url.clone(), blob);
        url
    }

    /// Looks up a live URL.
    pub fn resolve(&self, url: &ObjectUrl) -> Option<&Blob> {
        self.entries.get(url)
    }

    /// Releases `url`. Revoking twice is harmless.
    pub fn revoke(&mut self, url: &ObjectUrl) {
        if self.entries.remove(url).is_some() {
            debug!(url = url.as_str(), "Object URL revoked");
        }
    }

    /// Number of live URLs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no URL is live.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Destination of finished recordings.
pub trait DownloadSink {
    /// Saves `blob` under `file_name` and returns where it landed.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Download`] if the file cannot be written.
    fn download(&mut self, blob: &Blob, file_name: &str) -> CoreResult<PathBuf>;
}

/// Saves downloads into a directory like a browser does: an existing
/// `name.ext` makes the next one `name (1).ext`, then `name (2).ext`.
#[derive(Debug, Clone)]
pub struct DownloadDirectory {
    dir: PathBuf,
}

impl DownloadDirectory {
    /// Downloads go to `dir`, which is created on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// First path for `file_name` in the directory that does not exist yet.
    pub fn available_path(&self, file_name: &str) -> PathBuf {
        let candidate = self.dir.join(file_name);
        if !candidate.exists() {
            return candidate;
        }

        let name = Path::new(file_name);
        let stem = name
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());
        let extension = name
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        (1u32..)
            .map(|n| self.dir.join(format!("{stem} ({n}){extension}")))
            .find(|path| !path.exists())
            .unwrap_or(candidate)
    }
}

impl DownloadSink for DownloadDirectory {
    /// Writes to a temporary file first, then renames so a crash never
    /// leaves a truncated recording under the final name.
    #[track_caller]
    #[instrument(skip(self, blob), fields(dir = ?self.dir, byte_len = blob.len()))]
    fn download(&mut self, blob: &Blob, file_name: &str) -> CoreResult<PathBuf> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| download_error(format!("Failed to create download dir: {}", e)))?;

        let path = self.available_path(file_name);
        let temp_path = path.with_extension("part");

        let mut temp_file = fs::File::create(&temp_path)
            .map_err(|e| download_error(format!("Failed to create temp file: {}", e)))?;

        temp_file
            .write_all(blob.bytes())
            .map_err(|e| download_error(format!("Failed to write recording: {}", e)))?;

        temp_file
            .sync_all()
            .map_err(|e| download_error(format!("Failed to sync recording: {}", e)))?;

        fs::rename(&temp_path, &path)
            .map_err(|e| download_error(format!("Failed to move recording in place: {}", e)))?;

        info!(path = ?path, mime_type = blob.mime_type(), "Recording downloaded");

        Ok(path)
    }
}

#[track_caller]
fn download_error(reason: String) -> CaptureError {
    CaptureError::Download {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}
