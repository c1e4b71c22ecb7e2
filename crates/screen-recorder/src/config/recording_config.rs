use crate::config::{default_file_name, default_segment_bytes};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where and how finished recordings are saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Directory receiving finished recordings.
    pub output_dir: PathBuf,

    /// Default file name; taken names get a ` (n)` suffix.
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Maximum size of one data segment read from the encoder.
    #[serde(default = "default_segment_bytes")]
    pub segment_bytes: usize,
}
