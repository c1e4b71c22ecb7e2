use serde::{Deserialize, Serialize};

/// Audio device configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Microphone name (None = default input device).
    #[serde(default)]
    pub microphone_device: Option<String>,

    /// Platform input carrying the system audio mix (None = platform
    /// default loopback, where one exists).
    #[serde(default)]
    pub desktop_audio_device: Option<String>,
}
