//! Configuration management for screen-recorder.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, validation, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{AudioConfig, CaptureConfig, RecordingConfig, default_file_name, default_segment_bytes},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::{ProjectDirs, UserDirs};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Output location of finished recordings.
    pub recording: RecordingConfig,
    /// Screen capture and encoder settings.
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Audio device selection.
    #[serde(default)]
    pub audio: AudioConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config = Self::from_toml(&contents)?;
            config.validate()?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Parse configuration from TOML text. Missing optional keys take
    /// their defaults.
    #[track_caller]
    pub fn from_toml(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Default configuration saving into `output_dir`.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            recording: RecordingConfig {
                output_dir: output_dir.into(),
                file_name: default_file_name(),
                segment_bytes: default_segment_bytes(),
            },
            capture: CaptureConfig::default(),
            audio: AudioConfig::default(),
        }
    }

    /// Reject values the capture pipeline cannot work with.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        if self.capture.fps == 0 {
            return Err(invalid("capture.fps must be greater than zero"));
        }
        if self.recording.segment_bytes == 0 {
            return Err(invalid("recording.segment_bytes must be greater than zero"));
        }
        if Path::new(&self.recording.file_name).file_name().is_none() {
            return Err(invalid("recording.file_name must name a file"));
        }
        if Path::new(&self.recording.file_name).components().count() != 1 {
            return Err(invalid("recording.file_name must not contain directories"));
        }

        Ok(())
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Per-user project directories.
    #[track_caller]
    pub fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "screen-recorder", "Screen-Recorder").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get project directories".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        // Videos folder when the platform has one, app data otherwise.
        let output_dir = match UserDirs::new().and_then(|dirs| dirs.video_dir().map(Path::to_path_buf)) {
            Some(videos) => videos.join("Screen Recorder"),
            None => Self::project_dirs()?.data_dir().join("recordings"),
        };

        let config = Config::with_output_dir(output_dir);
        config.save()?;

        info!(output_dir = ?config.recording.output_dir, "Default config created");

        Ok(config)
    }
}

#[track_caller]
fn invalid(reason: &str) -> AppError {
    AppError::ConfigError {
        reason: reason.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
