//! Configuration file support for photoviews.
//!
//! Settings are stored as JSON: in the user's config directory on native
//! builds and in localStorage on WASM.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_JPEG_QUALITY, MAX_IMAGE_SIZE, PLACEHOLDER_THUMBNAIL};
use crate::ingest::IngestSettings;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Convert to log crate's Level, for loggers that take a maximum level.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,
}

fn default_app_name() -> String {
    "photoviews".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Longest edge of stored photos, in pixels
    #[serde(default = "default_max_image_size")]
    pub max_image_size: u32,

    /// JPEG quality for stored photos (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Thumbnail shown for views without photos
    #[serde(default = "default_placeholder_thumbnail")]
    pub placeholder_thumbnail: String,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Directory for view storage (native only, empty for the default)
    #[serde(default)]
    pub storage_dir: String,
}

fn default_max_image_size() -> u32 {
    MAX_IMAGE_SIZE
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_placeholder_thumbnail() -> String {
    PLACEHOLDER_THUMBNAIL.to_string()
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            max_image_size: default_max_image_size(),
            jpeg_quality: default_jpeg_quality(),
            placeholder_thumbnail: default_placeholder_thumbnail(),
            log_level: LogLevel::default(),
            storage_dir: String::new(),
        }
    }
}

impl UserPreferences {
    /// Ingestion parameters derived from these preferences.
    ///
    /// Out-of-range values are clamped to something the encoder accepts.
    pub fn ingest_settings(&self) -> IngestSettings {
        IngestSettings {
            max_image_size: self.max_image_size.max(1),
            jpeg_quality: self.jpeg_quality.clamp(1, 100),
        }
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "photoviews-config.json"
    }

    /// Get the default config file path.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("photoviews").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("photoviews")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from `path`, or from the default path when `None`.
    ///
    /// A missing file is created with the defaults so there is something to
    /// edit. An unreadable or invalid file falls back to defaults and is left
    /// untouched.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: Option<&std::path::Path>) -> Self {
        let path = match path.map(std::path::Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return Self::default(),
        };

        if !path.exists() {
            log::debug!("No config file found at {:?}, writing defaults", path);
            let config = Self::default();
            if let Err(e) = config.save_to_path(&path) {
                log::warn!("Failed to write default config {:?}: {}", path, e);
            }
            return config;
        }

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save configuration to `path`, creating parent directories.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// LocalStorage key for WASM config persistence.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "photoviews-config";

    /// Load configuration from localStorage (WASM only).
    /// Falls back to defaults if not found or invalid.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Self {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten())
        else {
            return Self::default();
        };

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::debug!("No config found in localStorage");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        /// Version stored in the file
        file_version: u32,
        /// Newest version this build reads
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
