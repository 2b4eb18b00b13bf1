//! Bootstrap configuration
//!
//! Every externally observable knob of the bring-up sequence lives here as a
//! named option instead of a literal buried in the instance code: window
//! dimensions and title, resizability, validation, and the identity fields
//! stamped into the Vulkan application info.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::window::WindowConfig;

/// Configuration for the instance bootstrap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Application name for Vulkan instance creation
    pub application_name: String,
    /// Application version (major, minor, patch)
    pub application_version: (u32, u32, u32),
    /// Engine name reported to the driver
    pub engine_name: String,
    /// Engine version (major, minor, patch)
    pub engine_version: (u32, u32, u32),
    /// Requested Vulkan API version (major, minor, patch)
    pub api_version: (u32, u32, u32),
    /// Whether to enable validation layers and the diagnostic messenger
    pub validation: bool,
    /// Window creation parameters
    pub window: WindowConfig,
}

impl BootstrapConfig {
    /// Create a new configuration with defaults for everything but the name
    pub fn new(app_name: impl Into<String>) -> Self {
        let app_name = app_name.into();
        Self {
            window: WindowConfig {
                width: 1280,
                height: 720,
                title: app_name.clone(),
                resizable: false,
            },
            application_name: app_name,
            application_version: (1, 0, 0),
            engine_name: "No Engine".to_string(),
            engine_version: (1, 0, 0),
            api_version: (1, 0, 0),
            validation: cfg!(debug_assertions),
        }
    }

    /// Set application version
    pub fn with_version(mut self, major: u32, minor: u32, patch: u32) -> Self {
        self.application_version = (major, minor, patch);
        self
    }

    /// Set the engine name and version reported to the driver
    pub fn with_engine(mut self, name: impl Into<String>, version: (u32, u32, u32)) -> Self {
        self.engine_name = name.into();
        self.engine_version = version;
        self
    }

    /// Set the requested Vulkan API version
    pub fn with_api_version(mut self, major: u32, minor: u32, patch: u32) -> Self {
        self.api_version = (major, minor, patch);
        self
    }

    /// Set the window title (defaults to the application name)
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Set the window client-area size in pixels
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Allow the window to be resized by the user
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.window.resizable = resizable;
        self
    }

    /// Enable or disable validation layers and diagnostics
    pub fn with_validation(mut self, enable: bool) -> Self {
        self.validation = enable;
        self
    }
}

impl Default for BootstrapConfig {
    /// Default configuration for a generic windowed Vulkan application
    fn default() -> Self {
        Self::new("Vulkan Application")
    }
}

impl Config for BootstrapConfig {}

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a TOML file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to a TOML file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_knobs() {
        let config = BootstrapConfig::new("Test App");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.window.title, "Test App");
        assert!(!config.window.resizable);
        assert_eq!(config.application_version, (1, 0, 0));
        assert_eq!(config.engine_name, "No Engine");
        assert_eq!(config.api_version, (1, 0, 0));
    }

    #[test]
    fn builder_methods_apply() {
        let config = BootstrapConfig::new("Test App")
            .with_version(2, 3, 4)
            .with_engine("Custom Engine", (0, 9, 1))
            .with_api_version(1, 1, 0)
            .with_window_title("Other Title")
            .with_window_size(800, 600)
            .with_resizable(true)
            .with_validation(true);

        assert_eq!(config.application_version, (2, 3, 4));
        assert_eq!(config.engine_name, "Custom Engine");
        assert_eq!(config.engine_version, (0, 9, 1));
        assert_eq!(config.api_version, (1, 1, 0));
        assert_eq!(config.window.title, "Other Title");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert!(config.window.resizable);
        assert!(config.validation);
    }

    #[test]
    fn toml_round_trip_preserves_fields() {
        let config = BootstrapConfig::new("Round Trip")
            .with_window_size(640, 480)
            .with_validation(true);

        let serialized = toml::to_string_pretty(&config).unwrap();
        let restored: BootstrapConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(restored.application_name, config.application_name);
        assert_eq!(restored.window.width, 640);
        assert_eq!(restored.window.height, 480);
        assert!(restored.validation);
    }

    #[test]
    fn non_toml_extension_is_rejected() {
        let config = BootstrapConfig::default();
        let result = config.save_to_file("config.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
