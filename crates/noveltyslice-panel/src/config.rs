//! Panel configuration file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use noveltyslice_analysis::NoveltySliceParams;

use crate::error::ConfigError;

/// Initial panel window size.
///
/// Applied on the window's first use only; after that the GUI library keeps
/// whatever size the user dragged it to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Width in logical pixels.
    pub width: f32,
    /// Height in logical pixels.
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 150.0,
        }
    }
}

/// Settings read at extension load.
///
/// # TOML Format
///
/// ```toml
/// console_trace = true
///
/// [window]
/// width = 400.0
/// height = 150.0
///
/// [analysis]
/// feature = "mfcc"
/// kernel_size = 9
/// threshold = 0.4
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Write lifecycle lines to the host console.
    pub console_trace: bool,
    /// Initial window size.
    pub window: WindowConfig,
    /// Parameters for the panel's analysis client.
    pub analysis: NoveltySliceParams,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            console_trace: true,
            window: WindowConfig::default(),
            analysis: NoveltySliceParams::default(),
        }
    }
}

impl PanelConfig {
    /// Load a config from a TOML file. Analysis parameters are clamped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load from `path`, falling back to defaults.
    ///
    /// A missing file is not an error. Any other failure is logged and
    /// replaced by the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "config loaded");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Self::default()
            }
        }
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut config: PanelConfig = toml::from_str(toml_str)?;
        config.analysis = config.analysis.sanitized();
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the config to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }
}
