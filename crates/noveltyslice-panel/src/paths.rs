//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/noveltyslice/config.toml`
//! - macOS: `~/Library/Application Support/noveltyslice/config.toml`
//! - Windows: `%APPDATA%\noveltyslice\config.toml`

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "noveltyslice";

/// Config file name inside [`user_config_dir`].
const CONFIG_FILE: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the panel configuration file.
pub fn config_file() -> PathBuf {
    user_config_dir().join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_in_app_dir() {
        let path = config_file();
        assert!(path.ends_with("noveltyslice/config.toml"));
        assert_eq!(path.parent(), Some(user_config_dir().as_path()));
    }
}
