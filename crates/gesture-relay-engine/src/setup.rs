//! Config loading and default paths.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::error::EngineError;

/// Load configuration from the given path, or the default location.
///
/// A missing file at the default location yields the defaults; a missing
/// file at an explicit path is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, EngineError> {
    let config_path = match path {
        Some(p) if !p.exists() => {
            return Err(EngineError::Config(format!(
                "config file not found: {}",
                p.display()
            )));
        }
        Some(p) => p.to_path_buf(),
        None => default_config_path(),
    };

    let config = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| EngineError::Config(format!("failed to read config: {e}")))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| EngineError::Config(format!("failed to parse config: {e}")))?;
        info!(path = %config_path.display(), "loaded config");
        config
    } else {
        info!("no config file found, using defaults");
        Config::default()
    };

    config.validate()?;
    Ok(config)
}

/// Get the default config directory path.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("gesture-relay")
}

/// Get the default config file path.
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gesture-relay-setup-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/gesture-relay.toml")));
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let path = temp_file("valid.toml", "[display]\nwidth = 800\nheight = 600\n");
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.display.width, 800);
        assert_eq!(config.display.height, 600);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_file("broken.toml", "[display\nwidth = ");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn invalid_values_are_rejected_on_load() {
        let path = temp_file("zero.toml", "[gestures]\ntap_ms = 0\n");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn default_path_ends_with_crate_dir() {
        assert!(default_config_path().ends_with("gesture-relay/config.toml"));
    }
}
