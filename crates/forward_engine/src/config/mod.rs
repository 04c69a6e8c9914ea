//! Configuration system
//!
//! The [`Config`] trait gives any serde struct TOML and RON load/save keyed
//! on the file extension. [`RendererConfig`] is the configuration consumed by
//! the forward renderer at initialisation.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

mod renderer;

pub use renderer::RendererConfig;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
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
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/b.toml")).ok(), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("scene.ron")).ok(), Some(ConfigFormat::Ron));
        assert!(matches!(
            ConfigFormat::from_path(Path::new("scene.json")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(ConfigFormat::from_path(Path::new("noext")).is_err());
    }
}
