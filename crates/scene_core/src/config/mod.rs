//! Configuration system
//!
//! `Config` gives every serde-backed settings struct file loading and saving
//! in TOML or RON, chosen by the file extension.

mod demo_config;

pub use demo_config::{
    AnimationConfig, CameraConfig, CullingConfig, DemoConfig, FrameOrder, GrassConfig, InstancingConfig,
    ParticleConfig,
};
pub use serde::{Deserialize, Serialize};

use std::path::Path;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
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

    /// A value is outside the range the scene core can work with
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("scene_core_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let path = temp_path("demo.toml");
        let mut config = DemoConfig::default();
        config.frame_count = 42;
        config.particles.pool_size = 64;

        config.save_to_file(&path).unwrap();
        let loaded = DemoConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.frame_count, 42);
        assert_eq!(loaded.particles.pool_size, 64);
        assert_eq!(loaded.scene, config.scene);
    }

    #[test]
    fn test_ron_roundtrip_through_file() {
        let path = temp_path("demo.ron");
        let mut config = DemoConfig::default();
        config.frame_order = FrameOrder::RenderThenUpdate;

        config.save_to_file(&path).unwrap();
        let loaded = DemoConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.frame_order, FrameOrder::RenderThenUpdate);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = DemoConfig::default().save_to_file(temp_path("demo.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
