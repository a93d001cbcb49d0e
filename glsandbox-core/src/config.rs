//! Sandbox configuration.
//!
//! Configuration is read from `glsandbox.json` in the working directory, then
//! from `<config dir>/glsandbox/config.json`. Missing files fall back to the
//! defaults; a file that exists but does not parse is an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    camera::CameraConfig,
    material::{Light, Material},
};

/// Name of the configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "glsandbox.json";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Window settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "glsandbox".to_string(),
            width: 800,
            height: 800,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Optional image files used by the demos. Missing entries are replaced by
/// generated textures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub albedo: Option<PathBuf>,
    pub diffuse_map: Option<PathBuf>,
    pub specular_map: Option<PathBuf>,
    pub sprite_sheet: Option<PathBuf>,
    /// Size in pixels of one sprite of `sprite_sheet`.
    pub sprite_size: [u32; 2],
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            albedo: None,
            diffuse_map: None,
            specular_map: None,
            sprite_sheet: None,
            sprite_size: [16, 16],
        }
    }
}

/// Top level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub material: Material,
    pub light: Light,
    pub textures: TextureConfig,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Name of the demo shown at start-up.
    pub start_demo: String,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            material: Material::default(),
            light: Light::default(),
            textures: TextureConfig::default(),
            log_level: "info".to_string(),
            start_demo: "triangle".to_string(),
        }
    }
}

impl SandboxConfig {
    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads configuration from `path`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the first configuration file found in the search paths, or the
    /// defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        for path in Self::search_paths() {
            if path.is_file() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }
        log::info!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// The locations checked by [`SandboxConfig::load`], in order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("glsandbox").join("config.json"));
        }
        paths
    }

    /// Parses `log_level`, falling back to `Info` for unknown names.
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or_else(|_| {
            log::warn!("Unknown log level {:?}, using info", self.log_level);
            log::LevelFilter::Info
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = SandboxConfig::from_json("{}").unwrap();
        assert_eq!(config, SandboxConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let json = r#"{
            "window": { "title": "Materials", "width": 1280 },
            "camera": { "fov": 60.0, "position": [1.0, 2.0, 3.0] },
            "light": { "diffuse": [1.0, 1.0, 1.0] },
            "log_level": "debug",
            "start_demo": "lighting"
        }"#;
        let config = SandboxConfig::from_json(json).unwrap();

        assert_eq!(config.window.title, "Materials");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.camera.fov, 60.0);
        assert_eq!(config.camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.camera.yaw, -90.0);
        assert_eq!(config.light.diffuse, Vec3::ONE);
        assert_eq!(config.light.specular, Vec3::ONE);
        assert_eq!(config.log_level_filter(), log::LevelFilter::Debug);
        assert_eq!(config.start_demo, "lighting");
    }

    #[test]
    fn partial_material_keeps_texture_maps() {
        let config = SandboxConfig::from_json(r#"{ "material": { "shininess": 32.0 } }"#).unwrap();
        assert_eq!(config.material.shininess, 32.0);
        assert_eq!(config.material.diffuse_map, Some(0));
        assert_eq!(config.material.specular_map, Some(1));
        assert_eq!(config.material.ambient, Vec3::ONE);
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = SandboxConfig {
            log_level: "loud".to_string(),
            ..SandboxConfig::default()
        };
        assert_eq!(config.log_level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = std::env::temp_dir().join(format!("glsandbox-test-{}.json", std::process::id()));
        std::fs::write(&path, "{ \"window\": ").unwrap();
        let result = SandboxConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SandboxConfig::from_file(Path::new("/nonexistent/glsandbox.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
