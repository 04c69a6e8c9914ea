//! Forward renderer configuration
//!
//! Keys use the camelCase spelling of the scene files:
//!
//! ```toml
//! areaLight = [0.2, 0.2, 0.25]
//! sky = "assets/textures/sky.png"
//! postprocess = "assets/shaders/vignette.frag"
//! ```
//!
//! `sky` and `postprocess` are switches as well as paths: the presence of the
//! key enables the stage. Unknown keys are ignored so a renderer section can
//! live inside a larger scene file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};

/// Configuration consumed by [`ForwardRenderer::initialize`](crate::render::forward::ForwardRenderer::initialize)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RendererConfig {
    /// Ambient light colour applied to every lit surface and the sky
    pub area_light: [f32; 3],

    /// Sky texture; enables the sky compositor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sky: Option<PathBuf>,

    /// Post-process fragment shader; enables the offscreen target and the
    /// full-screen pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postprocess: Option<PathBuf>,

    /// Longitude and latitude segment counts of the sky sphere
    pub sky_sphere_segments: [u32; 2],

    /// Vertex shader of the sky program
    pub sky_vertex_shader: PathBuf,

    /// Fragment shader of the sky program
    pub sky_fragment_shader: PathBuf,

    /// Vertex shader that emits the full-screen triangle
    pub fullscreen_vertex_shader: PathBuf,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            area_light: [1.0, 1.0, 1.0],
            sky: None,
            postprocess: None,
            sky_sphere_segments: [16, 16],
            sky_vertex_shader: PathBuf::from("assets/shaders/default.vert"),
            sky_fragment_shader: PathBuf::from("assets/shaders/default.frag"),
            fullscreen_vertex_shader: PathBuf::from("assets/shaders/fullscreen.vert"),
        }
    }
}

impl Config for RendererConfig {}

impl RendererConfig {
    /// Create the default configuration: white ambient light, no sky, no
    /// post-processing
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Set the ambient light colour
    pub fn with_area_light(mut self, area_light: [f32; 3]) -> Self {
        self.area_light = area_light;
        self
    }

    /// Enable the sky with the given texture
    pub fn with_sky(mut self, texture: impl AsRef<Path>) -> Self {
        self.sky = Some(texture.as_ref().to_path_buf());
        self
    }

    /// Enable post-processing with the given fragment shader
    pub fn with_postprocess(mut self, fragment_shader: impl AsRef<Path>) -> Self {
        self.postprocess = Some(fragment_shader.as_ref().to_path_buf());
        self
    }

    /// Whether the sky compositor is enabled
    pub const fn sky_enabled(&self) -> bool {
        self.sky.is_some()
    }

    /// Whether the post-process stage is enabled
    pub const fn postprocess_enabled(&self) -> bool {
        self.postprocess.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RendererConfig::default();
        assert_eq!(config.area_light, [1.0, 1.0, 1.0]);
        assert!(!config.sky_enabled());
        assert!(!config.postprocess_enabled());
        assert_eq!(config.sky_sphere_segments, [16, 16]);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = RendererConfig::from_toml_str("").unwrap();
        assert_eq!(config, RendererConfig::default());
    }

    #[test]
    fn test_parse_recognized_keys() {
        let config = RendererConfig::from_toml_str(
            r#"
            areaLight = [0.1, 0.2, 0.3]
            sky = "textures/sky.png"
            postprocess = "shaders/grey.frag"
            title = "ignored"
            "#,
        )
        .unwrap();

        assert_eq!(config.area_light, [0.1, 0.2, 0.3]);
        assert_eq!(config.sky.as_deref(), Some(Path::new("textures/sky.png")));
        assert_eq!(config.postprocess.as_deref(), Some(Path::new("shaders/grey.frag")));
        assert_eq!(config.sky_vertex_shader, PathBuf::from("assets/shaders/default.vert"));
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let result = RendererConfig::from_toml_str("areaLight = \"bright\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_builders() {
        let config = RendererConfig::new()
            .with_area_light([0.5, 0.5, 0.5])
            .with_sky("sky.png")
            .with_postprocess("post.frag");
        assert!(config.sky_enabled());
        assert!(config.postprocess_enabled());
        assert_eq!(config.area_light, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_save_and_load_ron() {
        let dir = std::env::temp_dir().join(format!("forward_engine_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("renderer.ron");

        let config = RendererConfig::new().with_sky("sky.png").with_area_light([0.0, 0.5, 1.0]);
        config.save_to_file(&path).unwrap();
        let loaded = RendererConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }
}
