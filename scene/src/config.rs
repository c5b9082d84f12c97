//! Scene description loaded from TOML.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default = "default_population")]
    pub population: Vec<PopulationConfig>,
    #[serde(default)]
    pub camera: CameraConfig,
}

impl SceneConfig {
    /// Loads the scene from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no scene file found, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Total number of instances across all populations.
    pub fn instance_count(&self) -> u64 {
        self.population.iter().map(|p| p.count as u64).sum()
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig::default(),
            population: default_population(),
            camera: CameraConfig::default(),
        }
    }
}

/// Index shape and placement.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TreeConfig {
    /// Subdivision levels above the cell grid.
    #[serde(default = "default_tree_height")]
    pub height: u8,
    /// Extent of the area along x.
    #[serde(default = "default_side")]
    pub width: f32,
    /// Extent of the area along z.
    #[serde(default = "default_side")]
    pub depth: f32,
    #[serde(default)]
    pub x_origin: f32,
    #[serde(default)]
    pub z_origin: f32,
    #[serde(default = "default_jitter_ratio")]
    pub jitter_ratio: f32,
    /// Fixed seed for reproducible placement; fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            height: default_tree_height(),
            width: default_side(),
            depth: default_side(),
            x_origin: 0.0,
            z_origin: 0.0,
            jitter_ratio: default_jitter_ratio(),
            seed: None,
        }
    }
}

/// One kind of model and how many instances of it to scatter.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PopulationConfig {
    pub model: String,
    #[serde(default)]
    pub count: u32,
}

/// Straight camera path sampled once per frame.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CameraConfig {
    /// (x, z) at the first frame.
    #[serde(default)]
    pub start: [f32; 2],
    /// (x, z) at the last frame.
    #[serde(default = "default_camera_end")]
    pub end: [f32; 2],
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default = "default_view_distance")]
    pub view_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start: [0.0, 0.0],
            end: default_camera_end(),
            frames: default_frames(),
            view_distance: default_view_distance(),
        }
    }
}

fn default_tree_height() -> u8 {
    6
}
fn default_side() -> f32 {
    1000.0
}
fn default_jitter_ratio() -> f32 {
    0.8
}
fn default_population() -> Vec<PopulationConfig> {
    vec![PopulationConfig {
        model: "cube".to_string(),
        count: 4000,
    }]
}
fn default_camera_end() -> [f32; 2] {
    [1000.0, 1000.0]
}
fn default_frames() -> u32 {
    60
}
fn default_view_distance() -> f32 {
    50.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(SceneConfig::parse("").unwrap(), SceneConfig::default());
    }

    #[test]
    fn missing_fields_fall_back_per_field() {
        let config = SceneConfig::parse(
            r#"
            [tree]
            height = 3
            seed = 9

            [[population]]
            model = "tree"
            count = 10

            [camera]
            frames = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.tree.height, 3);
        assert_eq!(config.tree.seed, Some(9));
        assert_eq!(config.tree.width, 1000.0);
        assert_eq!(config.population.len(), 1);
        assert_eq!(config.population[0].model, "tree");
        assert_eq!(config.camera.frames, 2);
        assert_eq!(config.camera.view_distance, 50.0);
    }

    #[test]
    fn survives_a_toml_round_trip() {
        let config = SceneConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(SceneConfig::parse(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let config = SceneConfig::load("definitely/not/here.toml").unwrap();
        assert_eq!(config, SceneConfig::default());
    }
}
