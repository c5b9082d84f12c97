use crate::config::{CameraConfig, SceneConfig};
use crate::sink::DrawSink;
use anyhow::{bail, Context};
use common::shapes::Rectangle;
use pseudo_quadtree::{Config, PseudoQuadTree, ViewDistance};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

/// Index of a model kind in the scene's model table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelHandle(u16);

impl ModelHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What one frame drew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub frame: u32,
    pub camera_x: f32,
    pub camera_z: f32,
    pub drawn: u32,
}

pub struct Scene {
    tree: PseudoQuadTree<ModelHandle>,
    models: Vec<String>,
    camera: CameraConfig,
}

impl Scene {
    /// Builds the index and scatters every configured population into it.
    pub fn build(config: &SceneConfig) -> anyhow::Result<Self> {
        let tree_config = &config.tree;
        let area = Rectangle::from_origin(
            tree_config.x_origin,
            tree_config.z_origin,
            tree_config.width,
            tree_config.depth,
        );
        let mut tree = PseudoQuadTree::new_with_config(
            area,
            Config {
                height: tree_config.height,
                jitter_ratio: tree_config.jitter_ratio,
            },
        )
        .context("building the spatial index")?;

        let mut rng = match tree_config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        if config.population.len() > u16::MAX as usize {
            bail!("too many model kinds: {}", config.population.len());
        }
        let mut models = Vec::with_capacity(config.population.len());
        for population in &config.population {
            let handle = ModelHandle(models.len() as u16);
            tree.populate_with_rng(handle, population.count, &mut rng)
                .with_context(|| format!("placing {} x {}", population.count, population.model))?;
            debug!(model = %population.model, count = population.count, "populated");
            models.push(population.model.clone());
        }

        Ok(Self {
            tree,
            models,
            camera: config.camera.clone(),
        })
    }

    pub fn tree(&self) -> &PseudoQuadTree<ModelHandle> {
        &self.tree
    }

    pub fn model_name(&self, model: ModelHandle) -> Option<&str> {
        self.models.get(model.index()).map(String::as_str)
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Every model kind with its handle, in population order.
    pub fn handles(&self) -> impl Iterator<Item = (ModelHandle, &str)> + '_ {
        self.models
            .iter()
            .enumerate()
            .map(|(index, name)| (ModelHandle(index as u16), name.as_str()))
    }

    pub fn frames(&self) -> u32 {
        self.camera.frames
    }

    /// Camera position at `frame`, moving linearly from start to end.
    pub fn camera_position(&self, frame: u32) -> (f32, f32) {
        let [start_x, start_z] = self.camera.start;
        let [end_x, end_z] = self.camera.end;
        let t = if self.camera.frames > 1 {
            frame.min(self.camera.frames - 1) as f32 / (self.camera.frames - 1) as f32
        } else {
            0.0
        };
        (
            start_x + (end_x - start_x) * t,
            start_z + (end_z - start_z) * t,
        )
    }

    /// Draws every instance whose cell is within view distance of the camera.
    pub fn render_frame<S>(&self, camera_x: f32, camera_z: f32, sink: &mut S) -> u32
    where
        S: DrawSink + ?Sized,
    {
        let view = ViewDistance::new(camera_x, camera_z, self.camera.view_distance);
        let mut drawn = 0u32;
        self.tree.traverse_with(view.predicate(), |leaf| {
            sink.draw(leaf.value, leaf.x, leaf.z);
            drawn += 1;
        });
        drawn
    }

    /// Renders every frame of the camera path.
    pub fn run<S>(&self, sink: &mut S) -> Vec<FrameStats>
    where
        S: DrawSink + ?Sized,
    {
        (0..self.camera.frames)
            .map(|frame| {
                let (camera_x, camera_z) = self.camera_position(frame);
                let drawn = self.render_frame(camera_x, camera_z, sink);
                trace!(frame, camera_x, camera_z, drawn, "frame");
                FrameStats {
                    frame,
                    camera_x,
                    camera_z,
                    drawn,
                }
            })
            .collect()
    }
}
