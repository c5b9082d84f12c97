//! Runs a scene description headlessly and reports what each frame drew.

use scene::{CountingSink, Scene, SceneConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "scene.toml".to_string());
    let config = SceneConfig::load(&path)?;
    info!(
        height = config.tree.height,
        width = config.tree.width,
        depth = config.tree.depth,
        instances = config.instance_count(),
        "loaded scene"
    );

    let scene = Scene::build(&config)?;
    let mut sink = CountingSink::new();
    let frames = scene.run(&mut sink);

    let busiest = frames.iter().max_by_key(|stats| stats.drawn);
    if let Some(stats) = busiest {
        info!(frame = stats.frame, drawn = stats.drawn, "busiest frame");
    }
    for (handle, model) in scene.handles() {
        info!(model, drawn = sink.count(handle), "draws");
    }
    info!(frames = frames.len(), draws = sink.total(), "done");
    Ok(())
}

