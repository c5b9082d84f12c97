//! Headless scene driver for the pseudo quad-tree.
//!
//! Stands in for a renderer: builds one index at load time, populates it once
//! per model kind and, each frame, culls by view distance and hands every
//! visible instance to a `DrawSink`.

pub mod config;
pub mod driver;
pub mod sink;

pub use config::SceneConfig;
pub use driver::{FrameStats, ModelHandle, Scene};
pub use sink::{CountingSink, DrawSink};
