use super::types::MAX_TREE_HEIGHT;
use crate::error::{QuadtreeError, QuadtreeResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Number of subdivision levels above the cell level. The deepest level
    /// holds `4^(height + 1)` cells.
    pub height: u8,
    /// Largest jitter applied to a placed leaf, as a fraction of its cell's
    /// half-extent.
    pub jitter_ratio: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            height: 6,
            jitter_ratio: 0.8,
        }
    }
}

impl Config {
    pub fn with_height(height: u8) -> Self {
        Config {
            height,
            ..Config::default()
        }
    }

    pub(crate) fn validate(&self) -> QuadtreeResult<()> {
        if self.height > MAX_TREE_HEIGHT {
            return Err(QuadtreeError::InvalidHeight {
                height: self.height,
                max: MAX_TREE_HEIGHT,
            });
        }
        if !(self.jitter_ratio.is_finite() && (0.0..1.0).contains(&self.jitter_ratio)) {
            return Err(QuadtreeError::InvalidJitter {
                ratio: self.jitter_ratio,
            });
        }
        Ok(())
    }
}
