use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuadtreeError {
    #[error("tree height {height} exceeds the link field's addressable range (max height: {max})")]
    InvalidHeight { height: u8, max: u8 },

    #[error(
        "area must have finite origin and positive finite width/height (x: {x}, z: {z}, width: {width}, height: {height})"
    )]
    InvalidArea {
        x: f32,
        z: f32,
        width: f32,
        height: f32,
    },

    #[error("jitter ratio must be finite and within [0, 1) (ratio: {ratio})")]
    InvalidJitter { ratio: f32 },

    #[error("cannot place {requested} instances, only {available} cells are free")]
    CapacityExceeded { requested: u32, available: u32 },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;
