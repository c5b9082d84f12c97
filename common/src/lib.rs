pub mod shapes;

pub use shapes::{Circle, Rectangle};
