pub mod background;
pub mod debug;
pub mod render;
pub mod rng;
