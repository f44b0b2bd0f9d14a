pub mod level;
pub mod physics;
pub mod smoothing;
pub mod time;
