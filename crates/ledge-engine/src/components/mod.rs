pub mod layer;
pub mod tilemap;
