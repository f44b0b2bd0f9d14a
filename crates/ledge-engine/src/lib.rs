pub mod api;
pub mod core;
pub mod components;
pub mod entities;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext, Telemetry};
pub use api::types::{GameEvent, GameEventKind};
pub use components::layer::RenderLayer;
pub use components::tilemap::{TileMap, TileId};
pub use crate::core::level::{Level, LevelError};
pub use crate::core::physics::{Body, Bounds, MoveResult, Rect, aabb_overlap, move_and_collide, probe_ground};
pub use crate::core::time::FixedTimestep;
pub use entities::player::{Facing, Player, PlayerEvents, PlayerInput, PlayerTuning, WorldPhysics};
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::{Camera2D, CameraConfig};
pub use input::keyboard::{InputSource, KeyCode, Keyboard};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use systems::background::Background;
pub use systems::render::{build_frame, FrameScene};
pub use systems::debug::debug_readout;
