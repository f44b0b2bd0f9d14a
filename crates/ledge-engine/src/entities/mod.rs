pub mod player;

pub use player::{Facing, Player, PlayerEvents, PlayerInput, PlayerTuning, WorldPhysics, GROUND_PROBE};
