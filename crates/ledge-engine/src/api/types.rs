use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// What a [`GameEvent`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GameEventKind {
    Jumped = 1,
    Landed = 2,
    Reset = 3,
}

impl GameEventKind {
    pub fn from_f32(kind: f32) -> Option<Self> {
        match kind as u8 {
            1 => Some(Self::Jumped),
            2 => Some(Self::Landed),
            3 => Some(Self::Reset),
            _ => None,
        }
    }
}

/// A game event handed from Rust to the host (sounds, effects).
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
/// For the built-in kinds `a/b` is the player center and `c` the session time.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: GameEventKind, pos: Vec2, time: f32) -> Self {
        Self {
            kind: kind as u8 as f32,
            a: pos.x,
            b: pos.y,
            c: time,
        }
    }

    pub fn jumped(pos: Vec2, time: f32) -> Self {
        Self::new(GameEventKind::Jumped, pos, time)
    }

    pub fn landed(pos: Vec2, time: f32) -> Self {
        Self::new(GameEventKind::Landed, pos, time)
    }

    pub fn reset(pos: Vec2, time: f32) -> Self {
        Self::new(GameEventKind::Reset, pos, time)
    }

    pub fn kind(&self) -> Option<GameEventKind> {
        GameEventKind::from_f32(self.kind)
    }
}
