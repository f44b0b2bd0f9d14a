use glam::Vec2;

use crate::api::types::GameEvent;
use crate::core::level::Level;
use crate::core::time::{FIXED_DT, MAX_FRAME_DT};
use crate::input::keyboard::Keyboard;
use crate::renderer::instance::RenderBuffer;
use crate::systems::background::Background;

/// Default world-to-pixel scale.
pub const DEFAULT_PX_PER_UNIT: f32 = 40.0;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Longest frame the loop accepts before discarding wall time (default: 0.25).
    pub max_frame_dt: f32,
    /// Maximum number of render instances (default: 4096).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Pixels per world unit (default: 40).
    pub px_per_unit: f32,
    /// Console log level installed by the web bridge.
    pub log_level: log::Level,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: FIXED_DT,
            max_frame_dt: MAX_FRAME_DT,
            max_instances: 4096,
            max_events: 32,
            px_per_unit: DEFAULT_PX_PER_UNIT,
            log_level: log::Level::Info,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// One-time setup. No level is loaded yet.
    fn init(&mut self, ctx: &mut EngineContext);

    /// A level was just installed in `ctx.level`. Spawn and snap here.
    fn level_loaded(&mut self, ctx: &mut EngineContext);

    /// One fixed tick. Only called while a level is loaded.
    fn update(&mut self, ctx: &mut EngineContext, input: &Keyboard);

    /// The viewport changed; `ctx.viewport_px` already holds the new size.
    fn resize(&mut self, _ctx: &mut EngineContext) {}

    /// Build the frame. Called once per frame after all ticks.
    fn render(&self, ctx: &mut RenderContext);

    /// Text for the host's debug overlay.
    fn debug_text(&self) -> String {
        String::new()
    }

    /// Values published in the frame header.
    fn telemetry(&self) -> Telemetry {
        Telemetry::default()
    }
}

/// Per-frame numbers the host can read without parsing text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Telemetry {
    pub camera: Vec2,
    pub player_vel: Vec2,
}

/// Mutable access to engine state, passed to the `Game` hooks.
pub struct EngineContext {
    /// The current level. `None` until the host delivers one.
    pub level: Option<Level>,
    /// Fixed tick length in seconds.
    pub dt: f32,
    /// Session clock: fixed ticks run so far times `dt`.
    pub time: f32,
    /// Fixed ticks run so far.
    pub ticks: u64,
    /// Viewport size in pixels.
    pub viewport_px: Vec2,
    pub px_per_unit: f32,
    pub events: Vec<GameEvent>,
    max_events: usize,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            level: None,
            dt: config.fixed_dt,
            time: 0.0,
            ticks: 0,
            viewport_px: Vec2::new(800.0, 480.0),
            px_per_unit: config.px_per_unit,
            events: Vec::with_capacity(config.max_events),
            max_events: config.max_events,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.level.is_some()
    }

    /// Advance the session clock by one tick.
    pub fn advance(&mut self) {
        self.ticks += 1;
        self.time += self.dt;
    }

    /// Emit a game event to be forwarded to the host.
    /// Events past the per-frame cap are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        } else {
            log::debug!("event cap reached, dropping {:?}", event.kind());
        }
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a game's render pass writes into or projects with.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
    pub level: Option<&'a Level>,
    pub background: &'a mut Background,
    pub viewport_px: Vec2,
    pub px_per_unit: f32,
    /// Session clock, drives background sway.
    pub time: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameEventKind;

    #[test]
    fn default_config_uses_loop_constants() {
        let config = GameConfig::default();
        assert_eq!(config.fixed_dt, FIXED_DT);
        assert_eq!(config.max_frame_dt, MAX_FRAME_DT);
        assert_eq!(config.px_per_unit, 40.0);
    }

    #[test]
    fn context_starts_without_level() {
        let ctx = EngineContext::new();
        assert!(!ctx.is_ready());
        assert_eq!(ctx.time, 0.0);
    }

    #[test]
    fn events_are_capped_per_frame() {
        let config = GameConfig {
            max_events: 2,
            ..GameConfig::default()
        };
        let mut ctx = EngineContext::with_config(&config);
        for _ in 0..3 {
            ctx.emit_event(GameEvent::jumped(Vec2::ZERO, 0.0));
        }
        assert_eq!(ctx.events.len(), 2);
        assert_eq!(ctx.events[0].kind(), Some(GameEventKind::Jumped));
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn advance_counts_ticks() {
        let mut ctx = EngineContext::new();
        for _ in 0..60 {
            ctx.advance();
        }
        assert_eq!(ctx.ticks, 60);
        assert!((ctx.time - 1.0).abs() < 1e-4);
    }
}
