use ledge_engine::bridge::protocol::{FrameHeader, HEADER_FLOATS};
use ledge_engine::{
    Background, EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue, Keyboard,
    Level, ProtocolLayout, RenderBuffer, RenderContext,
};

/// Seed for the background star field.
const BACKGROUND_SEED: u64 = 0x5EED_1ED6E;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `platformer`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    keyboard: Keyboard,
    render_buffer: RenderBuffer,
    background: Background,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame: u32,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt, config.max_frame_dt);
        let layout = ProtocolLayout::from_config(&config);

        Self {
            game,
            ctx: EngineContext::with_config(&config),
            input: InputQueue::new(),
            keyboard: Keyboard::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            background: Background::new(BACKGROUND_SEED),
            timestep,
            layout,
            config,
            header: [0.0; HEADER_FLOATS],
            frame: 0,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Queue a DOM `KeyboardEvent.code`. Unbound codes are ignored.
    pub fn push_key(&mut self, code: &str, down: bool) {
        self.input.push_dom_key(code, down);
    }

    /// Parse and install a level. A document that fails to parse or validate
    /// is replaced by an empty level so the session still runs.
    /// Returns whether the document itself was accepted.
    pub fn load_level(&mut self, json: &str, fallback_name: &str) -> bool {
        match Level::from_json(json, fallback_name) {
            Ok(level) => {
                log::info!(
                    "level '{}' loaded: {} platforms, spawn ({}, {})",
                    level.name,
                    level.platforms.len(),
                    level.spawn.x,
                    level.spawn.y
                );
                self.set_level(level);
                true
            }
            Err(err) => {
                log::warn!("level '{}' rejected ({}), using an empty level", fallback_name, err);
                self.set_level(Level::empty(fallback_name));
                false
            }
        }
    }

    /// Install an already-built level and let the game spawn into it.
    pub fn set_level(&mut self, level: Level) {
        self.ctx.level = Some(level);
        self.game.level_loaded(&mut self.ctx);
    }

    /// The host canvas changed size (pixels).
    pub fn resize(&mut self, width_px: f32, height_px: f32) {
        if !(width_px > 0.0 && height_px > 0.0) {
            log::warn!("ignoring resize to {}x{}", width_px, height_px);
            return;
        }
        self.ctx.viewport_px = glam::Vec2::new(width_px, height_px);
        self.game.resize(&mut self.ctx);
    }

    /// Run one frame: fold input, run fixed ticks, render once.
    /// Returns the number of ticks run.
    pub fn tick(&mut self, frame_dt: f32) -> u32 {
        if !self.initialized {
            return 0;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Input is polled state; fold everything queued since the last frame.
        for event in self.input.drain() {
            self.keyboard.apply(&event);
        }

        // Fixed timestep accumulation. Without a level the ticks are
        // consumed but the game does not simulate.
        let steps = self.timestep.accumulate(frame_dt);
        if self.ctx.is_ready() {
            for _ in 0..steps {
                self.ctx.advance();
                self.game.update(&mut self.ctx, &self.keyboard);
            }
        }

        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
                level: self.ctx.level.as_ref(),
                background: &mut self.background,
                viewport_px: self.ctx.viewport_px,
                px_per_unit: self.ctx.px_per_unit,
                time: self.ctx.time,
            };
            self.game.render(&mut render_ctx);
        }

        self.frame = self.frame.wrapping_add(1);
        let telemetry = self.game.telemetry();
        FrameHeader {
            frame: self.frame,
            instance_count: self.render_buffer.instance_count(),
            event_count: self.ctx.events.len() as u32,
            level_ready: self.ctx.is_ready(),
            viewport: self.ctx.viewport_px.to_array(),
            px_per_unit: self.ctx.px_per_unit,
            camera: telemetry.camera.to_array(),
            player_vel: telemetry.player_vel.to_array(),
            time: self.ctx.time,
            ticks: steps,
        }
        .write(&self.layout, &mut self.header);

        steps
    }

    pub fn debug_text(&self) -> String {
        self.game.debug_text()
    }

    // ---- Pointer accessors for host reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
