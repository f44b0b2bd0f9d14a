use glam::Vec2;
use ledge_engine::*;

/// Level shipped with the demo, used when the host has nothing else to load.
pub const BUILTIN_LEVEL: &str = include_str!("../levels/level1.json");

/// Camera sits slightly above the player.
const CAMERA_OFFSET: Vec2 = Vec2::new(0.0, 2.0);
const RESET_KEY: KeyCode = KeyCode::KeyR;

/// One-level platformer session: a player, a follow camera and the level's
/// decorative tiles.
pub struct Platformer {
    player: Player,
    camera: Camera2D,
    camera_config: CameraConfig,
    physics: WorldPhysics,
    tiles: TileMap,
    reset_held: bool,
}

impl Platformer {
    pub fn new() -> Self {
        Self::with_tuning(PlayerTuning::default(), WorldPhysics::default())
    }

    pub fn with_tuning(tuning: PlayerTuning, physics: WorldPhysics) -> Self {
        let camera_config = CameraConfig {
            offset: CAMERA_OFFSET,
            ..CameraConfig::default()
        };
        let mut camera = Camera2D::default();
        camera.set_offset(camera_config.offset);
        Self {
            player: Player::new(Vec2::ZERO, tuning),
            camera,
            camera_config,
            physics,
            tiles: TileMap::default(),
            reset_held: false,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    /// Back to the level spawn with the camera snapped onto the player.
    fn respawn(&mut self, ctx: &mut EngineContext) {
        let spawn = ctx.level.as_ref().map_or(Vec2::ZERO, |l| l.spawn);
        self.player.reset(spawn);
        self.camera.snap_to(self.player.center());
        ctx.emit_event(GameEvent::reset(self.player.center(), ctx.time));
        log::info!("player reset to ({}, {})", spawn.x, spawn.y);
    }
}

impl Default for Platformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Platformer {
    fn init(&mut self, ctx: &mut EngineContext) {
        self.camera
            .resize(ctx.viewport_px.x, ctx.viewport_px.y, ctx.px_per_unit);
    }

    fn level_loaded(&mut self, ctx: &mut EngineContext) {
        match ctx.level.as_ref() {
            Some(level) => {
                self.camera.set_bounds(level.bounds);
                self.tiles = TileMap::build_from_level(level.tiles.as_ref());
            }
            None => {
                self.camera.clear_bounds();
                self.tiles = TileMap::default();
            }
        }
        self.reset_held = false;
        self.respawn(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &Keyboard) {
        let Some(level) = ctx.level.as_ref() else {
            return;
        };

        let intent = PlayerInput::sample(input);
        let events = self
            .player
            .update(ctx.time, ctx.dt, intent, &level.platforms, &self.physics);

        let center = self.player.center();
        if events.jumped {
            ctx.emit_event(GameEvent::jumped(center, ctx.time));
        }
        if events.landed {
            log::debug!("landed at ({:.2}, {:.2})", center.x, center.y);
            ctx.emit_event(GameEvent::landed(center, ctx.time));
        }

        self.camera
            .follow(center, ctx.dt, self.camera_config.smooth_rate);

        let reset = input.pressed(RESET_KEY);
        if reset && !self.reset_held {
            self.respawn(ctx);
        }
        self.reset_held = reset;
    }

    fn resize(&mut self, ctx: &mut EngineContext) {
        self.camera
            .resize(ctx.viewport_px.x, ctx.viewport_px.y, ctx.px_per_unit);
    }

    fn render(&self, ctx: &mut RenderContext) {
        let platforms = ctx.level.map_or(&[][..], |l| &l.platforms[..]);
        let scene = FrameScene {
            camera: &self.camera,
            tiles: &self.tiles,
            platforms,
            player: &self.player,
        };
        build_frame(ctx, &scene);
    }

    fn debug_text(&self) -> String {
        debug_readout(self.camera.center, self.player.vel())
    }

    fn telemetry(&self) -> Telemetry {
        Telemetry {
            camera: self.camera.center,
            player_vel: self.player.vel(),
        }
    }
}
