//! The controllable body: running, jumping, coyote time and jump buffering.
//!
//! Timers are absolute session timestamps (`Option<f32>`, `None` = never) and
//! every eligibility check is `now - stamp <= window`. A fresh or reset player
//! therefore can never jump from a stale window at `t = 0`.

use glam::Vec2;

use crate::core::physics::{move_and_collide, probe_ground, Body, Rect};
use crate::core::smoothing::approach;
use crate::input::keyboard::{InputSource, KeyCode};

/// Distance below the feet that still counts as standing on a platform.
pub const GROUND_PROBE: f32 = 0.01;

/// Per-character tuning. Units are world units and seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    pub size: Vec2,
    /// Top horizontal speed on the ground.
    pub move_speed: f32,
    /// Share of `move_speed` reachable in the air (0..1).
    pub air_control: f32,
    /// Upward speed set by a jump.
    pub jump_force: f32,
    /// Grace window after leaving the ground in which a jump still counts as grounded.
    pub coyote_time: f32,
    /// Grace window in which an early press is remembered.
    pub jump_buffer: f32,
    /// Air jumps available after leaving the ground (0 = ground jumps only).
    pub extra_jumps: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(0.9, 1.6),
            move_speed: 12.0,
            air_control: 0.9,
            jump_force: 17.0,
            coyote_time: 0.10,
            jump_buffer: 0.12,
            extra_jumps: 0,
        }
    }
}

/// World-wide constants the controller integrates against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPhysics {
    /// Downward acceleration (y grows downward).
    pub gravity: f32,
    /// Velocity decay rate toward the target speed while grounded.
    pub friction_ground: f32,
    /// Velocity decay rate toward the target speed while airborne.
    pub friction_air: f32,
}

impl Default for WorldPhysics {
    fn default() -> Self {
        Self {
            gravity: 40.0,
            friction_ground: 18.0,
            friction_air: 2.0,
        }
    }
}

/// One tick of player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerInput {
    /// -1 left, 0 none, +1 right.
    pub dir: i8,
    pub jump_held: bool,
}

impl PlayerInput {
    pub const LEFT: [KeyCode; 2] = [KeyCode::ArrowLeft, KeyCode::KeyA];
    pub const RIGHT: [KeyCode; 2] = [KeyCode::ArrowRight, KeyCode::KeyD];
    pub const JUMP: [KeyCode; 3] = [KeyCode::Space, KeyCode::KeyW, KeyCode::ArrowUp];

    /// Read the default bindings. Left and right together cancel out.
    pub fn sample(input: &dyn InputSource) -> Self {
        let any = |keys: &[KeyCode]| keys.iter().any(|k| input.pressed(*k));
        let left = any(&Self::LEFT);
        let right = any(&Self::RIGHT);
        Self {
            dir: right as i8 - left as i8,
            jump_held: any(&Self::JUMP),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// What happened during one `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerEvents {
    pub jumped: bool,
    /// The body touched down after being airborne. Resting contact on later
    /// ticks does not repeat it.
    pub landed: bool,
    /// The jump that fired was an air jump (consumed one of `extra_jumps`).
    pub air_jump: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    pub tuning: PlayerTuning,
    pub on_ground: bool,
    pub facing: Facing,
    pub jumps_left: u32,
    /// Session time of the last tick that found ground contact.
    pub last_on_ground: Option<f32>,
    /// Session time of the last unconsumed jump press.
    pub last_jump_pressed: Option<f32>,
    prev_jump_held: bool,
}

impl Player {
    pub fn new(spawn: Vec2, tuning: PlayerTuning) -> Self {
        let mut player = Self {
            body: Body::new(Rect::new(spawn.x, spawn.y, tuning.size.x, tuning.size.y), Vec2::ZERO),
            tuning,
            on_ground: false,
            facing: Facing::Right,
            jumps_left: 0,
            last_on_ground: None,
            last_jump_pressed: None,
            prev_jump_held: false,
        };
        player.reset(spawn);
        player
    }

    /// Put the player back at `spawn` with every runtime field cleared.
    pub fn reset(&mut self, spawn: Vec2) {
        self.body = Body::new(
            Rect::new(spawn.x, spawn.y, self.tuning.size.x, self.tuning.size.y),
            Vec2::ZERO,
        );
        self.on_ground = false;
        self.facing = Facing::Right;
        self.jumps_left = self.tuning.extra_jumps;
        self.last_on_ground = None;
        self.last_jump_pressed = None;
        self.prev_jump_held = false;
    }

    pub fn pos(&self) -> Vec2 {
        self.body.rect.pos()
    }

    pub fn vel(&self) -> Vec2 {
        self.body.vel
    }

    pub fn rect(&self) -> Rect {
        self.body.rect
    }

    /// Body center, the camera's follow target.
    pub fn center(&self) -> Vec2 {
        self.body.rect.center()
    }

    /// Advance one fixed tick. `now` is the session clock after this tick.
    pub fn update(
        &mut self,
        now: f32,
        dt: f32,
        input: PlayerInput,
        platforms: &[Rect],
        physics: &WorldPhysics,
    ) -> PlayerEvents {
        let mut events = PlayerEvents::default();
        let dir = input.dir.signum();
        let was_grounded = self.on_ground;

        // Rising edge of jump; a newer press replaces a buffered one.
        if input.jump_held && !self.prev_jump_held {
            self.last_jump_pressed = Some(now);
        }
        self.prev_jump_held = input.jump_held;

        // Horizontal velocity eases toward the intent.
        let (accel, control) = if self.on_ground {
            (physics.friction_ground, 1.0)
        } else {
            (physics.friction_air, self.tuning.air_control)
        };
        let target = dir as f32 * self.tuning.move_speed * control;
        self.body.vel.x = approach(self.body.vel.x, target, accel, dt);

        if probe_ground(&self.body.rect, platforms, GROUND_PROBE) {
            self.touch_ground(now);
        } else {
            self.on_ground = false;
        }

        let coyote = within(self.last_on_ground, now, self.tuning.coyote_time);
        let buffered = within(self.last_jump_pressed, now, self.tuning.jump_buffer);
        if buffered && (coyote || self.jumps_left > 0) {
            self.body.vel.y = -self.tuning.jump_force;
            if !coyote {
                self.jumps_left -= 1;
                events.air_jump = true;
            }
            self.last_jump_pressed = None;
            events.jumped = true;
            log::debug!("jump at t={:.3} (coyote={}, jumps_left={})", now, coyote, self.jumps_left);
        }

        self.body.vel.y += physics.gravity * dt;

        let moved = move_and_collide(&self.body, dt, platforms);
        self.body.rect.x = moved.pos.x;
        self.body.rect.y = moved.pos.y;
        self.body.vel = moved.vel;

        if moved.landed {
            self.touch_ground(now);
            events.landed = !was_grounded;
        }

        if dir > 0 {
            self.facing = Facing::Right;
        } else if dir < 0 {
            self.facing = Facing::Left;
        }

        events
    }

    fn touch_ground(&mut self, now: f32) {
        self.on_ground = true;
        self.last_on_ground = Some(now);
        self.jumps_left = self.tuning.extra_jumps;
    }
}

/// `now - stamp <= window`, false for a stamp that never happened.
#[inline]
fn within(stamp: Option<f32>, now: f32, window: f32) -> bool {
    stamp.is_some_and(|t| now - t <= window)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    /// A long floor whose top is at y = 10.
    fn floor() -> Rect {
        Rect::new(-20.0, 10.0, 40.0, 2.0)
    }

    /// Drives a player tick by tick with a running session clock.
    struct Sim {
        player: Player,
        platforms: Vec<Rect>,
        physics: WorldPhysics,
        now: f32,
    }

    impl Sim {
        fn new(spawn: Vec2, platforms: Vec<Rect>) -> Self {
            Self {
                player: Player::new(spawn, PlayerTuning::default()),
                platforms,
                physics: WorldPhysics::default(),
                now: 0.0,
            }
        }

        fn standing_on_floor() -> Self {
            let h = PlayerTuning::default().size.y;
            let mut sim = Self::new(Vec2::new(0.0, 10.0 - h), vec![floor()]);
            sim.step(PlayerInput::default());
            assert!(sim.player.on_ground);
            sim
        }

        fn step(&mut self, input: PlayerInput) -> PlayerEvents {
            self.now += DT;
            self.player
                .update(self.now, DT, input, &self.platforms, &self.physics)
        }

        fn idle(&mut self, ticks: usize) {
            for _ in 0..ticks {
                self.step(PlayerInput::default());
            }
        }
    }

    const JUMP: PlayerInput = PlayerInput { dir: 0, jump_held: true };
    const RIGHT: PlayerInput = PlayerInput { dir: 1, jump_held: false };
    const LEFT: PlayerInput = PlayerInput { dir: -1, jump_held: false };

    struct Held(Vec<KeyCode>);

    impl InputSource for Held {
        fn pressed(&self, key: KeyCode) -> bool {
            self.0.contains(&key)
        }
    }

    #[test]
    fn sample_reads_default_bindings() {
        let input = PlayerInput::sample(&Held(vec![KeyCode::KeyD, KeyCode::ArrowUp]));
        assert_eq!(input, PlayerInput { dir: 1, jump_held: true });
        let input = PlayerInput::sample(&Held(vec![KeyCode::ArrowLeft, KeyCode::ArrowRight]));
        assert_eq!(input, PlayerInput { dir: 0, jump_held: false });
        let input = PlayerInput::sample(&Held(vec![KeyCode::KeyA, KeyCode::Space]));
        assert_eq!(input, PlayerInput { dir: -1, jump_held: true });
    }

    #[test]
    fn fresh_player_cannot_jump_at_time_zero() {
        let mut sim = Sim::new(Vec2::new(0.0, 0.0), Vec::new());
        let events = sim.step(JUMP);
        assert!(!events.jumped);
        assert!(sim.player.vel().y > 0.0);
    }

    #[test]
    fn free_fall_without_platforms() {
        let mut sim = Sim::new(Vec2::ZERO, Vec::new());
        sim.idle(60);
        let vy = sim.player.vel().y;
        assert!((vy - sim.physics.gravity).abs() < 1e-3, "vy={}", vy);
        assert!(sim.player.pos().y > 15.0);
        assert!(!sim.player.on_ground);
    }

    #[test]
    fn falls_and_lands_on_floor() {
        let mut sim = Sim::new(Vec2::new(0.0, 5.0), vec![floor()]);
        let mut landed = false;
        for _ in 0..120 {
            landed |= sim.step(PlayerInput::default()).landed;
        }
        assert!(landed);
        assert!(sim.player.on_ground);
        assert_eq!(sim.player.pos().y, 10.0 - sim.player.tuning.size.y);
        assert_eq!(sim.player.vel().y, 0.0);
    }

    #[test]
    fn resting_contact_does_not_repeat_landed() {
        let mut sim = Sim::standing_on_floor();
        for _ in 0..30 {
            assert!(!sim.step(PlayerInput::default()).landed);
        }
        assert!(sim.player.on_ground);
    }

    #[test]
    fn grounded_jump_sets_upward_velocity() {
        let mut sim = Sim::standing_on_floor();
        let y0 = sim.player.pos().y;
        let events = sim.step(JUMP);
        assert!(events.jumped);
        assert!(!events.air_jump);
        let expected = -sim.player.tuning.jump_force + sim.physics.gravity * DT;
        assert!((sim.player.vel().y - expected).abs() < 1e-4);
        assert!(sim.player.pos().y < y0);
        assert_eq!(sim.player.last_jump_pressed, None);
    }

    #[test]
    fn holding_jump_does_not_repeat() {
        let mut sim = Sim::standing_on_floor();
        assert!(sim.step(JUMP).jumped);
        let mut jumps = 0;
        let mut landed = false;
        for _ in 0..180 {
            let ev = sim.step(JUMP);
            jumps += ev.jumped as u32;
            landed |= ev.landed;
        }
        assert!(landed, "player should come back down");
        assert_eq!(jumps, 0);
    }

    #[test]
    fn coyote_time_allows_jump_after_leaving_ledge() {
        // Short ledge; run right until the probe no longer finds it.
        let ledge = Rect::new(-5.0, 10.0, 5.0, 2.0);
        let h = PlayerTuning::default().size.y;
        let mut sim = Sim::new(Vec2::new(-1.5, 10.0 - h), vec![ledge]);
        sim.idle(1);
        assert!(sim.player.on_ground);

        let mut ticks = 0;
        while sim.player.on_ground {
            sim.step(RIGHT);
            ticks += 1;
            assert!(ticks < 120, "never walked off the ledge");
        }
        let left_ground_at = sim.player.last_on_ground.unwrap();

        let events = sim.step(PlayerInput { dir: 1, jump_held: true });
        assert!(sim.now - left_ground_at <= sim.player.tuning.coyote_time);
        assert!(events.jumped);
        assert!(!events.air_jump);
        assert!(sim.player.vel().y < -sim.player.tuning.jump_force * 0.9);
    }

    #[test]
    fn no_jump_once_coyote_window_has_passed() {
        let ledge = Rect::new(-5.0, 10.0, 5.0, 2.0);
        let h = PlayerTuning::default().size.y;
        let mut sim = Sim::new(Vec2::new(-1.5, 10.0 - h), vec![ledge]);
        sim.idle(1);
        while sim.player.on_ground {
            sim.step(RIGHT);
        }
        // 0.2 s of falling, well past the 0.1 s window.
        sim.idle(12);
        let events = sim.step(JUMP);
        assert!(!events.jumped);
        assert!(sim.player.vel().y > 0.0);
    }

    #[test]
    fn buffered_press_jumps_on_landing() {
        let h = PlayerTuning::default().size.y;
        // Hovering just above the floor: lands within a few ticks.
        let mut sim = Sim::new(Vec2::new(0.0, 10.0 - h - 0.05), vec![floor()]);

        // Press while airborne: no coyote, no air jumps, so nothing happens yet.
        let events = sim.step(JUMP);
        assert!(!events.jumped);
        let pressed_at = sim.player.last_jump_pressed.unwrap();

        let mut ticks = 0;
        loop {
            let ev = sim.step(PlayerInput::default());
            ticks += 1;
            if ev.landed {
                break;
            }
            assert!(ticks < 10, "never landed");
        }
        let events = sim.step(PlayerInput::default());
        assert!(sim.now - pressed_at <= sim.player.tuning.jump_buffer);
        assert!(events.jumped, "buffered press should fire on landing");
        assert!(sim.player.vel().y < 0.0);
    }

    /// Falls from 4 units above the floor, pressing jump on tick `press_at`
    /// (1-based). Returns the tick that landed and the tick that jumped.
    fn fall_with_press(press_at: Option<usize>) -> (usize, Option<usize>) {
        let h = PlayerTuning::default().size.y;
        let mut sim = Sim::new(Vec2::new(0.0, 10.0 - h - 4.0), vec![floor()]);
        let (mut landed, mut jumped) = (0, None);
        for tick in 1..=120 {
            let input = if press_at == Some(tick) { JUMP } else { PlayerInput::default() };
            let ev = sim.step(input);
            if ev.landed && landed == 0 {
                landed = tick;
            }
            if ev.jumped && jumped.is_none() {
                jumped = Some(tick);
            }
        }
        (landed, jumped)
    }

    #[test]
    fn buffer_window_edges() {
        let (landed, jumped) = fall_with_press(None);
        assert!(landed > 10);
        assert_eq!(jumped, None);

        // The buffered jump fires on the tick after touchdown. 7 ticks is
        // inside the 0.12 s window, 8 ticks is past it.
        let fires_at = landed + 1;
        let (_, jumped) = fall_with_press(Some(fires_at - 7));
        assert_eq!(jumped, Some(fires_at));
        let (_, jumped) = fall_with_press(Some(fires_at - 8));
        assert_eq!(jumped, None);
    }

    #[test]
    fn stale_buffered_press_is_ignored() {
        let h = PlayerTuning::default().size.y;
        let mut sim = Sim::new(Vec2::new(0.0, 10.0 - h - 4.0), vec![floor()]);
        sim.step(JUMP);
        let mut jumped = false;
        for _ in 0..120 {
            jumped |= sim.step(PlayerInput::default()).jumped;
        }
        assert!(!jumped, "a press 4 units up is outside the buffer window");
        assert!(sim.player.on_ground);
    }

    #[test]
    fn repress_overwrites_buffered_timestamp() {
        let mut sim = Sim::new(Vec2::ZERO, Vec::new());
        sim.step(JUMP);
        let first = sim.player.last_jump_pressed.unwrap();
        sim.step(PlayerInput::default());
        sim.step(JUMP);
        let second = sim.player.last_jump_pressed.unwrap();
        assert!(second > first);
    }

    #[test]
    fn extra_jump_is_consumed_in_air_and_refilled_on_ground() {
        let mut sim = Sim::standing_on_floor();
        sim.player.tuning.extra_jumps = 1;
        sim.idle(1);
        assert_eq!(sim.player.jumps_left, 1);

        assert!(sim.step(JUMP).jumped);
        sim.idle(20);
        assert!(!sim.player.on_ground);

        let air = sim.step(JUMP);
        assert!(air.jumped && air.air_jump);
        assert_eq!(sim.player.jumps_left, 0);
        sim.idle(1);
        assert!(!sim.step(JUMP).jumped, "no jumps left");

        for _ in 0..240 {
            if sim.step(PlayerInput::default()).landed {
                break;
            }
        }
        assert!(sim.player.on_ground);
        assert_eq!(sim.player.jumps_left, 1);
    }

    #[test]
    fn horizontal_speed_converges_on_ground() {
        let mut sim = Sim::standing_on_floor();
        for _ in 0..60 {
            sim.step(RIGHT);
        }
        let vx = sim.player.vel().x;
        assert!((vx - sim.player.tuning.move_speed).abs() < 1e-2, "vx={}", vx);
    }

    #[test]
    fn air_control_limits_target_speed() {
        let mut sim = Sim::new(Vec2::ZERO, Vec::new());
        for _ in 0..600 {
            sim.step(RIGHT);
        }
        let tuning = sim.player.tuning;
        let vx = sim.player.vel().x;
        assert!((vx - tuning.move_speed * tuning.air_control).abs() < 1e-2, "vx={}", vx);
    }

    #[test]
    fn velocity_blend_is_exponential() {
        let mut sim = Sim::standing_on_floor();
        sim.step(RIGHT);
        // The floor is found by the probe on every tick, so the ground rate applies.
        let target = sim.player.tuning.move_speed;
        let expected = target + (0.0 - target) * (-sim.physics.friction_ground * DT).exp();
        assert!((sim.player.vel().x - expected).abs() < 1e-4);
    }

    #[test]
    fn wall_stops_horizontal_motion() {
        let h = PlayerTuning::default().size.y;
        let wall = Rect::new(3.0, 0.0, 1.0, 10.0);
        let mut sim = Sim::new(Vec2::new(0.0, 10.0 - h), vec![floor(), wall]);
        for _ in 0..120 {
            sim.step(RIGHT);
        }
        let w = sim.player.tuning.size.x;
        assert!((sim.player.pos().x - (wall.x - w)).abs() < 1e-4);
        assert!(sim.player.on_ground);
    }

    #[test]
    fn facing_follows_last_nonzero_direction() {
        let mut sim = Sim::standing_on_floor();
        assert_eq!(sim.player.facing, Facing::Right);
        sim.step(LEFT);
        assert_eq!(sim.player.facing, Facing::Left);
        sim.idle(5);
        assert_eq!(sim.player.facing, Facing::Left);
        sim.step(RIGHT);
        assert_eq!(sim.player.facing, Facing::Right);
        assert_eq!(Facing::Left.sign(), -1.0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut sim = Sim::standing_on_floor();
        sim.player.tuning.extra_jumps = 2;
        sim.step(JUMP);
        sim.step(LEFT);

        let spawn = Vec2::new(3.0, -2.0);
        let mut once = sim.player.clone();
        once.reset(spawn);
        let mut twice = sim.player.clone();
        twice.reset(spawn);
        twice.reset(spawn);

        assert_eq!(once, twice);
        assert_eq!(once.pos(), spawn);
        assert_eq!(once.vel(), Vec2::ZERO);
        assert_eq!(once.jumps_left, 2);
        assert_eq!(once.last_on_ground, None);
        assert_eq!(once.last_jump_pressed, None);
        assert!(!once.on_ground);
        assert_eq!(once.facing, Facing::Right);
    }

    #[test]
    fn reset_clears_held_jump_edge() {
        let mut sim = Sim::standing_on_floor();
        sim.step(JUMP);
        let spawn = Vec2::new(0.0, 10.0 - sim.player.tuning.size.y);
        sim.player.reset(spawn);
        // Still holding jump from before the reset counts as a new press.
        assert!(sim.step(JUMP).jumped);
    }
}
