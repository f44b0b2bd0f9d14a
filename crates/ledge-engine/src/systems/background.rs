//! Parallax background: sky, a slow star field and a band of hills.
//!
//! Everything here is in screen pixels. The camera position (world units)
//! only shifts the layers, each by its own factor, so distant layers crawl.

use glam::Vec2;

use crate::components::layer::RenderLayer;
use crate::renderer::instance::{RenderBuffer, RenderInstance};
use crate::systems::rng::Rng;

/// Star layer scroll factor (pixels per world unit of camera travel).
pub const STAR_PARALLAX: f32 = 5.0;
/// Hill layer scroll factors.
pub const HILL_PARALLAX: Vec2 = Vec2::new(10.0, 6.0);
pub const STAR_ALPHA: f32 = 0.7;
pub const HILL_ALPHA: f32 = 0.28;
pub const HILL_RADIUS: f32 = 200.0;
pub const HILL_SPACING: f32 = 300.0;
/// The star field is rebuilt only when the view changes by at least this much.
pub const RESEED_THRESHOLD_PX: f32 = 50.0;
const MIN_STARS: usize = 80;
const PX_PER_STAR: f32 = 14_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone)]
pub struct Background {
    rng: Rng,
    stars: Vec<Star>,
    seeded_for: Vec2,
}

impl Background {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            stars: Vec::new(),
            seeded_for: Vec2::ZERO,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Scatter stars over the view if there are none yet or the view
    /// changed noticeably. Returns whether a reseed happened.
    pub fn ensure_stars(&mut self, view_px: Vec2) -> bool {
        let delta = (view_px - self.seeded_for).abs();
        if !self.stars.is_empty() && delta.x < RESEED_THRESHOLD_PX && delta.y < RESEED_THRESHOLD_PX {
            return false;
        }
        self.seeded_for = view_px;
        let count = MIN_STARS.max((view_px.x * view_px.y / PX_PER_STAR) as usize);
        self.stars.clear();
        self.stars.reserve(count);
        for _ in 0..count {
            let pos = Vec2::new(self.rng.next_f32() * view_px.x, self.rng.next_f32() * view_px.y);
            let radius = self.rng.range(0.3, 1.8);
            let alpha = self.rng.range(0.2, 0.6);
            self.stars.push(Star { pos, radius, alpha });
        }
        log::debug!("background reseeded: {} stars for {}x{}", count, view_px.x, view_px.y);
        true
    }

    /// Push sky, stars and hills for one frame. `t` is the session clock.
    pub fn build_instances(&mut self, camera_center: Vec2, view_px: Vec2, t: f32, out: &mut RenderBuffer) {
        out.push(RenderInstance::new(RenderLayer::Sky, 0.0, 0.0, view_px.x, view_px.y));

        self.ensure_stars(view_px);
        let shift = star_shift(camera_center, view_px);
        for (i, s) in self.stars.iter().enumerate() {
            let p = s.pos - shift;
            let inst = RenderInstance::new(RenderLayer::Stars, p.x, p.y, s.radius, s.radius)
                .with_kind(i as f32)
                .with_alpha(STAR_ALPHA * s.alpha);
            if !out.push(inst) {
                return;
            }
        }

        let hill_shift = camera_center * HILL_PARALLAX;
        for i in -2..8 {
            let c = hill_center(i, t, view_px.y) - hill_shift;
            let inst = RenderInstance::new(RenderLayer::Hills, c.x, c.y, HILL_RADIUS, HILL_RADIUS)
                .with_kind(i as f32)
                .with_alpha(HILL_ALPHA);
            if !out.push(inst) {
                return;
            }
        }
    }
}

/// Star layer offset, wrapped by the viewport. Keeps the sign of the camera
/// coordinate like a truncating remainder.
pub fn star_shift(camera_center: Vec2, view_px: Vec2) -> Vec2 {
    let s = camera_center * STAR_PARALLAX;
    Vec2::new(s.x % view_px.x, s.y % view_px.y)
}

/// Unscrolled center of hill `i`: evenly spaced with a slow sway, odd hills
/// slightly higher.
pub fn hill_center(i: i32, t: f32, view_h: f32) -> Vec2 {
    let x = i as f32 * HILL_SPACING + ((t + i as f32) * 0.2).sin() * 15.0;
    let y = view_h * 0.75 + if i % 2 != 0 { -12.0 } else { 8.0 };
    Vec2::new(x, y)
}
