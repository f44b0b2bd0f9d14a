use glam::Vec2;

use crate::core::physics::{Bounds, Rect};
use crate::core::smoothing::approach_vec2;

/// Default follow smoothing rate (per second).
pub const DEFAULT_SMOOTH_RATE: f32 = 8.0;

/// How a game wants its camera to follow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub offset: Vec2,
    pub smooth_rate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            smooth_rate: DEFAULT_SMOOTH_RATE,
        }
    }
}

/// Side-scrolling follow camera.
/// `center` is the world position shown at the middle of the screen; y grows downward.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    /// Camera center position in world space.
    pub center: Vec2,
    /// Added to every follow/snap target (e.g. look slightly above the player).
    pub offset: Vec2,
    /// Half of the visible area in world units.
    pub half_extents: Vec2,
    /// Optional bounds the visible area is kept inside.
    pub bounds: Option<Bounds>,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            offset: Vec2::ZERO,
            half_extents: Vec2::new(10.0, 6.0),
            bounds: None,
        }
    }
}

impl Camera2D {
    pub fn new(half_extents: Vec2) -> Self {
        Self {
            half_extents,
            ..Self::default()
        }
    }

    /// Recompute the visible area from a pixel viewport.
    pub fn resize(&mut self, viewport_w_px: f32, viewport_h_px: f32, px_per_unit: f32) {
        self.half_extents = Vec2::new(viewport_w_px, viewport_h_px) / px_per_unit * 0.5;
        self.center = self.clamp(self.center);
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Set world bounds for camera clamping.
    /// Camera will not show areas outside these bounds.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    /// Clear camera bounds (allow camera to move anywhere).
    pub fn clear_bounds(&mut self) {
        self.bounds = None;
    }

    /// Jump straight to `target + offset`, clamped. Used on spawn and reset.
    pub fn snap_to(&mut self, target: Vec2) {
        self.center = self.clamp(target + self.offset);
    }

    /// Ease toward `target + offset` by `1 - e^(-smooth_rate * dt)`, then clamp.
    pub fn follow(&mut self, target: Vec2, dt: f32, smooth_rate: f32) {
        let goal = target + self.offset;
        self.center = self.clamp(approach_vec2(self.center, goal, smooth_rate, dt));
    }

    /// Keep the view inside bounds. An axis where the bounds are smaller
    /// than the view centers on the bounds midpoint instead.
    pub fn clamp(&self, center: Vec2) -> Vec2 {
        let Some(b) = self.bounds else {
            return center;
        };
        let lo = b.min + self.half_extents;
        let hi = b.max - self.half_extents;
        let mid = b.center();
        let axis = |c: f32, lo: f32, hi: f32, mid: f32| {
            if lo > hi {
                mid
            } else {
                c.clamp(lo, hi)
            }
        };
        Vec2::new(axis(center.x, lo.x, hi.x, mid.x), axis(center.y, lo.y, hi.y, mid.y))
    }

    /// Project a world point to whole screen pixels.
    pub fn world_to_screen(&self, world: Vec2, viewport_px: Vec2, px_per_unit: f32) -> Vec2 {
        ((world - self.center) * px_per_unit + viewport_px * 0.5).round()
    }

    /// World rectangle currently on screen.
    pub fn visible_rect(&self) -> Rect {
        let min = self.center - self.half_extents;
        let size = self.half_extents * 2.0;
        Rect::new(min.x, min.y, size.x, size.y)
    }

    /// Check if a world-space point is visible in the viewport.
    pub fn is_visible(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y
    }

    /// Check if a world-space rectangle overlaps the viewport. Touching counts.
    pub fn is_rect_visible(&self, rect: &Rect) -> bool {
        let view = self.visible_rect();
        rect.right() >= view.left()
            && rect.left() <= view.right()
            && rect.bottom() >= view.top()
            && rect.top() <= view.bottom()
    }
}
