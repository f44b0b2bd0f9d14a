use glam::Vec2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Axis-aligned rectangle. `(x, y)` is the top-left corner; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Same size, moved by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    /// Strict overlap test. Rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        aabb_overlap(self, other)
    }
}

/// Strict AABB intersection (open boundary).
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// World-space extents as min/max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Grow by `pad` on every side.
    pub fn padded(&self, pad: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(pad),
            max: self.max + Vec2::splat(pad),
        }
    }

    /// Smallest bounds enclosing every rect, or None for an empty set.
    pub fn enclosing<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Self> {
        rects.into_iter().fold(None, |acc: Option<Bounds>, r| {
            let (min, max) = (r.pos(), Vec2::new(r.right(), r.bottom()));
            Some(match acc {
                Some(b) => Bounds {
                    min: b.min.min(min),
                    max: b.max.max(max),
                },
                None => Bounds { min, max },
            })
        })
    }
}

// ---------------------------------------------------------------------------
// Bodies and the sweep
// ---------------------------------------------------------------------------

/// A moving rectangle: position and size plus velocity in units per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub rect: Rect,
    pub vel: Vec2,
}

impl Body {
    pub fn new(rect: Rect, vel: Vec2) -> Self {
        Self { rect, vel }
    }
}

/// Outcome of one `move_and_collide` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Resolved top-left position.
    pub pos: Vec2,
    /// Velocity with blocked components zeroed.
    pub vel: Vec2,
    /// The horizontal pass hit something.
    pub hit_x: bool,
    /// The vertical pass hit something.
    pub hit_y: bool,
    /// The vertical pass stopped a downward move on a platform top.
    pub landed: bool,
}

/// Move `body` by `vel * dt` against static `platforms`, one axis at a time.
///
/// X is advanced and resolved first, then Y using the resolved X. The first
/// overlapping platform in iteration order pushes the body back to the edge it
/// entered from and zeroes that velocity component. Later overlaps on the same
/// axis only flag the hit, so the body can be left overlapping them. Corners
/// are not special-cased: a diagonal move into a corner can stop on one axis
/// where an exact sweep would slide.
pub fn move_and_collide(body: &Body, dt: f32, platforms: &[Rect]) -> MoveResult {
    let Rect { mut x, mut y, w, h } = body.rect;
    let mut vel = body.vel;
    let mut hit_x = false;
    let mut hit_y = false;
    let mut landed = false;

    // Horizontal
    x += vel.x * dt;
    for p in platforms {
        if aabb_overlap(&Rect::new(x, y, w, h), p) {
            if vel.x > 0.0 {
                x = p.x - w;
            } else if vel.x < 0.0 {
                x = p.x + p.w;
            }
            vel.x = 0.0;
            hit_x = true;
        }
    }

    // Vertical
    y += vel.y * dt;
    for p in platforms {
        if aabb_overlap(&Rect::new(x, y, w, h), p) {
            if vel.y > 0.0 {
                y = p.y - h;
                landed = true;
            } else if vel.y < 0.0 {
                y = p.y + p.h;
            }
            vel.y = 0.0;
            hit_y = true;
        }
    }

    MoveResult {
        pos: Vec2::new(x, y),
        vel,
        hit_x,
        hit_y,
        landed,
    }
}

/// Whether `rect`, nudged down by `offset`, rests on any platform.
pub fn probe_ground(rect: &Rect, platforms: &[Rect], offset: f32) -> bool {
    let probe = rect.translated(Vec2::new(0.0, offset));
    platforms.iter().any(|p| aabb_overlap(&probe, p))
}
