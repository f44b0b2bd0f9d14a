//! Sparse decorative tilemap built from a level's tile layers.
//!
//! Only occupied cells are stored, keyed by integer grid coordinates, so a
//! level can scatter tiles over a huge area without allocating a dense grid.
//! Rendering walks the camera window (plus a margin) and looks cells up.

use std::collections::HashMap;

use glam::Vec2;

use crate::components::layer::RenderLayer;
use crate::core::level::{TileLayers, TileRect};
use crate::renderer::camera::Camera2D;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Tile id. `0` is never stored.
pub type TileId = u16;

/// Extra cells drawn around the visible window.
pub const CULL_MARGIN: i32 = 2;

#[derive(Debug, Clone)]
pub struct TileMap {
    /// Size of each tile in world units.
    pub tile_size: f32,
    cells: HashMap<(i32, i32), TileId>,
}

impl Default for TileMap {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TileMap {
    /// Create a new empty tilemap.
    pub fn new(tile_size: f32) -> Self {
        Self {
            tile_size,
            cells: HashMap::new(),
        }
    }

    /// Fill every layer rectangle of a level. Later rects overwrite earlier ones.
    pub fn build_from_level(tiles: Option<&TileLayers>) -> Self {
        let Some(tiles) = tiles else {
            return Self::default();
        };
        let mut map = Self::new(tiles.tile_size);
        for layer in &tiles.layers {
            for r in &layer.rects {
                map.fill_rect(r.x, r.y, r.w, r.h, r.id);
            }
        }
        log::debug!("tilemap built: {} cells", map.tile_count());
        map
    }

    /// Occupy every cell the world rectangle touches, from `floor(x)` to
    /// `ceil(x + w) - 1` on each axis. An id of 0 clears instead. Rects that
    /// are not finite or fall off the cell grid are skipped.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, id: TileId) {
        let rect = TileRect { x, y, w, h, id };
        let Some((xs, ys)) = rect.cells(self.tile_size) else {
            log::warn!("skipping tile rect ({}, {}, {}, {}) off the cell grid", x, y, w, h);
            return;
        };
        for ty in ys {
            for tx in xs.clone() {
                self.set(tx, ty, id);
            }
        }
    }

    pub fn set(&mut self, x: i32, y: i32, id: TileId) {
        if id == 0 {
            self.cells.remove(&(x, y));
        } else {
            self.cells.insert((x, y), id);
        }
    }

    /// Get the tile id at grid position (x, y).
    pub fn get(&self, x: i32, y: i32) -> Option<TileId> {
        self.cells.get(&(x, y)).copied()
    }

    /// Count of non-empty tiles.
    pub fn tile_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Clear all tiles.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Top-left world position of a cell.
    pub fn tile_to_world(&self, x: i32, y: i32) -> Vec2 {
        Vec2::new(x as f32, y as f32) * self.tile_size
    }

    /// Push screen-space instances for the occupied cells in view.
    /// Returns how many were pushed.
    pub fn build_visible_instances(
        &self,
        camera: &Camera2D,
        viewport_px: Vec2,
        px_per_unit: f32,
        out: &mut RenderBuffer,
    ) -> usize {
        if self.cells.is_empty() {
            return 0;
        }
        let s = self.tile_size;
        let lo = camera.center - camera.half_extents;
        let hi = camera.center + camera.half_extents;
        let min_x = (lo.x / s).floor() as i32 - CULL_MARGIN;
        let max_x = (hi.x / s).floor() as i32 + CULL_MARGIN;
        let min_y = (lo.y / s).floor() as i32 - CULL_MARGIN;
        let max_y = (hi.y / s).floor() as i32 + CULL_MARGIN;

        let size_px = (s * px_per_unit).round();
        let mut pushed = 0;
        for ty in min_y..=max_y {
            for tx in min_x..=max_x {
                let Some(id) = self.get(tx, ty) else {
                    continue;
                };
                let screen = camera.world_to_screen(self.tile_to_world(tx, ty), viewport_px, px_per_unit);
                let inst = RenderInstance::new(RenderLayer::Tiles, screen.x, screen.y, size_px, size_px)
                    .with_kind(id as f32);
                if !out.push(inst) {
                    return pushed;
                }
                pushed += 1;
            }
        }
        pushed
    }
}
