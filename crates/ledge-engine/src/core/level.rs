use std::ops::RangeInclusive;

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::core::physics::{Bounds, Rect};

/// Padding added around the platform extents when a level does not set one.
pub const DEFAULT_BOUNDS_PADDING: f32 = 2.0;

/// Most grid cells a single tile rect may cover along one axis.
pub const MAX_TILE_SPAN: i64 = 4096;

/// Region used when a level has no platforms at all (before padding).
pub const EMPTY_LEVEL_BOUNDS: [f32; 4] = [-50.0, -20.0, 50.0, 50.0];

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("platform {index} has a non-finite coordinate or a negative size")]
    InvalidPlatform { index: usize },
    #[error("tile size must be a positive number, got {0}")]
    InvalidTileSize(f32),
    #[error("tile rect {index} of layer {layer} is not finite, has a negative size or covers too many cells")]
    InvalidTileRect { layer: usize, index: usize },
}

/// On-disk level description. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub spawn: Option<SpawnPoint>,
    #[serde(default)]
    pub platforms: Vec<Rect>,
    #[serde(default)]
    pub bounds_padding: Option<f32>,
    #[serde(default)]
    pub tiles: Option<TileLayers>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

/// Decorative tile layers: rectangles filled with a tile id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayers {
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    #[serde(default)]
    pub layers: Vec<TileLayer>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TileLayer {
    #[serde(default)]
    pub rects: Vec<TileRect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TileRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default = "default_tile_id")]
    pub id: u16,
}

impl TileRect {
    /// Grid cells covered at `tile_size`: `floor(x)..=ceil(x + w) - 1` per
    /// axis. None when the rect is not finite, has a negative size, or its
    /// cells fall outside the i32 grid or past `MAX_TILE_SPAN`.
    pub fn cells(&self, tile_size: f32) -> Option<(RangeInclusive<i32>, RangeInclusive<i32>)> {
        if self.w < 0.0 || self.h < 0.0 {
            return None;
        }
        Some((
            cell_range(self.x, self.w, tile_size)?,
            cell_range(self.y, self.h, tile_size)?,
        ))
    }
}

fn cell_range(start: f32, len: f32, tile_size: f32) -> Option<RangeInclusive<i32>> {
    let s = f64::from(tile_size);
    let lo = (f64::from(start) / s).floor();
    let hi = ((f64::from(start) + f64::from(len)) / s).ceil() - 1.0;
    if !(lo.is_finite() && hi.is_finite()) {
        return None;
    }
    if lo < f64::from(i32::MIN) || hi > f64::from(i32::MAX) {
        return None;
    }
    let (lo, hi) = (lo as i64, hi as i64);
    if hi - lo + 1 > MAX_TILE_SPAN {
        return None;
    }
    // A zero-length rect on a cell edge gives hi = lo - 1, an empty range.
    Some(lo as i32..=hi.max(i64::from(i32::MIN)) as i32)
}

fn default_tile_size() -> f32 {
    1.0
}

fn default_tile_id() -> u16 {
    1
}

/// A loaded, validated level. Immutable for the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub name: String,
    pub spawn: Vec2,
    pub platforms: Vec<Rect>,
    pub bounds: Bounds,
    pub tiles: Option<TileLayers>,
}

impl Level {
    /// Parse and validate a level from JSON. `fallback_name` is used when the
    /// document has no `name`.
    pub fn from_json(json: &str, fallback_name: &str) -> Result<Self, LevelError> {
        let data: LevelData = serde_json::from_str(json)?;
        Self::from_data(data, fallback_name)
    }

    pub fn from_data(data: LevelData, fallback_name: &str) -> Result<Self, LevelError> {
        for (index, p) in data.platforms.iter().enumerate() {
            let finite = [p.x, p.y, p.w, p.h].iter().all(|v| v.is_finite());
            if !finite || p.w < 0.0 || p.h < 0.0 {
                return Err(LevelError::InvalidPlatform { index });
            }
        }
        if let Some(tiles) = &data.tiles {
            if !(tiles.tile_size.is_finite() && tiles.tile_size > 0.0) {
                return Err(LevelError::InvalidTileSize(tiles.tile_size));
            }
            for (layer, l) in tiles.layers.iter().enumerate() {
                for (index, r) in l.rects.iter().enumerate() {
                    if r.cells(tiles.tile_size).is_none() {
                        return Err(LevelError::InvalidTileRect { layer, index });
                    }
                }
            }
        }

        let padding = data.bounds_padding.unwrap_or(DEFAULT_BOUNDS_PADDING);
        let bounds = level_bounds(&data.platforms, padding);
        let spawn = data.spawn.map_or(Vec2::ZERO, |s| Vec2::new(s.x, s.y));

        Ok(Self {
            name: data.name.unwrap_or_else(|| fallback_name.to_string()),
            spawn,
            platforms: data.platforms,
            bounds,
            tiles: data.tiles,
        })
    }

    /// A level with no geometry. The body free-falls and the camera still has
    /// a region to clamp to.
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            spawn: Vec2::ZERO,
            platforms: Vec::new(),
            bounds: level_bounds(&[], DEFAULT_BOUNDS_PADDING),
            tiles: None,
        }
    }

    /// Build a level directly from platforms, with default padding.
    pub fn from_platforms(name: &str, spawn: Vec2, platforms: Vec<Rect>) -> Self {
        let bounds = level_bounds(&platforms, DEFAULT_BOUNDS_PADDING);
        Self {
            name: name.to_string(),
            spawn,
            platforms,
            bounds,
            tiles: None,
        }
    }
}

/// Platform extents padded by `padding`, or the empty-level region.
pub fn level_bounds(platforms: &[Rect], padding: f32) -> Bounds {
    let [min_x, min_y, max_x, max_y] = EMPTY_LEVEL_BOUNDS;
    Bounds::enclosing(platforms)
        .unwrap_or_else(|| Bounds::new(min_x, min_y, max_x, max_y))
        .padded(padding)
}
