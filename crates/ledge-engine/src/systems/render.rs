use glam::Vec2;

use crate::api::game::RenderContext;
use crate::components::layer::RenderLayer;
use crate::components::tilemap::TileMap;
use crate::core::physics::Rect;
use crate::entities::player::Player;
use crate::renderer::camera::Camera2D;
use crate::renderer::instance::RenderInstance;

/// Read-only view of everything one frame draws.
pub struct FrameScene<'a> {
    pub camera: &'a Camera2D,
    pub tiles: &'a TileMap,
    pub platforms: &'a [Rect],
    pub player: &'a Player,
}

/// Project a world rectangle to a screen-space instance on `layer`.
pub fn project_rect(
    camera: &Camera2D,
    rect: &Rect,
    layer: RenderLayer,
    viewport_px: Vec2,
    px_per_unit: f32,
) -> RenderInstance {
    let screen = camera.world_to_screen(rect.pos(), viewport_px, px_per_unit);
    let size = (Vec2::new(rect.w, rect.h) * px_per_unit).round();
    RenderInstance::new(layer, screen.x, screen.y, size.x, size.y)
}

/// Build the render buffer for one frame, back to front: background, tiles,
/// visible platforms, then the player.
pub fn build_frame(ctx: &mut RenderContext, scene: &FrameScene) {
    let viewport = ctx.viewport_px;
    let scale = ctx.px_per_unit;
    let buffer = &mut *ctx.render_buffer;
    buffer.clear();

    ctx.background
        .build_instances(scene.camera.center, viewport, ctx.time, buffer);

    scene
        .tiles
        .build_visible_instances(scene.camera, viewport, scale, buffer);

    for p in scene.platforms {
        if scene.camera.is_rect_visible(p) {
            buffer.push(project_rect(scene.camera, p, RenderLayer::Platforms, viewport, scale));
        }
    }

    let player = project_rect(scene.camera, &scene.player.rect(), RenderLayer::Player, viewport, scale)
        .with_facing(scene.player.facing.sign());
    if !buffer.push(player) {
        log::warn!("render buffer full ({} instances), player dropped", buffer.capacity());
    }
}
