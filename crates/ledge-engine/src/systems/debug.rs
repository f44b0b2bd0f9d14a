//! Text readout for the host's debug overlay.

use glam::Vec2;

/// `cam=(x.xx, y.yy) v=(vx.xx, vy.yy)`
pub fn debug_readout(camera_center: Vec2, velocity: Vec2) -> String {
    format!(
        "cam=({:.2}, {:.2}) v=({:.2}, {:.2})",
        camera_center.x, camera_center.y, velocity.x, velocity.y
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_uses_two_decimals() {
        let text = debug_readout(Vec2::new(1.0, -2.345), Vec2::new(12.0, 0.006));
        assert_eq!(text, "cam=(1.00, -2.35) v=(12.00, 0.01)");
    }
}
