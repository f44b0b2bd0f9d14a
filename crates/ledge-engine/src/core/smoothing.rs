//! Framerate-independent exponential smoothing.
//!
//! Moving a value toward a target with `1 - e^(-rate * dt)` per step gives the
//! same convergence after one second whether that second is split into 30 or
//! 240 steps. Both the player's horizontal velocity and the camera use it.

use glam::Vec2;

/// Fraction of the remaining distance covered in `dt` at `rate` (per second).
/// In `[0, 1)` for `rate > 0` and `dt >= 0`.
#[inline]
pub fn decay_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

/// Linear interpolation.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Exponential approach: `target + (current - target) * e^(-rate * dt)`.
#[inline]
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    target + (current - target) * (-rate * dt).exp()
}

/// Vector form of [`approach`], component-wise.
#[inline]
pub fn approach_vec2(current: Vec2, target: Vec2, rate: f32, dt: f32) -> Vec2 {
    current + (target - current) * decay_factor(rate, dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_is_zero_for_zero_dt() {
        assert_eq!(decay_factor(8.0, 0.0), 0.0);
    }

    #[test]
    fn factor_stays_below_one() {
        for dt in [0.001, 0.016, 0.25] {
            let f = decay_factor(18.0, dt);
            assert!(f > 0.0 && f < 1.0, "f={} dt={}", f, dt);
        }
    }

    #[test]
    fn approach_is_framerate_independent() {
        let mut coarse = 0.0;
        for _ in 0..30 {
            coarse = approach(coarse, 12.0, 18.0, 1.0 / 30.0);
        }
        let mut fine = 0.0;
        for _ in 0..240 {
            fine = approach(fine, 12.0, 18.0, 1.0 / 240.0);
        }
        assert!((coarse - fine).abs() < 1e-3, "{} vs {}", coarse, fine);
    }

    #[test]
    fn approach_matches_lerp_with_decay_factor() {
        let a = approach(2.0, 10.0, 8.0, 0.05);
        let b = lerp(2.0, 10.0, decay_factor(8.0, 0.05));
        assert!((a - b).abs() < 1e-5);
        let v = approach_vec2(Vec2::new(2.0, -4.0), Vec2::new(10.0, 4.0), 8.0, 0.05);
        assert!((v.x - a).abs() < 1e-5);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(3.0, 7.0, 0.0), 3.0);
        assert_eq!(lerp(3.0, 7.0, 1.0), 7.0);
    }
}
