//! Math utilities and types
//!
//! Provides the fundamental 2D math types for the simulation. All gameplay
//! code works in world-space pixels with the Y axis pointing down.

use std::f32::consts::FRAC_PI_2;

pub use nalgebra::{Matrix3, Rotation2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3x3 homogeneous matrix for 2D camera transforms
pub type Mat3 = Matrix3<f32>;

/// Rotate a vector by an angle in radians (counter-clockwise in screen space).
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Rotation2::new(angle) * v
}

/// Angle an entity facing `direction` is rotated by, relative to the default
/// "up" facing of `(0, -1)`.
///
/// Sprite sheets and weapon mounts are authored pointing up; rotating their
/// local offsets by this angle places them in world space.
pub fn facing_angle(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x) + FRAC_PI_2
}

/// Normalize a vector, returning zero for a zero-length input.
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let length = v.norm();
    if length == 0.0 {
        Vec2::zeros()
    } else {
        v / length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rotate_quarter_turn() {
        let v = rotate(Vec2::new(1.0, 0.0), FRAC_PI_2);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn facing_up_is_zero_rotation() {
        assert_relative_eq!(facing_angle(Vec2::new(0.0, -1.0)), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn facing_right_is_quarter_turn() {
        assert_relative_eq!(facing_angle(Vec2::new(1.0, 0.0)), FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn normalize_handles_zero() {
        assert_eq!(normalize_or_zero(Vec2::zeros()), Vec2::zeros());
        let n = normalize_or_zero(Vec2::new(3.0, 4.0));
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-6);
    }
}
