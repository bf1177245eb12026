// 2D vector math for growth geometry.
//
// Every derived value is truncated to 8 decimal digits so that float error
// cannot drift across the thousands of segment computations a long run makes.

use std::ops::{Add, Sub};

const PRECISION_SCALER: f64 = 1e8;

fn truncated(value: f64) -> f64 {
    (value * PRECISION_SCALER).trunc() / PRECISION_SCALER
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f64 {
        truncated(self.raw_magnitude())
    }

    fn raw_magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or the zero vector when there is
    /// no direction to preserve.
    pub fn normalized(&self) -> Vec2 {
        let magnitude = self.raw_magnitude();
        if magnitude == 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(truncated(self.x / magnitude), truncated(self.y / magnitude))
    }

    pub fn scale(&self, scalar: f64) -> Vec2 {
        Vec2::new(truncated(self.x * scalar), truncated(self.y * scalar))
    }

    /// Sums any number of vectors with a single truncation at the end.
    pub fn sum(vectors: &[Vec2]) -> Vec2 {
        let mut x = 0.0;
        let mut y = 0.0;
        for v in vectors {
            x += v.x;
            y += v.y;
        }
        Vec2::new(truncated(x), truncated(y))
    }

    fn dot(a: Vec2, b: Vec2) -> f64 {
        a.x * b.x + a.y * b.y
    }

    /// Unsigned angle between two vectors in radians; 0 when either vector
    /// has no magnitude.
    pub fn angle(a: Vec2, b: Vec2) -> f64 {
        let magnitudes = a.raw_magnitude() * b.raw_magnitude();
        if magnitudes == 0.0 {
            return 0.0;
        }
        (Self::dot(a, b) / magnitudes).clamp(-1.0, 1.0).acos()
    }

    /// Rotates the normalized form of `origin` by `angle_rad`, returning a
    /// unit vector.
    pub fn at_angle(origin: Vec2, angle_rad: f64) -> Vec2 {
        let normalized = origin.normalized();
        let sin = angle_rad.sin();
        let cos = angle_rad.cos();
        Vec2::new(
            normalized.x * cos - normalized.y * sin,
            normalized.x * sin + normalized.y * cos,
        )
        .normalized()
    }

    /// Limits how far `target` may deviate from `reference`.
    ///
    /// When the angle between the two exceeds `max_angle_rad`, the result is
    /// `reference` rotated by the maximum angle toward `target` (on the
    /// shorter side), rescaled to `target`'s magnitude. Degenerate inputs
    /// pass `target` through unchanged.
    pub fn clamp_vector_angle(reference: Vec2, target: Vec2, max_angle_rad: f64) -> Vec2 {
        let reference_magnitude = reference.magnitude();
        let target_magnitude = target.magnitude();
        if reference_magnitude == 0.0 || target_magnitude == 0.0 {
            return target;
        }

        let reference_n = reference.normalized();
        let target_n = target.normalized();

        let dot = Self::dot(reference_n, target_n).clamp(-1.0, 1.0);
        let angle = dot.acos();
        if angle <= max_angle_rad {
            return target;
        }

        // z-component of the 2D cross product picks the rotation side.
        let cross = reference_n.x * target_n.y - reference_n.y * target_n.x;
        let sign = if cross >= 0.0 { 1.0 } else { -1.0 };

        let clamped_angle = sign * max_angle_rad;
        let cos = clamped_angle.cos();
        let sin = clamped_angle.sin();
        let constrained = Vec2::new(
            reference_n.x * cos - reference_n.y * sin,
            reference_n.x * sin + reference_n.y * cos,
        );

        constrained.scale(target_magnitude)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(truncated(self.x + other.x), truncated(self.y + other.y))
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(truncated(self.x - other.x), truncated(self.y - other.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn zero_vector_has_no_magnitude_or_direction() {
        assert_eq!(Vec2::ZERO.magnitude(), 0.0);
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    }

    #[test]
    fn magnitude_is_truncated_to_eight_decimals() {
        // sqrt(2) = 1.4142135623..., truncated rather than rounded
        assert_eq!(Vec2::new(1.0, 1.0).magnitude(), 1.41421356);
    }

    #[test]
    fn normalized_produces_truncated_unit_components() {
        let unit = Vec2::new(10.0, 10.0).normalized();
        assert_eq!(unit, Vec2::new(0.70710678, 0.70710678));
    }

    #[test]
    fn sum_truncates_once_over_all_terms() {
        let total = Vec2::sum(&[
            Vec2::new(1.5, -0.5),
            Vec2::new(2.25, 0.75),
            Vec2::new(-1.0, 1.0),
        ]);
        assert_eq!(total, Vec2::new(2.75, 1.25));
    }

    #[test]
    fn angle_of_perpendicular_vectors_is_right() {
        let angle = Vec2::angle(Vec2::new(1.0, 0.0), Vec2::new(0.0, 3.0));
        assert!((angle - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn angle_with_degenerate_input_is_zero() {
        assert_eq!(Vec2::angle(Vec2::ZERO, Vec2::new(1.0, 0.0)), 0.0);
        assert_eq!(Vec2::angle(Vec2::new(1.0, 0.0), Vec2::ZERO), 0.0);
    }

    #[test]
    fn at_angle_rotates_counterclockwise() {
        let rotated = Vec2::at_angle(Vec2::new(2.0, 0.0), FRAC_PI_2);
        assert_eq!(rotated, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn clamp_passes_target_through_when_within_limit() {
        let target = Vec2::new(0.9, 0.1);
        let result = Vec2::clamp_vector_angle(Vec2::new(1.0, 0.0), target, FRAC_PI_2);
        assert_eq!(result, target);
    }

    #[test]
    fn clamp_limits_rotation_to_max_angle() {
        let result =
            Vec2::clamp_vector_angle(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), FRAC_PI_4);
        assert_eq!(result, Vec2::new(0.70710678, 0.70710678));
    }

    #[test]
    fn clamp_rotates_toward_the_shorter_side() {
        let result =
            Vec2::clamp_vector_angle(Vec2::new(1.0, 0.0), Vec2::new(0.0, -1.0), FRAC_PI_4);
        assert_eq!(result, Vec2::new(0.70710678, -0.70710678));
    }

    #[test]
    fn clamp_with_degenerate_reference_passes_target_through() {
        let target = Vec2::new(0.0, -5.0);
        assert_eq!(Vec2::clamp_vector_angle(Vec2::ZERO, target, FRAC_PI_4), target);
    }

    #[test]
    fn clamp_preserves_target_magnitude() {
        let result =
            Vec2::clamp_vector_angle(Vec2::new(1.0, 0.0), Vec2::new(0.0, 4.0), FRAC_PI_4);
        assert!((result.magnitude() - 4.0).abs() < 1e-6);
    }
}
