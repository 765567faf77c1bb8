//! Mathematical primitives for 2D navigation.
//!
//! Functions for angle normalization and angular arithmetic.

use std::f64::consts::PI;

/// Normalize angle to [-π, π].
///
/// # Example
/// ```
/// use patha_nav::core::math::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-9);
/// assert!((normalize_angle(-3.0 * PI) - (-PI)).abs() < 1e-9);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a < -PI {
        a += 2.0 * PI;
    }
    a
}

/// Shortest angular difference from angle `a` to angle `b`.
///
/// Returns the signed angle to add to `a` to reach `b`, taking the
/// shortest path around the circle.
#[inline]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    normalize_angle(b - a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_angle_zero() {
        assert_relative_eq!(normalize_angle(0.0), 0.0);
    }

    #[test]
    fn test_normalize_angle_pi() {
        assert_relative_eq!(normalize_angle(PI), PI);
        assert_relative_eq!(normalize_angle(-PI), -PI);
    }

    #[test]
    fn test_normalize_angle_wrap_positive() {
        assert_relative_eq!(normalize_angle(2.0 * PI), 0.0, epsilon = 1e-9);
        assert_relative_eq!(normalize_angle(3.0 * PI), PI, epsilon = 1e-9);
    }

    #[test]
    fn test_normalize_angle_wrap_negative() {
        assert_relative_eq!(normalize_angle(-2.0 * PI), 0.0, epsilon = 1e-9);
        assert_relative_eq!(normalize_angle(-3.0 * PI), -PI, epsilon = 1e-9);
    }

    #[test]
    fn test_normalize_angle_just_beyond_boundary() {
        let result = normalize_angle(PI + 0.001);
        assert!(result < 0.0, "Should wrap to negative: {}", result);
        assert_relative_eq!(result, -PI + 0.001, epsilon = 1e-9);

        let result = normalize_angle(-PI - 0.001);
        assert!(result > 0.0, "Should wrap to positive: {}", result);
        assert_relative_eq!(result, PI - 0.001, epsilon = 1e-9);
    }

    #[test]
    fn test_angle_diff_same_sign() {
        assert_relative_eq!(angle_diff(0.0, PI / 2.0), PI / 2.0);
        assert_relative_eq!(angle_diff(PI / 2.0, 0.0), -PI / 2.0);
    }

    #[test]
    fn test_angle_diff_crossing_pi() {
        assert_relative_eq!(angle_diff(PI - 0.1, -PI + 0.1), 0.2, epsilon = 1e-9);
        assert_relative_eq!(angle_diff(-PI + 0.1, PI - 0.1), -0.2, epsilon = 1e-9);
    }
}
