//=========================================================================
// Math
//=========================================================================
//
// Points, paths and shapes in a loosely 3D space.
//
// Conventions:
//   - x grows to the right, y grows downward (screen space), z grows
//     toward the viewer
//   - angles are degrees, normalised to [0, 360) before use
//   - `rotate` works in the xy plane, `turn` in xz, `tilt` in zy
//
//=========================================================================

//=== Module Declarations =================================================

mod path;
mod point;
mod shape;

//=== Public API ==========================================================

pub use path::Path;
pub use point::Point;
pub use shape::{Corner, Shape};

//=== Angle Helpers =======================================================

/// Wraps an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// `acos` in degrees with the input clamped to `[-1, 1]`.
#[inline]
pub(crate) fn acos_degrees(value: f64) -> f64 {
    value.clamp(-1.0, 1.0).acos().to_degrees()
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalize_wraps_negative_and_large_angles() {
        assert_abs_diff_eq!(normalize_degrees(-90.0), 270.0);
        assert_abs_diff_eq!(normalize_degrees(720.0), 0.0);
        assert_abs_diff_eq!(normalize_degrees(405.0), 45.0);
        assert_abs_diff_eq!(normalize_degrees(359.5), 359.5);
    }

    #[test]
    fn normalize_never_returns_full_turn() {
        let angle = normalize_degrees(-1e-15);
        assert!(angle < 360.0);
    }

    #[test]
    fn acos_clamps_out_of_range_input() {
        assert_abs_diff_eq!(acos_degrees(1.5), 0.0);
        assert_abs_diff_eq!(acos_degrees(-3.0), 180.0);
        assert_abs_diff_eq!(acos_degrees(0.0), 90.0, epsilon = 1e-12);
    }
}
