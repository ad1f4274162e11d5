//=========================================================================
// Point
//=========================================================================
//
// Three-component position with plane rotations around arbitrary
// centers.
//
//   rotate: xy plane (z untouched)
//   turn:   xz plane (y untouched)
//   tilt:   zy plane (x untouched)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::ops::{Add, AddAssign, Deref, DerefMut, Neg, Sub, SubAssign};

use glam::{DMat3, DVec3, Vec3Swizzles};

//=== Internal Dependencies ===============================================

use super::normalize_degrees;

//=== Point ===============================================================

/// A point (or vector) in engine space, backed by a [`DVec3`].
///
/// Value type: every transform returns a new point and leaves `self`
/// untouched. Components are reachable as `p.x`, `p.y`, `p.z`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point(DVec3);

impl Point {
    /// The origin `(0, 0, 0)`.
    pub const ORIGIN: Self = Self(DVec3::ZERO);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Point on the screen plane (`z = 0`).
    pub const fn xy(x: f64, y: f64) -> Self {
        Self(DVec3::new(x, y, 0.0))
    }

    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    //--- Arithmetic -------------------------------------------------------

    /// Returns `self - other` as a new point.
    pub fn subtract(&self, other: &Point) -> Point {
        *self - *other
    }

    /// Offset of this point from the center of something `width` by
    /// `height` by `depth` large.
    ///
    /// The camera uses this to place its focus at the middle of the view.
    pub fn center_offset(&self, width: f64, height: f64, depth: f64) -> Point {
        Point(self.0 - DVec3::new(width, height, depth) / 2.0)
    }

    /// Strictly above and to the left of `other` (smaller x and y).
    pub fn is_above_left_of(&self, other: &Point) -> bool {
        self.x < other.x && self.y < other.y
    }

    /// Strictly below and to the right of `other` (larger x and y).
    pub fn is_below_right_of(&self, other: &Point) -> bool {
        self.x > other.x && self.y > other.y
    }

    /// Component-wise minimum.
    pub fn min(&self, other: &Point) -> Point {
        Point(self.0.min(other.0))
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Point) -> Point {
        Point(self.0.max(other.0))
    }

    /// Halfway between `self` and `other`.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point((self.0 + other.0) * 0.5)
    }

    //--- Plane Rotations --------------------------------------------------

    /// Rotates around `center` in the xy plane.
    ///
    /// Positive angles run clockwise on a y-down screen.
    pub fn rotate(&self, angle: f64, center: &Point) -> Point {
        self.rotated_about(angle, center, DMat3::from_rotation_z)
    }

    /// Rotates around `center` in the xz plane; a quarter turn moves +x
    /// into +z.
    pub fn turn(&self, angle: f64, center: &Point) -> Point {
        self.rotated_about(angle, center, |radians| DMat3::from_rotation_y(-radians))
    }

    /// Rotates around `center` in the zy plane ("up, back and around").
    pub fn tilt(&self, angle: f64, center: &Point) -> Point {
        self.rotated_about(angle, center, DMat3::from_rotation_x)
    }

    /// Composite transform: rotate, then turn, then tilt.
    ///
    /// Zero angles are skipped, so passing two non-zero angles chains
    /// exactly those two rotations.
    pub fn transform(&self, rotation: f64, tilt: f64, turn: f64, center: &Point) -> Point {
        self.rotate(rotation, center)
            .turn(turn, center)
            .tilt(tilt, center)
    }

    fn rotated_about(&self, angle: f64, center: &Point, matrix: impl Fn(f64) -> DMat3) -> Point {
        let angle = normalize_degrees(angle);
        if angle == 0.0 {
            return *self;
        }
        Point(matrix(angle.to_radians()) * (self.0 - center.0) + center.0)
    }

    //--- Distances --------------------------------------------------------

    pub fn distance_3d(&self, other: &Point) -> f64 {
        self.0.distance(other.0)
    }

    /// Flat distance across the screen.
    pub fn distance_xy(&self, other: &Point) -> f64 {
        self.0.xy().distance(other.0.xy())
    }

    pub fn distance_xz(&self, other: &Point) -> f64 {
        self.0.xz().distance(other.0.xz())
    }

    pub fn distance_zy(&self, other: &Point) -> f64 {
        self.0.zy().distance(other.0.zy())
    }

    /// Distance from the origin.
    pub fn length(&self) -> f64 {
        self.0.length()
    }

    /// Direction of `self` as seen from `from`, clockwise from screen
    /// north, in `[0, 360)`.
    pub fn heading_xy(&self, from: &Point) -> f64 {
        let d = self.0 - from.0;
        normalize_degrees(d.x.atan2(-d.y).to_degrees())
    }
}

//--- Vector Access -------------------------------------------------------

impl Deref for Point {
    type Target = DVec3;

    fn deref(&self) -> &DVec3 {
        &self.0
    }
}

impl DerefMut for Point {
    fn deref_mut(&mut self) -> &mut DVec3 {
        &mut self.0
    }
}

impl From<DVec3> for Point {
    fn from(v: DVec3) -> Self {
        Point(v)
    }
}

impl From<Point> for DVec3 {
    fn from(p: Point) -> Self {
        p.0
    }
}

//--- Operators -----------------------------------------------------------

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point(self.0 + rhs.0)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point(self.0 - rhs.0)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.0 -= rhs.0;
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point(-self.0)
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Point::new(x, y, z)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::xy(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {}, {})", self.x, self.y, self.z)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
