//=========================================================================
// Shape
//=========================================================================
//
// Axis-aligned box: a position, its dimensions and an optional local
// orientation.
//
// Layout (y-down screen, z toward the viewer):
//
//   head  = point.y            front = point.z
//   feet  = point.y + height   back  = point.z - depth
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{acos_degrees, Point};

//=== Corner ==============================================================

/// The eight corners of a shape, head first, clockwise from top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    HeadTopLeft,
    HeadTopRight,
    HeadBottomRight,
    HeadBottomLeft,
    FeetTopLeft,
    FeetTopRight,
    FeetBottomRight,
    FeetBottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::HeadTopLeft,
        Corner::HeadTopRight,
        Corner::HeadBottomRight,
        Corner::HeadBottomLeft,
        Corner::FeetTopLeft,
        Corner::FeetTopRight,
        Corner::FeetBottomRight,
        Corner::FeetBottomLeft,
    ];
}

//=== Shape ===============================================================

/// Bounding box used for drawing, focus and simple collision.
///
/// Angles are stored as points: `x` = rotation, `y` = turn, `z` = tilt.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    pub point: Point,
    pub dimensions: Point,
    local_angles: Point,
    view_angles: Point,
    local_point: Point,
}

impl Shape {
    //--- Construction -----------------------------------------------------

    pub fn new(point: Point, dimensions: Point) -> Self {
        Self {
            point,
            dimensions,
            local_angles: Point::ORIGIN,
            view_angles: Point::ORIGIN,
            local_point: point,
        }
    }

    pub fn from_components(x: f64, y: f64, z: f64, width: f64, height: f64, depth: f64) -> Self {
        Self::new(Point::new(x, y, z), Point::new(width, height, depth))
    }

    pub fn with_local_transform(point: Point, dimensions: Point, rotation: f64, turn: f64) -> Self {
        let mut shape = Self::new(point, dimensions);
        shape.set_local_transform(rotation, turn);
        shape
    }

    //--- Dimensions -------------------------------------------------------

    pub fn width(&self) -> f64 {
        self.dimensions.x
    }

    pub fn height(&self) -> f64 {
        self.dimensions.y
    }

    pub fn depth(&self) -> f64 {
        self.dimensions.z
    }

    /// 2 for flat shapes (no depth), 3 otherwise.
    pub fn dimensionality(&self) -> u8 {
        if self.depth() == 0.0 {
            2
        } else {
            3
        }
    }

    //--- Reference Points -------------------------------------------------

    pub fn center(&self) -> Point {
        Point::new(
            self.point.x + self.width() / 2.0,
            self.point.y + self.height() / 2.0,
            self.point.z - self.depth() / 2.0,
        )
    }

    /// Middle of the top face.
    pub fn center_head(&self) -> Point {
        Point::new(
            self.point.x + self.width() / 2.0,
            self.point.y,
            self.point.z - self.depth() / 2.0,
        )
    }

    /// Middle of the bottom face.
    pub fn center_feet(&self) -> Point {
        Point::new(
            self.point.x + self.width() / 2.0,
            self.point.y + self.height(),
            self.point.z - self.depth() / 2.0,
        )
    }

    pub fn corner(&self, corner: Corner) -> Point {
        let (x, y, z) = (self.point.x, self.point.y, self.point.z);
        let (right, feet, back) = (x + self.width(), y + self.height(), z - self.depth());

        match corner {
            Corner::HeadTopLeft => Point::new(x, y, z),
            Corner::HeadTopRight => Point::new(right, y, z),
            Corner::HeadBottomRight => Point::new(right, y, back),
            Corner::HeadBottomLeft => Point::new(x, y, back),
            Corner::FeetTopLeft => Point::new(x, feet, z),
            Corner::FeetTopRight => Point::new(right, feet, z),
            Corner::FeetBottomRight => Point::new(right, feet, back),
            Corner::FeetBottomLeft => Point::new(x, feet, back),
        }
    }

    //--- Hit Testing ------------------------------------------------------

    /// Strict interior test on the screen plane.
    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        x > self.point.x
            && x < self.point.x + self.width()
            && y > self.point.y
            && y < self.point.y + self.height()
    }

    /// Axis-aligned overlap. Depth only counts when both shapes are 3D.
    pub fn overlaps(&self, other: &Shape) -> bool {
        let spans = |a0: f64, a1: f64, b0: f64, b1: f64| a0 < b1 && b0 < a1;

        let xy = spans(
            self.point.x,
            self.point.x + self.width(),
            other.point.x,
            other.point.x + other.width(),
        ) && spans(
            self.point.y,
            self.point.y + self.height(),
            other.point.y,
            other.point.y + other.height(),
        );

        if !xy || self.dimensionality() == 2 || other.dimensionality() == 2 {
            return xy;
        }

        spans(
            self.point.z - self.depth(),
            self.point.z,
            other.point.z - other.depth(),
            other.point.z,
        )
    }

    //--- Orientation ------------------------------------------------------

    /// Rotation, turn and derived tilt of the shape itself.
    pub fn local_angles(&self) -> Point {
        self.local_angles
    }

    /// Angles the shape is currently seen from.
    pub fn view_angles(&self) -> Point {
        self.view_angles
    }

    /// Position after applying the local rotation and turn around the
    /// shape's center.
    pub fn local_point(&self) -> Point {
        self.local_point
    }

    /// Sets the local rotation and turn; the tilt follows from them.
    ///
    /// Resets the view angles to the new local angles.
    pub fn set_local_transform(&mut self, rotation: f64, turn: f64) {
        let unit = Point::new(1.0, 0.0, 0.0)
            .turn(turn, &Point::ORIGIN)
            .rotate(rotation, &Point::ORIGIN);
        let tilt = acos_degrees(unit.distance_xz(&Point::ORIGIN));

        self.local_angles = Point::new(rotation, turn, tilt);
        self.local_point = self.point.transform(rotation, 0.0, turn, &self.center());
        self.view_angles = self.local_angles;
    }

    /// View angles become the local angles plus the given camera angles.
    pub fn set_view_angles(&mut self, rotation: f64, turn: f64, tilt: f64) {
        self.view_angles = self.local_angles + Point::new(rotation, turn, tilt);
    }

    /// Copy of this shape moved by `rotation`/`turn` around `center`.
    ///
    /// Dimensions and local orientation carry over.
    pub fn translated(&self, rotation: f64, turn: f64, center: &Point) -> Shape {
        let mut shape = Shape::new(
            self.point.transform(rotation, 0.0, turn, center),
            self.dimensions,
        );
        shape.set_local_transform(self.local_angles.x, self.local_angles.y);
        shape
    }

    //--- Movement ---------------------------------------------------------

    pub fn set_position(&mut self, point: Point) {
        self.point = point;
    }

    pub fn move_by(&mut self, offset: Point) {
        self.point += offset;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
