//=========================================================================
// Camera
//=========================================================================
//
// Translates world coordinates into screen coordinates around a focus.
//
// Architecture:
//   GameObject ── owns ──> FocusAnchor (Arc<RwLock<Point>>)
//                               │
//   Camera ─── holds ──> Weak<RwLock<Point>>
//
// The camera never keeps its focus alive: once the owning object drops
// its anchor, the camera falls back to the origin and forgets the dead
// reference.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Arc, PoisonError, RwLock, Weak};

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::math::{acos_degrees, Point, Shape};

//=== FocusAnchor =========================================================

/// Shared, lockable position a camera can follow.
///
/// Owned by whatever is being tracked; the object writes its current
/// position here during its update.
#[derive(Debug, Clone, Default)]
pub struct FocusAnchor(Arc<RwLock<Point>>);

impl FocusAnchor {
    pub fn new(point: Point) -> Self {
        Self(Arc::new(RwLock::new(point)))
    }

    pub fn get(&self) -> Point {
        *self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, point: Point) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = point;
    }

    fn downgrade(&self) -> Weak<RwLock<Point>> {
        Arc::downgrade(&self.0)
    }
}

//=== ViewAngles ==========================================================

/// Angles the camera views the world from, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewAngles {
    pub rotation: f64,
    pub turn: f64,
    pub tilt: f64,
}

//=== Camera ==============================================================

#[derive(Debug)]
pub struct Camera {
    width: f64,
    height: f64,
    focus: Option<Weak<RwLock<Point>>>,
    view_angles: ViewAngles,
    /// Reserved for perspective scaling.
    pub distance_from_plane: f64,
    changed: bool,
}

impl Camera {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            focus: None,
            view_angles: ViewAngles::default(),
            distance_from_plane: 1.0,
            changed: false,
        }
    }

    //--- Viewport ---------------------------------------------------------

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.changed = true;
    }

    //--- Focus ------------------------------------------------------------

    pub fn set_focus(&mut self, anchor: &FocusAnchor) {
        self.focus = Some(anchor.downgrade());
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    /// `true` while the focused anchor is still alive.
    pub fn has_focus(&self) -> bool {
        self.focus
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Current focus position, dropping the reference if its owner is gone.
    fn focus_point(&mut self) -> Option<Point> {
        let weak = self.focus.as_ref()?;
        match weak.upgrade() {
            Some(anchor) => Some(*anchor.read().unwrap_or_else(PoisonError::into_inner)),
            None => {
                trace!(target: "little::game", "Camera focus dropped, clearing");
                self.focus = None;
                None
            }
        }
    }

    //--- Translation ------------------------------------------------------

    /// World → screen offset: the focus sits in the middle of the view.
    pub fn offset(&mut self) -> Point {
        let (width, height) = (self.width, self.height);
        self.focus_point()
            .map(|focus| focus.center_offset(width, height, 0.0))
            .unwrap_or(Point::ORIGIN)
    }

    pub fn translate(&mut self, point: &Point) -> Point {
        *point - self.offset()
    }

    pub fn translate_all(&mut self, points: &[Point]) -> Vec<Point> {
        let offset = self.offset();
        points.iter().map(|p| *p - offset).collect()
    }

    /// Shape as seen through the current view rotation and turn around
    /// the focus.
    pub fn transform_shape(&mut self, shape: &Shape) -> Shape {
        let center = self.focus_point().unwrap_or(Point::ORIGIN);
        shape.translated(self.view_angles.rotation, self.view_angles.turn, &center)
    }

    //--- View Angles ------------------------------------------------------

    pub fn view_angles(&self) -> ViewAngles {
        self.view_angles
    }

    /// Sets tilt and turn; returns the derived rotation.
    pub fn tilt_turn(&mut self, tilt: f64, turn: f64) -> f64 {
        let corner = unit_corner().tilt(tilt, &Point::ORIGIN).turn(turn, &Point::ORIGIN);
        let rotation = acos_degrees(corner.distance_zy(&Point::ORIGIN) - 1.0);

        self.view_angles = ViewAngles { rotation, turn, tilt };
        self.changed = true;
        rotation
    }

    /// Sets turn and rotation; returns the derived tilt.
    pub fn turn_rotate(&mut self, turn: f64, rotation: f64) -> f64 {
        let corner = unit_corner().turn(turn, &Point::ORIGIN).rotate(rotation, &Point::ORIGIN);
        let tilt = acos_degrees(corner.distance_xz(&Point::ORIGIN) - 1.0);

        self.view_angles = ViewAngles { rotation, turn, tilt };
        self.changed = true;
        tilt
    }

    /// Sets tilt and rotation; returns the derived turn.
    pub fn tilt_rotate(&mut self, tilt: f64, rotation: f64) -> f64 {
        let corner = unit_corner().rotate(rotation, &Point::ORIGIN).tilt(tilt, &Point::ORIGIN);
        let turn = acos_degrees(corner.distance_xy(&Point::ORIGIN) - 1.0);

        self.view_angles = ViewAngles { rotation, turn, tilt };
        self.changed = true;
        turn
    }

    //--- Change Tracking --------------------------------------------------

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Returns the changed flag and resets it.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}

fn unit_corner() -> Point {
    Point::new(1.0, 1.0, 1.0)
}

//=========================================================================
// Unit Tests
//=========================================================================
