//=========================================================================
// Draw Primitives
//=========================================================================
//
// Colors, per-call draw options and the recorded draw commands.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::{Point, Shape};

//=== Color ===============================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const NONE: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

//=== DrawOptions =========================================================

/// Per-call drawing options.
///
/// Defaults: white, camera-relative, unit scale, rotation centered on
/// the image, drawn at the current group order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOptions {
    pub color: Color,
    /// Draw in raw screen coordinates instead of through the camera.
    pub do_not_focus: bool,
    /// Overrides the current group order.
    pub order: Option<i32>,
    pub scale: (f64, f64),
    /// Clockwise from north, in degrees.
    pub rotate_angle: Option<f64>,
    /// Rotation origin relative to the image size.
    pub rotate_center: (f64, f64),
    /// Images normally use the point's z as order; this turns that off.
    pub do_not_use_z: bool,
    pub shape: Option<Shape>,
    /// Derive the scale from z and the shape's depth.
    pub scale_on_shape: bool,
    /// Text alignment relative to the text extent.
    pub alignment: Option<(f64, f64)>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            do_not_focus: false,
            order: None,
            scale: (1.0, 1.0),
            rotate_angle: None,
            rotate_center: (0.5, 0.5),
            do_not_use_z: false,
            shape: None,
            scale_on_shape: false,
            alignment: None,
        }
    }
}

impl DrawOptions {
    pub fn color(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn unfocused(mut self) -> Self {
        self.do_not_focus = true;
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_scale(mut self, x: f64, y: f64) -> Self {
        self.scale = (x, y);
        self
    }

    pub fn with_rotation(mut self, angle: f64, center: (f64, f64)) -> Self {
        self.rotate_angle = Some(angle);
        self.rotate_center = center;
        self
    }

    pub fn without_z(mut self) -> Self {
        self.do_not_use_z = true;
        self
    }

    pub fn scaled_on(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self.scale_on_shape = true;
        self
    }

    pub fn with_alignment(mut self, x: f64, y: f64) -> Self {
        self.alignment = Some((x, y));
        self
    }
}

//=== DrawCommand =========================================================

/// One recorded draw call, already in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        color: Color,
        order: i32,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        color: Color,
        order: i32,
    },
    Pixel {
        at: Point,
        color: Color,
        order: i32,
    },
    Polyline {
        points: Vec<Point>,
        color: Color,
        order: i32,
    },
    Image {
        image: String,
        at: Point,
        scale: (f64, f64),
        /// Angle and relative origin.
        rotation: Option<(f64, (f64, f64))>,
        color: Color,
        order: i32,
    },
    Text {
        text: String,
        font: String,
        at: Point,
        scale: (f64, f64),
        alignment: Option<(f64, f64)>,
        color: Color,
        order: i32,
    },
}

impl DrawCommand {
    pub fn order(&self) -> i32 {
        match self {
            Self::Line { order, .. }
            | Self::Rect { order, .. }
            | Self::Pixel { order, .. }
            | Self::Polyline { order, .. }
            | Self::Image { order, .. }
            | Self::Text { order, .. } => *order,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Line { color, .. }
            | Self::Rect { color, .. }
            | Self::Pixel { color, .. }
            | Self::Polyline { color, .. }
            | Self::Image { color, .. }
            | Self::Text { color, .. } => *color,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
