//=========================================================================
// Graphics
//=========================================================================
//
// Per-frame draw recorder.
//
// Frame lifecycle:
//   begin_frame(camera) → start_group / draw calls / end_group → finish()
//
// The camera offset is captured once in `begin_frame`, so every call in
// a frame uses the same world → screen translation.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::draw::{DrawCommand, DrawOptions};
use crate::core::camera::Camera;
use crate::core::math::{Path, Point};

//=== Constants ===========================================================

/// Order used outside of any group.
pub const DEFAULT_ORDER: i32 = 0;

//=== Frame ===============================================================

/// Draw commands recorded for one frame, in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands sorted by order; ties keep submission order.
    pub fn in_draw_order(&self) -> Vec<&DrawCommand> {
        let mut sorted: Vec<&DrawCommand> = self.commands.iter().collect();
        sorted.sort_by_key(|cmd| cmd.order());
        sorted
    }
}

//=== Graphics ============================================================

#[derive(Debug)]
pub struct Graphics {
    offset: Point,
    order: i32,
    commands: Vec<DrawCommand>,
}

impl Graphics {
    pub fn new() -> Self {
        Self {
            offset: Point::ORIGIN,
            order: DEFAULT_ORDER,
            commands: Vec::new(),
        }
    }

    //--- Frame Control ----------------------------------------------------

    /// Starts a new frame through `camera`, dropping anything unfinished.
    pub fn begin_frame(&mut self, camera: &mut Camera) {
        self.offset = camera.offset();
        self.order = DEFAULT_ORDER;
        self.commands.clear();
    }

    /// Hands over the recorded commands and resets for the next frame.
    pub fn finish(&mut self) -> Frame {
        self.order = DEFAULT_ORDER;
        Frame {
            commands: std::mem::take(&mut self.commands),
        }
    }

    pub fn start_group(&mut self, order: i32) {
        self.order = order;
    }

    /// Returns to the default order, but only if `order` is the group
    /// currently open.
    pub fn end_group(&mut self, order: i32) {
        if self.order == order {
            self.order = DEFAULT_ORDER;
        }
    }

    pub fn current_order(&self) -> i32 {
        self.order
    }

    //--- Draw Calls -------------------------------------------------------

    pub fn line(&mut self, from: &Point, to: &Point, options: &DrawOptions) {
        self.commands.push(DrawCommand::Line {
            from: self.screen(from, options),
            to: self.screen(to, options),
            color: options.color,
            order: self.order_for(options),
        });
    }

    pub fn rect(&mut self, origin: &Point, width: f64, height: f64, options: &DrawOptions) {
        self.commands.push(DrawCommand::Rect {
            origin: self.screen(origin, options),
            width,
            height,
            color: options.color,
            order: self.order_for(options),
        });
    }

    pub fn pixel(&mut self, at: &Point, options: &DrawOptions) {
        self.commands.push(DrawCommand::Pixel {
            at: self.screen(at, options),
            color: options.color,
            order: self.order_for(options),
        });
    }

    pub fn pixels(&mut self, points: &[Point], options: &DrawOptions) {
        for point in points {
            self.pixel(point, options);
        }
    }

    /// Connected line through every point of `path`.
    pub fn path(&mut self, path: &Path, options: &DrawOptions) {
        if path.is_empty() {
            return;
        }
        let points = path.iter().map(|p| self.screen(p, options)).collect();
        self.commands.push(DrawCommand::Polyline {
            points,
            color: options.color,
            order: self.order_for(options),
        });
    }

    /// Draws the named image at `at`.
    ///
    /// The image order is the point's z (rounded) unless `do_not_use_z`
    /// is set.
    pub fn image(&mut self, image: &str, at: &Point, options: &DrawOptions) {
        let order = if options.do_not_use_z {
            self.order_for(options)
        } else {
            at.z.round() as i32
        };

        let scale = match (&options.shape, options.scale_on_shape) {
            (Some(shape), true) => {
                let s = depth_scale(order, shape.depth());
                (s, s)
            }
            _ => options.scale,
        };

        self.commands.push(DrawCommand::Image {
            image: image.to_owned(),
            at: self.screen(at, options),
            scale,
            rotation: options.rotate_angle.map(|angle| (angle, options.rotate_center)),
            color: options.color,
            order,
        });
    }

    pub fn text(&mut self, text: &str, font: &str, at: &Point, options: &DrawOptions) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            font: font.to_owned(),
            at: self.screen(at, options),
            scale: options.scale,
            alignment: options.alignment,
            color: options.color,
            order: self.order_for(options),
        });
    }

    //--- Internal Helpers -------------------------------------------------

    fn screen(&self, point: &Point, options: &DrawOptions) -> Point {
        if options.do_not_focus {
            *point
        } else {
            *point - self.offset
        }
    }

    fn order_for(&self, options: &DrawOptions) -> i32 {
        options.order.unwrap_or(self.order)
    }
}

impl Default for Graphics {
    fn default() -> Self {
        Self::new()
    }
}

/// Scale for an image at draw order `order` inside a shape `depth` deep.
///
/// Far behind the shape shrinks logarithmically, beyond its depth grows
/// linearly, anything in between draws at 1.
fn depth_scale(order: i32, depth: f64) -> f64 {
    if depth <= 0.0 {
        return 1.0;
    }
    let z = f64::from(order) + 1.0;
    if z < -2.0 {
        1.0 / ((z / depth).abs() + 2.0).log2()
    } else if z > depth {
        z / depth
    } else {
        1.0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::FocusAnchor;
    use crate::core::graphics::Color;
    use crate::core::math::Shape;
    use approx::assert_relative_eq;

    fn focused_frame() -> (Graphics, FocusAnchor) {
        let mut camera = Camera::new(100.0, 100.0);
        let anchor = FocusAnchor::new(Point::xy(150.0, 50.0));
        camera.set_focus(&anchor);

        let mut gfx = Graphics::new();
        gfx.begin_frame(&mut camera);
        (gfx, anchor)
    }

    #[test]
    fn draws_through_camera_offset() {
        let (mut gfx, _anchor) = focused_frame();
        gfx.pixel(&Point::xy(150.0, 50.0), &DrawOptions::default());

        let frame = gfx.finish();
        match &frame.commands()[0] {
            DrawCommand::Pixel { at, .. } => assert_eq!(*at, Point::xy(50.0, 50.0)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn do_not_focus_keeps_raw_coordinates() {
        let (mut gfx, _anchor) = focused_frame();
        gfx.rect(&Point::xy(5.0, 5.0), 10.0, 10.0, &DrawOptions::default().unfocused());

        let frame = gfx.finish();
        match &frame.commands()[0] {
            DrawCommand::Rect { origin, .. } => assert_eq!(*origin, Point::xy(5.0, 5.0)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn group_order_applies_until_matching_end() {
        let mut gfx = Graphics::new();
        gfx.start_group(3);
        gfx.pixel(&Point::ORIGIN, &DrawOptions::default());

        // ending a different group leaves the current order alone
        gfx.end_group(5);
        assert_eq!(gfx.current_order(), 3);

        gfx.end_group(3);
        assert_eq!(gfx.current_order(), DEFAULT_ORDER);
        gfx.pixel(&Point::ORIGIN, &DrawOptions::default().with_order(9));

        let orders: Vec<i32> = gfx.finish().commands().iter().map(|c| c.order()).collect();
        assert_eq!(orders, vec![3, 9]);
    }

    #[test]
    fn image_uses_z_unless_disabled() {
        let mut gfx = Graphics::new();
        gfx.start_group(2);
        gfx.image("hero", &Point::new(0.0, 0.0, 6.4), &DrawOptions::default());
        gfx.image("hero", &Point::new(0.0, 0.0, 6.4), &DrawOptions::default().without_z());

        let orders: Vec<i32> = gfx.finish().commands().iter().map(|c| c.order()).collect();
        assert_eq!(orders, vec![6, 2]);
    }

    #[test]
    fn image_scale_on_shape() {
        let shape = Shape::from_components(0.0, 0.0, 0.0, 1.0, 1.0, 2.0);
        let mut gfx = Graphics::new();
        gfx.image("far", &Point::new(0.0, 0.0, 5.0), &DrawOptions::default().scaled_on(shape));

        match &gfx.finish().commands()[0] {
            DrawCommand::Image { scale, .. } => {
                assert_relative_eq!(scale.0, 3.0);
                assert_relative_eq!(scale.1, 3.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn depth_scale_regions() {
        assert_relative_eq!(depth_scale(0, 0.0), 1.0);
        assert_relative_eq!(depth_scale(0, 4.0), 1.0);
        assert_relative_eq!(depth_scale(7, 4.0), 2.0);
        // z = -7 → |-7/1| + 2 = 9
        assert_relative_eq!(depth_scale(-8, 1.0), 1.0 / 9f64.log2());
    }

    #[test]
    fn path_becomes_polyline_and_empty_path_is_skipped() {
        let mut gfx = Graphics::new();
        gfx.path(&Path::new(), &DrawOptions::default());
        gfx.path(&Path::from_nums(&[0.0, 0.0, 3.0, 4.0]), &DrawOptions::color(Color::GREEN));

        let frame = gfx.finish();
        assert_eq!(frame.len(), 1);
        match &frame.commands()[0] {
            DrawCommand::Polyline { points, color, .. } => {
                assert_eq!(points.len(), 2);
                assert_eq!(*color, Color::GREEN);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn in_draw_order_is_stable() {
        let mut gfx = Graphics::new();
        gfx.text("b", "mono", &Point::ORIGIN, &DrawOptions::default().with_order(2));
        gfx.text("a", "mono", &Point::ORIGIN, &DrawOptions::default().with_order(1));
        gfx.text("c", "mono", &Point::ORIGIN, &DrawOptions::default().with_order(2));

        let frame = gfx.finish();
        let texts: Vec<&str> = frame
            .in_draw_order()
            .into_iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn finish_resets_for_next_frame() {
        let mut gfx = Graphics::new();
        gfx.pixels(&[Point::ORIGIN, Point::xy(1.0, 1.0)], &DrawOptions::default());
        assert_eq!(gfx.finish().len(), 2);
        assert!(gfx.finish().is_empty());
    }
}
