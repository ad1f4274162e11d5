//=========================================================================
// Path
//=========================================================================
//
// Ordered list of points with a bounding box kept current on every push.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Point;

//=== Path ================================================================

/// Ordered sequence of points plus their axis-aligned bounds.
///
/// The bounds are `None` until the first point arrives; after that they
/// always equal the component-wise min/max over every point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    points: Vec<Point>,
    bounds: Option<(Point, Point)>,
}

impl Path {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        let mut path = Self::new();
        path.extend(points);
        path
    }

    /// Builds a flat path from `[x0, y0, x1, y1, ...]`.
    ///
    /// A trailing unpaired number is ignored.
    pub fn from_nums(nums: &[f64]) -> Self {
        Self::from_points(nums.chunks_exact(2).map(|pair| Point::xy(pair[0], pair[1])))
    }

    //--- Mutation ---------------------------------------------------------

    pub fn push(&mut self, point: Point) {
        self.include(&point);
        self.points.push(point);
    }

    pub fn push_xy(&mut self, x: f64, y: f64) {
        self.push(Point::xy(x, y));
    }

    pub fn push_xyz(&mut self, x: f64, y: f64, z: f64) {
        self.push(Point::new(x, y, z));
    }

    /// Grows the bounding box to cover `point`.
    fn include(&mut self, point: &Point) {
        self.bounds = Some(match self.bounds {
            None => (*point, *point),
            Some((min, max)) => (min.min(point), max.max(point)),
        });
    }

    //--- Access -----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    //--- Bounds -----------------------------------------------------------

    /// Minimum corner of the bounding box.
    pub fn top_left(&self) -> Option<Point> {
        self.bounds.map(|(min, _)| min)
    }

    /// Maximum corner of the bounding box.
    pub fn bottom_right(&self) -> Option<Point> {
        self.bounds.map(|(_, max)| max)
    }

    fn extent(&self) -> Point {
        match self.bounds {
            Some((min, max)) => max - min,
            None => Point::ORIGIN,
        }
    }

    pub fn width(&self) -> f64 {
        self.extent().x
    }

    pub fn height(&self) -> f64 {
        self.extent().y
    }

    pub fn depth(&self) -> f64 {
        self.extent().z
    }

    /// Middle of the bounding box, or `None` for an empty path.
    pub fn center(&self) -> Option<Point> {
        self.bounds.map(|(min, max)| min.midpoint(&max))
    }

    //--- Relative Views ---------------------------------------------------

    /// Points expressed relative to the top-left corner.
    pub fn relative_to_top_left(&self) -> Vec<Point> {
        self.relative_to(self.top_left())
    }

    /// Points expressed relative to the bounding-box center.
    pub fn relative_to_center(&self) -> Vec<Point> {
        self.relative_to(self.center())
    }

    fn relative_to(&self, anchor: Option<Point>) -> Vec<Point> {
        let anchor = anchor.unwrap_or(Point::ORIGIN);
        self.points.iter().map(|p| *p - anchor).collect()
    }
}

impl Extend<Point> for Path {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for point in iter {
            self.push(point);
        }
    }
}

impl FromIterator<Point> for Path {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_has_no_bounds() {
        let path = Path::new();
        assert!(path.is_empty());
        assert_eq!(path.top_left(), None);
        assert_eq!(path.bottom_right(), None);
        assert_eq!(path.center(), None);
        assert_eq!(path.width(), 0.0);
        assert_eq!(path.height(), 0.0);
        assert_eq!(path.depth(), 0.0);
    }

    #[test]
    fn single_point_bounds_collapse() {
        let mut path = Path::new();
        path.push_xyz(3.0, 4.0, 5.0);
        assert_eq!(path.top_left(), Some(Point::new(3.0, 4.0, 5.0)));
        assert_eq!(path.bottom_right(), Some(Point::new(3.0, 4.0, 5.0)));
        assert_eq!(path.width(), 0.0);
    }

    #[test]
    fn bounds_track_every_push() {
        let mut path = Path::new();
        path.push_xy(10.0, 10.0);
        path.push_xy(-5.0, 20.0);
        path.push_xyz(0.0, 0.0, -3.0);
        path.push_xy(7.0, 30.0);

        assert_eq!(path.top_left(), Some(Point::new(-5.0, 0.0, -3.0)));
        assert_eq!(path.bottom_right(), Some(Point::new(10.0, 30.0, 0.0)));
        assert_eq!(path.width(), 15.0);
        assert_eq!(path.height(), 30.0);
        assert_eq!(path.depth(), 3.0);
    }

    #[test]
    fn bounds_match_component_min_max() {
        let points = vec![
            Point::new(1.0, 9.0, 2.0),
            Point::new(-4.0, 3.0, 8.0),
            Point::new(6.0, -2.0, -1.0),
        ];
        let path = Path::from_points(points.clone());

        let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(path.top_left().map(|p| p.x), Some(min_x));
        assert_eq!(path.bottom_right().map(|p| p.y), Some(max_y));
    }

    #[test]
    fn from_nums_reads_pairs_and_drops_trailing() {
        let path = Path::from_nums(&[0.0, 0.0, 10.0, 5.0, 99.0]);
        assert_eq!(path.len(), 2);
        assert_eq!(path.get(1), Some(&Point::xy(10.0, 5.0)));
    }

    #[test]
    fn center_and_relative_views() {
        let path = Path::from_nums(&[0.0, 0.0, 10.0, 20.0]);
        assert_eq!(path.center(), Some(Point::xy(5.0, 10.0)));
        assert_eq!(
            path.relative_to_center(),
            vec![Point::xy(-5.0, -10.0), Point::xy(5.0, 10.0)]
        );

        let shifted = Path::from_nums(&[2.0, 3.0, 4.0, 8.0]);
        assert_eq!(
            shifted.relative_to_top_left(),
            vec![Point::xy(0.0, 0.0), Point::xy(2.0, 5.0)]
        );
    }

    #[test]
    fn collect_and_iterate() {
        let path: Path = (0..4).map(|i| Point::xy(i as f64, 0.0)).collect();
        assert_eq!(path.len(), 4);
        let xs: Vec<f64> = path.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!((&path).into_iter().count(), 4);
    }
}
