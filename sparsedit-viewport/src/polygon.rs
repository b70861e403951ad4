//! Screen-space polygon containment
//!
//! Polygons are lists of window coordinates with the origin at the top-left.
//! The closing edge from the last vertex back to the first is implicit.

use nalgebra::Point2;

/// A vertex in window coordinates
pub type ScreenPoint = Point2<f64>;

/// Even-odd containment test.
///
/// An edge crosses the horizontal ray through `(x, y)` when its endpoints lie
/// on different sides under the half-open rule `(yi > y) != (yj > y)`, which
/// keeps shared vertices from being counted twice. Polygons with fewer than
/// three vertices contain nothing. NaN coordinates are never inside.
pub fn polygon_contains(polygon: &[ScreenPoint], x: f64, y: f64) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for (i, vi) in polygon.iter().enumerate() {
        let vj = &polygon[j];
        if (vi.y > y) != (vj.y > y) {
            let x_cross = (vj.x - vi.x) * (y - vi.y) / (vj.y - vi.y) + vi.x;
            if x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Axis-aligned rectangle spanned by two drag corners, ordered top-left,
/// top-right, bottom-right, bottom-left
pub fn rectangle_polygon(start: ScreenPoint, end: ScreenPoint) -> Vec<ScreenPoint> {
    let (left, right) = (start.x.min(end.x), start.x.max(end.x));
    let (top, bottom) = (start.y.min(end.y), start.y.max(end.y));
    vec![
        ScreenPoint::new(left, top),
        ScreenPoint::new(right, top),
        ScreenPoint::new(right, bottom),
        ScreenPoint::new(left, bottom),
    ]
}

/// A polygon prepared for repeated containment queries.
///
/// Keeps the bounding box of the vertices so most points far from the lasso
/// are rejected without walking the edges. The result always equals
/// [`polygon_contains`].
#[derive(Debug, Clone)]
pub struct Lasso<'a> {
    vertices: &'a [ScreenPoint],
    min: ScreenPoint,
    max: ScreenPoint,
}

impl<'a> Lasso<'a> {
    /// `None` for polygons with fewer than three vertices
    pub fn new(vertices: &'a [ScreenPoint]) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }

        let mut min = ScreenPoint::new(f64::INFINITY, f64::INFINITY);
        let mut max = ScreenPoint::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }

        Some(Self { vertices, min, max })
    }

    pub fn vertices(&self) -> &[ScreenPoint] {
        self.vertices
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        // a point outside the box crosses an even number of edges
        if !(x >= self.min.x && x <= self.max.x && y >= self.min.y && y <= self.max.y) {
            return false;
        }
        polygon_contains(self.vertices, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<ScreenPoint> {
        vec![
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(1.0, 0.0),
            ScreenPoint::new(1.0, 1.0),
            ScreenPoint::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_unit_square() {
        let square = unit_square();
        assert!(polygon_contains(&square, 0.5, 0.5));
        assert!(!polygon_contains(&square, 1.5, 0.5));
        assert!(!polygon_contains(&square, -0.5, 0.5));
        assert!(!polygon_contains(&square, 0.5, 1.5));
    }

    #[test]
    fn test_degenerate_polygons() {
        assert!(!polygon_contains(&[], 0.0, 0.0));
        let segment = [ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0)];
        assert!(!polygon_contains(&segment, 5.0, 5.0));
        assert!(Lasso::new(&segment).is_none());
    }

    #[test]
    fn test_concave_polygon() {
        // U shape opening upwards
        let u = vec![
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(1.0, 0.0),
            ScreenPoint::new(1.0, 3.0),
            ScreenPoint::new(2.0, 3.0),
            ScreenPoint::new(2.0, 0.0),
            ScreenPoint::new(3.0, 0.0),
            ScreenPoint::new(3.0, 4.0),
            ScreenPoint::new(0.0, 4.0),
        ];
        assert!(polygon_contains(&u, 0.5, 1.0));
        assert!(polygon_contains(&u, 2.5, 1.0));
        assert!(!polygon_contains(&u, 1.5, 1.0));
        assert!(polygon_contains(&u, 1.5, 3.5));
    }

    #[test]
    fn test_self_intersecting_uses_even_odd() {
        // bow tie with its lobes on the left and right
        let bow = vec![
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(2.0, 2.0),
            ScreenPoint::new(2.0, 0.0),
            ScreenPoint::new(0.0, 2.0),
        ];
        assert!(polygon_contains(&bow, 0.2, 1.0));
        assert!(polygon_contains(&bow, 1.8, 1.0));
        assert!(!polygon_contains(&bow, 1.0, 0.2));
    }

    #[test]
    fn test_nan_is_outside() {
        let square = unit_square();
        assert!(!polygon_contains(&square, f64::NAN, 0.5));
        assert!(!polygon_contains(&square, 0.5, f64::NAN));
        let lasso = Lasso::new(&square).unwrap();
        assert!(!lasso.contains(f64::NAN, f64::NAN));
    }

    #[test]
    fn test_rectangle_polygon_order() {
        let rect = rectangle_polygon(ScreenPoint::new(60.0, 10.0), ScreenPoint::new(0.0, 70.0));
        assert_eq!(
            rect,
            vec![
                ScreenPoint::new(0.0, 10.0),
                ScreenPoint::new(60.0, 10.0),
                ScreenPoint::new(60.0, 70.0),
                ScreenPoint::new(0.0, 70.0),
            ]
        );
    }

    #[test]
    fn test_boundary_points_follow_half_open_rule() {
        let square = vec![
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(10.0, 0.0),
            ScreenPoint::new(10.0, 10.0),
            ScreenPoint::new(0.0, 10.0),
        ];
        let lasso = Lasso::new(&square).unwrap();

        let expected = [
            ((5.0, 5.0), true),
            ((15.0, 5.0), false),
            ((5.0, 15.0), false),
            // left and top edges count, right and bottom edges do not
            ((0.0, 0.0), true),
            ((10.0, 10.0), false),
            ((0.0, 5.0), true),
            ((10.0, 5.0), false),
        ];
        for &((x, y), inside) in &expected {
            assert_eq!(polygon_contains(&square, x, y), inside, "({x}, {y})");
            assert_eq!(lasso.contains(x, y), inside, "lasso ({x}, {y})");
        }
    }

    #[test]
    fn test_lasso_matches_plain_test() {
        let square = unit_square();
        let lasso = Lasso::new(&square).unwrap();
        for &(x, y) in &[(0.5, 0.5), (1.0, 0.5), (0.0, 0.5), (0.5, 1.0), (0.5, 0.0), (2.0, 2.0)] {
            assert_eq!(lasso.contains(x, y), polygon_contains(&square, x, y), "({x}, {y})");
        }
    }
}
