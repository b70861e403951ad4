//! Axis-aligned scene bounds

use nalgebra::Point3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBounds {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl SceneBounds {
    /// Bounds of a set of points, `None` if the iterator is empty
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            min: *first,
            max: *first,
        };
        for p in iter {
            bounds.expand(p);
        }
        Some(bounds)
    }

    /// Grow the box to include `p`
    pub fn expand(&mut self, p: &Point3<f64>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Radius of the bounding sphere (half the diagonal)
    pub fn radius(&self) -> f64 {
        0.5 * (self.max - self.min).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounds() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, -2.0, 1.0),
            Point3::new(-2.0, 2.0, -1.0),
        ];
        let b = SceneBounds::from_points(&pts).unwrap();
        assert_eq!(b.min, Point3::new(-2.0, -2.0, -1.0));
        assert_eq!(b.max, Point3::new(2.0, 2.0, 1.0));
        assert_eq!(b.center(), Point3::origin());
        assert_relative_eq!(b.radius(), 3.0);
    }

    #[test]
    fn test_empty_bounds() {
        let pts: [Point3<f64>; 0] = [];
        assert!(SceneBounds::from_points(&pts).is_none());
    }
}
