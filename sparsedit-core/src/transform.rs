//! World-to-screen projection
//!
//! Matrices follow nalgebra's column-vector convention, so the composite
//! `viewport * projection * view` is the same transform that a row-vector
//! pipeline writes as `view · projection · viewport`.

use nalgebra::{Matrix4, Point3, Vector4};
use serde::{Deserialize, Serialize};

/// A projected point: window coordinates with the origin at the top-left, plus depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenProjection {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

/// Composite transform from world coordinates to top-left screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldToScreen {
    /// `viewport * projection * view`
    pub matrix: Matrix4<f64>,
    /// Window height in pixels, used to flip y to the top-left convention
    pub window_height: f64,
}

impl WorldToScreen {
    /// Compose view, projection and viewport transforms into one matrix
    pub fn compose(
        view: &Matrix4<f64>,
        projection: &Matrix4<f64>,
        viewport: &Matrix4<f64>,
        window_height: f64,
    ) -> Self {
        Self {
            matrix: viewport * projection * view,
            window_height,
        }
    }

    /// Wrap an already composed matrix
    pub fn from_matrix(matrix: Matrix4<f64>, window_height: f64) -> Self {
        Self {
            matrix,
            window_height,
        }
    }

    /// Project a world point.
    ///
    /// Window coordinates are divided by the homogeneous w. Points on the
    /// camera plane (w = 0) come out non-finite and never fall inside a lasso.
    pub fn project(&self, point: &Point3<f64>) -> ScreenProjection {
        let h: Vector4<f64> = self.matrix * point.to_homogeneous();
        let inv_w = 1.0 / h.w;
        let window_y = h.y * inv_w;

        ScreenProjection {
            x: h.x * inv_w,
            y: self.window_height - window_y,
            depth: h.z * inv_w,
        }
    }
}

/// Window matrix for a viewport, mapping normalized device coordinates
/// `[-1, 1]` to pixels and depth to `[0, 1]`
pub fn viewport_matrix(x: f64, y: f64, width: f64, height: f64) -> Matrix4<f64> {
    let hw = 0.5 * width;
    let hh = 0.5 * height;

    #[rustfmt::skip]
    let m = Matrix4::new(
        hw,  0.0, 0.0, hw + x,
        0.0, hh,  0.0, hh + y,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    );
    m
}
