//! Viewer camera producing the transforms used for selection

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use serde::{Deserialize, Serialize};
use sparsedit_core::{viewport_matrix, SceneBounds, WorldToScreen};

/// Lens settings of the viewer camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewCameraConfig {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for ViewCameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// The three transforms of the current view plus the window height used to
/// flip y to a top-left origin.
///
/// Whoever renders the scene owns these; the selection engine only reads
/// them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransforms {
    pub view: Matrix4<f64>,
    pub projection: Matrix4<f64>,
    pub viewport: Matrix4<f64>,
    pub window_height: f64,
}

impl ViewTransforms {
    pub fn new(
        view: Matrix4<f64>,
        projection: Matrix4<f64>,
        viewport: Matrix4<f64>,
        window_height: f64,
    ) -> Self {
        Self {
            view,
            projection,
            viewport,
            window_height,
        }
    }

    /// Composite world-to-screen transform
    pub fn world_to_screen(&self) -> WorldToScreen {
        WorldToScreen::compose(&self.view, &self.projection, &self.viewport, self.window_height)
    }
}

/// A perspective camera looking at the reconstruction
#[derive(Debug, Clone, PartialEq)]
pub struct ViewCamera {
    pub position: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Vector3<f64>,
    /// Vertical field of view in radians
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    width: u32,
    height: u32,
}

impl ViewCamera {
    pub fn new(config: &ViewCameraConfig, width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, -5.0, 0.0),
            target: Point3::origin(),
            up: Vector3::z(),
            fov: config.fov_y_degrees.to_radians(),
            near: config.near,
            far: config.far,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Window size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resize the viewport; zero sizes are clamped to one pixel
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        Perspective3::new(self.aspect_ratio(), self.fov, self.near, self.far).into_inner()
    }

    /// Window matrix covering the whole window
    pub fn viewport_matrix(&self) -> Matrix4<f64> {
        viewport_matrix(0.0, 0.0, self.width as f64, self.height as f64)
    }

    pub fn transforms(&self) -> ViewTransforms {
        ViewTransforms::new(
            self.view_matrix(),
            self.projection_matrix(),
            self.viewport_matrix(),
            self.height as f64,
        )
    }

    /// Frame the given bounds: look at their center from three radii back
    /// along -Y and one radius up, with +Z up.
    pub fn home(&mut self, bounds: &SceneBounds) {
        let center = bounds.center();
        // a single point still needs some distance to look at
        let radius = match bounds.radius() {
            r if r > f64::EPSILON => r,
            _ => 1.0,
        };

        self.target = center;
        self.position = center + Vector3::new(0.0, -3.0 * radius, radius);
        self.up = Vector3::z();
        log::debug!(
            "home view: eye {:?}, target {:?}",
            self.position.coords.as_slice(),
            center.coords.as_slice()
        );
    }
}
