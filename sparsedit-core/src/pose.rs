//! Camera pose utilities
//!
//! Image poses are stored the way structure-from-motion pipelines write them:
//! a world-to-camera rotation as a scalar-first quaternion and a world-to-camera
//! translation. The camera center is derived from both.

use nalgebra::{Isometry3, Point3, Quaternion, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// World-to-camera pose of an image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Rotation quaternion (qw, qx, qy, qz)
    pub qvec: [f64; 4],
    /// Translation (tx, ty, tz)
    pub tvec: [f64; 3],
}

impl CameraPose {
    /// Create a pose from raw quaternion and translation components
    pub fn new(qvec: [f64; 4], tvec: [f64; 3]) -> Self {
        Self { qvec, tvec }
    }

    /// Identity pose: camera at the origin looking down +Z
    pub fn identity() -> Self {
        Self::new([1.0, 0.0, 0.0, 0.0], [0.0, 0.0, 0.0])
    }

    /// World-to-camera rotation.
    ///
    /// The stored quaternion is normalized on the fly. A zero or non-finite
    /// quaternion yields the identity rotation.
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        let [w, x, y, z] = self.qvec;
        let q = Quaternion::new(w, x, y, z);
        let norm = q.norm();
        if norm > 0.0 && norm.is_finite() {
            UnitQuaternion::from_quaternion(q)
        } else {
            UnitQuaternion::identity()
        }
    }

    /// World-to-camera translation
    pub fn translation(&self) -> Vector3<f64> {
        Vector3::new(self.tvec[0], self.tvec[1], self.tvec[2])
    }

    /// World-to-camera rigid transform
    pub fn world_to_camera(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.translation()), self.rotation())
    }

    /// Camera center in world coordinates, `C = -Rᵗ·t`
    pub fn center(&self) -> Point3<f64> {
        let r_inv = self.rotation().inverse();
        Point3::from(-(r_inv * self.translation()))
    }

    /// Viewing direction (camera +Z axis) in world coordinates
    pub fn viewing_direction(&self) -> Vector3<f64> {
        self.rotation().inverse() * Vector3::z()
    }

    /// Square pyramid marking the camera in the scene.
    ///
    /// The apex sits at the camera center and the base lies one `scale` in
    /// front of it, spanning `±scale` along the camera x and y axes.
    pub fn frustum(&self, scale: f64) -> CameraFrustum {
        let camera_to_world = self.rotation().inverse();
        let apex = self.center();
        let corner = |x: f64, y: f64| apex + camera_to_world * Vector3::new(x * scale, y * scale, scale);

        CameraFrustum {
            apex,
            base: [
                corner(-1.0, -1.0),
                corner(1.0, -1.0),
                corner(1.0, 1.0),
                corner(-1.0, 1.0),
            ],
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Wireframe pyramid geometry for one camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrustum {
    /// Camera center
    pub apex: Point3<f64>,
    /// Base corners in loop order
    pub base: [Point3<f64>; 4],
}

impl CameraFrustum {
    /// Line segments of the wireframe: the base loop followed by the four sides
    pub fn edges(&self) -> [(Point3<f64>, Point3<f64>); 8] {
        let b = &self.base;
        [
            (b[0], b[1]),
            (b[1], b[2]),
            (b[2], b[3]),
            (b[3], b[0]),
            (self.apex, b[0]),
            (self.apex, b[1]),
            (self.apex, b[2]),
            (self.apex, b[3]),
        ]
    }
}
