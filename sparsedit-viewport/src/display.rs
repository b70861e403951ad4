//! Display parameters and the per-entity data a renderer draws from

use serde::{Deserialize, Serialize};
use sparsedit_core::{CameraFrustum, Reconstruction};

const MIN_POINT_SIZE: f32 = 1.0;
const MAX_POINT_SIZE: f32 = 32.0;
const MIN_CAMERA_SCALE: f64 = 0.01;
const MAX_CAMERA_SCALE: f64 = 100.0;
const CAMERA_SCALE_STEP: f64 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Point sprite size in pixels
    pub point_size: f32,
    /// Depth of the camera frustum glyphs in world units
    pub camera_scale: f64,
    /// Color of selected points
    pub highlight_color: [u8; 3],
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            point_size: 3.0,
            camera_scale: 0.2,
            highlight_color: [255, 0, 0],
        }
    }
}

impl DisplaySettings {
    /// Grow or shrink points by one pixel per step
    pub fn scale_points(&mut self, steps: i32) {
        self.point_size = (self.point_size + steps as f32).clamp(MIN_POINT_SIZE, MAX_POINT_SIZE);
    }

    /// Grow or shrink the camera glyphs by a constant factor per step
    pub fn scale_cameras(&mut self, steps: i32) {
        self.camera_scale =
            (self.camera_scale * CAMERA_SCALE_STEP.powi(steps)).clamp(MIN_CAMERA_SCALE, MAX_CAMERA_SCALE);
    }
}

/// Point colors in ascending id order, with the selected positions painted
/// in `highlight`.
///
/// `selected` must be ascending; positions past the end are ignored.
pub fn highlight_colors(
    reconstruction: &Reconstruction,
    selected: &[usize],
    highlight: [u8; 3],
) -> Vec<[u8; 3]> {
    let mut selected = selected.iter().copied().peekable();
    reconstruction
        .points()
        .values()
        .enumerate()
        .map(|(index, point)| {
            while selected.next_if(|&s| s < index).is_some() {}
            if selected.next_if_eq(&index).is_some() {
                highlight
            } else {
                point.color
            }
        })
        .collect()
}

/// One frustum per image in ascending id order
pub fn camera_frustums(reconstruction: &Reconstruction, scale: f64) -> Vec<CameraFrustum> {
    reconstruction
        .images()
        .values()
        .map(|img| img.pose.frustum(scale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sparsedit_core::{CameraPose, Image, Point3, Point3D};

    fn colored(id: i64, color: [u8; 3]) -> Point3D {
        Point3D {
            id,
            position: Point3::origin(),
            color,
            error: 0.0,
            track: Vec::new(),
        }
    }

    #[test]
    fn test_point_size_clamped() {
        let mut settings = DisplaySettings::default();
        settings.scale_points(2);
        assert_eq!(settings.point_size, 5.0);
        settings.scale_points(-100);
        assert_eq!(settings.point_size, MIN_POINT_SIZE);
        settings.scale_points(100);
        assert_eq!(settings.point_size, MAX_POINT_SIZE);
    }

    #[test]
    fn test_camera_scale_steps() {
        let mut settings = DisplaySettings::default();
        settings.scale_cameras(1);
        assert_relative_eq!(settings.camera_scale, 0.25, epsilon = 1e-12);
        settings.scale_cameras(-1);
        assert_relative_eq!(settings.camera_scale, 0.2, epsilon = 1e-12);
        settings.scale_cameras(-100);
        assert_eq!(settings.camera_scale, MIN_CAMERA_SCALE);
    }

    #[test]
    fn test_highlight_colors() {
        let rec = Reconstruction::from_parts(
            Vec::new(),
            Vec::new(),
            vec![
                colored(4, [1, 1, 1]),
                colored(2, [2, 2, 2]),
                colored(8, [3, 3, 3]),
            ],
        );
        let colors = highlight_colors(&rec, &[1, 5], [255, 0, 0]);
        assert_eq!(colors, vec![[2, 2, 2], [255, 0, 0], [3, 3, 3]]);
        assert_eq!(highlight_colors(&rec, &[], [0, 0, 0]), vec![[2, 2, 2], [1, 1, 1], [3, 3, 3]]);
    }

    #[test]
    fn test_camera_frustums() {
        let images = vec![Image {
            id: 1,
            camera_id: 1,
            name: "a.png".to_string(),
            pose: CameraPose::new([1.0, 0.0, 0.0, 0.0], [0.0, 0.0, -2.0]),
            observations: Vec::new(),
        }];
        let rec = Reconstruction::from_parts(Vec::new(), images, Vec::new());

        let frustums = camera_frustums(&rec, 0.5);
        assert_eq!(frustums.len(), 1);
        assert_relative_eq!(frustums[0].apex, Point3::new(0.0, 0.0, 2.0));
        assert_relative_eq!(frustums[0].base[2], Point3::new(0.5, 0.5, 2.5));
    }
}
