//! Sparse reconstruction data model
//!
//! A [`Reconstruction`] owns three collections keyed by stable identifiers:
//! cameras (intrinsics), images (posed views) and 3D points. Every collection
//! iterates in ascending identifier order. Selections elsewhere in sparsedit
//! refer to entities by their *ordinal position* in that order, so any
//! deletion shifts the position of every entity after the deleted one.

use crate::bounds::SceneBounds;
use crate::pose::CameraPose;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// signed, like the image and point references inside tracks and observations
pub type CameraId = i32;
pub type ImageId = i32;
pub type Point3DId = i64;

/// Point id marking a 2D observation without a triangulated point
pub const INVALID_POINT3D_ID: i64 = -1;

/// Calibrated camera intrinsics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: CameraId,
    /// Model name, e.g. `PINHOLE` or `SIMPLE_RADIAL`
    pub model: String,
    pub width: u32,
    pub height: u32,
    /// Model-dependent parameters, kept opaque
    pub params: Vec<f64>,
}

/// A 2D keypoint observed in an image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
    /// Observed 3D point, or [`INVALID_POINT3D_ID`]
    pub point3d_id: i64,
}

impl Observation {
    pub fn has_point3d(&self) -> bool {
        self.point3d_id != INVALID_POINT3D_ID
    }
}

/// A posed image of the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    /// Intrinsics used by this image; not required to resolve
    pub camera_id: CameraId,
    pub name: String,
    pub pose: CameraPose,
    pub observations: Vec<Observation>,
}

impl Image {
    /// Camera center in world coordinates
    pub fn center(&self) -> Point3<f64> {
        self.pose.center()
    }
}

/// A triangulated 3D point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub id: Point3DId,
    pub position: Point3<f64>,
    pub color: [u8; 3],
    /// Mean reprojection error
    pub error: f64,
    /// Observing images, stored as the flat integer list found in the file
    pub track: Vec<i64>,
}

/// Cameras, images and points of one reconstruction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconstruction {
    cameras: BTreeMap<CameraId, Camera>,
    images: BTreeMap<ImageId, Image>,
    points: BTreeMap<Point3DId, Point3D>,
}

impl Reconstruction {
    /// Create an empty reconstruction
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a reconstruction from entity lists. A later entity replaces an
    /// earlier one with the same id.
    pub fn from_parts<C, I, P>(cameras: C, images: I, points: P) -> Self
    where
        C: IntoIterator<Item = Camera>,
        I: IntoIterator<Item = Image>,
        P: IntoIterator<Item = Point3D>,
    {
        Self {
            cameras: cameras.into_iter().map(|c| (c.id, c)).collect(),
            images: images.into_iter().map(|i| (i.id, i)).collect(),
            points: points.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    pub fn cameras(&self) -> &BTreeMap<CameraId, Camera> {
        &self.cameras
    }

    pub fn images(&self) -> &BTreeMap<ImageId, Image> {
        &self.images
    }

    pub fn points(&self) -> &BTreeMap<Point3DId, Point3D> {
        &self.points
    }

    /// Replace the whole camera collection
    pub fn replace_cameras(&mut self, cameras: BTreeMap<CameraId, Camera>) {
        self.cameras = cameras;
    }

    /// Replace the whole image collection
    pub fn replace_images(&mut self, images: BTreeMap<ImageId, Image>) {
        self.images = images;
    }

    /// Replace the whole point collection
    pub fn replace_points(&mut self, points: BTreeMap<Point3DId, Point3D>) {
        self.points = points;
    }

    pub fn num_cameras(&self) -> usize {
        self.cameras.len()
    }

    pub fn num_images(&self) -> usize {
        self.images.len()
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// True if all three collections are empty
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty() && self.images.is_empty() && self.points.is_empty()
    }

    /// Point at an ordinal position
    pub fn point_at(&self, position: usize) -> Option<&Point3D> {
        self.points.values().nth(position)
    }

    /// Image at an ordinal position
    pub fn image_at(&self, position: usize) -> Option<&Image> {
        self.images.values().nth(position)
    }

    /// Resolve ascending ordinal positions to point ids. Out-of-range
    /// positions are skipped.
    pub fn point_ids_at(&self, positions: &[usize]) -> Vec<Point3DId> {
        ids_at(&self.points, positions)
    }

    /// Resolve ascending ordinal positions to image ids. Out-of-range
    /// positions are skipped.
    pub fn image_ids_at(&self, positions: &[usize]) -> Vec<ImageId> {
        ids_at(&self.images, positions)
    }

    /// Remove the points at the given ordinal positions.
    ///
    /// `positions` must be ascending and free of duplicates: a single cursor
    /// walks the collection while consuming the list in lock-step, so an
    /// out-of-order entry stalls the cursor and every entry after it is
    /// ignored. Returns the number of removed points.
    pub fn delete_points(&mut self, positions: &[usize]) -> usize {
        let removed = remove_at_positions(&mut self.points, positions);
        log::debug!("deleted {} of {} requested points", removed, positions.len());
        removed
    }

    /// Remove the images at the given ordinal positions.
    ///
    /// Same contract as [`Reconstruction::delete_points`].
    pub fn delete_images(&mut self, positions: &[usize]) -> usize {
        let removed = remove_at_positions(&mut self.images, positions);
        log::debug!("deleted {} of {} requested images", removed, positions.len());
        removed
    }

    /// 3D point ids referenced by an image's observations, in observation
    /// order. Empty for an unknown image.
    pub fn image_point_ids(&self, image_id: ImageId) -> Vec<i64> {
        self.images
            .get(&image_id)
            .map(|img| img.observations.iter().map(|o| o.point3d_id).collect())
            .unwrap_or_default()
    }

    /// Track of a point. Empty for an unknown point.
    pub fn point_image_ids(&self, point_id: Point3DId) -> Vec<i64> {
        self.points
            .get(&point_id)
            .map(|p| p.track.clone())
            .unwrap_or_default()
    }

    /// Bounds of all point positions, `None` without points
    pub fn bounds(&self) -> Option<SceneBounds> {
        SceneBounds::from_points(self.points.values().map(|p| &p.position))
    }
}

fn ids_at<K: Copy, V>(map: &BTreeMap<K, V>, positions: &[usize]) -> Vec<K> {
    let mut wanted = positions.iter().copied().peekable();
    let mut ids = Vec::with_capacity(positions.len());
    for (index, key) in map.keys().enumerate() {
        match wanted.peek() {
            Some(&next) if next == index => {
                ids.push(*key);
                wanted.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    ids
}

fn remove_at_positions<K: Ord, V>(map: &mut BTreeMap<K, V>, positions: &[usize]) -> usize {
    let before = map.len();
    let mut cursor = positions.iter().copied().peekable();
    let mut index = 0usize;

    map.retain(|_, _| {
        let keep = match cursor.peek() {
            Some(&next) if next == index => {
                cursor.next();
                false
            }
            _ => true,
        };
        index += 1;
        keep
    });

    before - map.len()
}
