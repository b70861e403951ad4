//! Core data structures for sparsedit
//!
//! This crate provides the in-memory model of a sparse structure-from-motion
//! reconstruction (cameras, posed images, 3D points), camera pose math and the
//! world-to-screen projection used by viewport selection.

pub mod bounds;
pub mod error;
pub mod pose;
pub mod reconstruction;
pub mod transform;

pub use bounds::*;
pub use error::*;
pub use pose::*;
pub use reconstruction::*;
pub use transform::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point2, Point3, UnitQuaternion, Vector3};
