//! Viewport interaction for sparse reconstructions
//!
//! This crate turns screen-space input into edits of a
//! [`sparsedit_core::Reconstruction`]:
//! - Viewer camera and the world-to-screen transforms it produces
//! - Rectangle and polygon lasso drawing
//! - Point and camera selection, invert and delete
//! - Display settings and an editor session holding it all together

pub mod camera;
pub mod config;
pub mod display;
pub mod error;
pub mod lasso;
pub mod polygon;
pub mod selection;
pub mod session;

pub use camera::*;
pub use config::*;
pub use display::*;
pub use error::*;
pub use lasso::*;
pub use polygon::*;
pub use selection::*;
pub use session::*;
