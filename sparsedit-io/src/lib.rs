//! I/O operations for sparse reconstructions
//!
//! This crate reads and writes the COLMAP text interchange format
//! (`cameras.txt`, `images.txt`, `points3D.txt`) into a
//! [`sparsedit_core::Reconstruction`].

pub mod colmap_text;
pub mod error;

#[cfg(test)]
mod tests;

pub use colmap_text::{
    ColmapTextReader, ColmapTextWriter, ReconstructionPaths, TextReadOptions, CAMERAS_FILE,
    IMAGES_FILE, POINTS3D_FILE,
};
pub use error::*;

use sparsedit_core::Reconstruction;

/// Load the three files into `reconstruction`, replacing its content.
///
/// Files are read in the order cameras, images, points, and each collection
/// is replaced as soon as its file has been read. If a later file cannot be
/// opened the error is returned and the collections replaced so far stay in
/// place.
pub fn import_reconstruction(
    reconstruction: &mut Reconstruction,
    paths: &ReconstructionPaths,
    options: &TextReadOptions,
) -> Result<()> {
    reconstruction.replace_cameras(ColmapTextReader::read_cameras(&paths.cameras)?);
    reconstruction.replace_images(ColmapTextReader::read_images(&paths.images, options)?);
    reconstruction.replace_points(ColmapTextReader::read_points3d(&paths.points)?);

    log::info!(
        "imported {} cameras, {} images, {} points",
        reconstruction.num_cameras(),
        reconstruction.num_images(),
        reconstruction.num_points()
    );
    Ok(())
}

/// Load the three files into a new reconstruction. Nothing is returned
/// unless all three files were read.
pub fn read_reconstruction(
    paths: &ReconstructionPaths,
    options: &TextReadOptions,
) -> Result<Reconstruction> {
    let mut reconstruction = Reconstruction::new();
    import_reconstruction(&mut reconstruction, paths, options)?;
    Ok(reconstruction)
}

/// Write the three files in the order cameras, images, points. Files written
/// before a failing one are left on disk.
pub fn export_reconstruction(
    reconstruction: &Reconstruction,
    paths: &ReconstructionPaths,
) -> Result<()> {
    ColmapTextWriter::write_cameras(&paths.cameras, reconstruction.cameras())?;
    ColmapTextWriter::write_images(&paths.images, reconstruction.images())?;
    ColmapTextWriter::write_points3d(&paths.points, reconstruction.points())?;

    log::info!(
        "exported {} cameras, {} images, {} points",
        reconstruction.num_cameras(),
        reconstruction.num_images(),
        reconstruction.num_points()
    );
    Ok(())
}
