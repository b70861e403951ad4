//! Editor session tying the reconstruction, selection and view together

use crate::camera::ViewCamera;
use crate::config::EditorConfig;
use crate::display::{camera_frustums, highlight_colors, DisplaySettings};
use crate::error::{Result, SessionError};
use crate::lasso::{PointerEvent, ShapeMode};
use crate::selection::{PointerOutcome, SelectionEngine, SelectionTarget};
use sparsedit_core::{CameraFrustum, Reconstruction};
use sparsedit_io::{export_reconstruction, read_reconstruction, ReconstructionPaths, TextReadOptions};
use std::path::Path;

/// State of one editor window.
///
/// The session owns the loaded reconstruction, if any, and routes the
/// selection commands against it.
#[derive(Debug, Clone)]
pub struct EditorSession {
    reconstruction: Option<Reconstruction>,
    selection: SelectionEngine,
    camera: ViewCamera,
    display: DisplaySettings,
    import_options: TextReadOptions,
}

impl EditorSession {
    pub fn new(config: &EditorConfig, width: u32, height: u32) -> Self {
        Self {
            reconstruction: None,
            selection: SelectionEngine::new(),
            camera: ViewCamera::new(&config.camera, width, height),
            display: config.display,
            import_options: config.import.clone(),
        }
    }

    pub fn reconstruction(&self) -> Option<&Reconstruction> {
        self.reconstruction.as_ref()
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn camera(&self) -> &ViewCamera {
        &self.camera
    }

    /// Camera for the manipulator to move
    pub fn camera_mut(&mut self) -> &mut ViewCamera {
        &mut self.camera
    }

    pub fn display(&self) -> &DisplaySettings {
        &self.display
    }

    /// Take ownership of a reconstruction, clear the selection and frame it
    pub fn load(&mut self, reconstruction: Reconstruction) {
        self.reconstruction = Some(reconstruction);
        self.selection.clear();
        self.reset_view();
    }

    /// Load `cameras.txt`, `images.txt` and `points3D.txt` from `dir`.
    ///
    /// The previous reconstruction is dropped either way; on failure the
    /// session is left without one.
    pub fn import_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        self.reconstruction = None;
        self.selection.clear();

        let paths = ReconstructionPaths::in_dir(dir);
        let reconstruction = read_reconstruction(&paths, &self.import_options)?;
        self.load(reconstruction);
        Ok(())
    }

    /// Write the three files into `dir`
    pub fn export_dir<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let reconstruction = self
            .reconstruction
            .as_ref()
            .ok_or(SessionError::NoReconstruction)?;
        export_reconstruction(reconstruction, &ReconstructionPaths::in_dir(dir))?;
        Ok(())
    }

    pub fn set_shape_mode(&mut self, mode: ShapeMode) {
        self.selection.set_shape_mode(mode);
    }

    pub fn set_target(&mut self, target: SelectionTarget) {
        self.selection.set_target(target);
    }

    /// Route a pointer event through the lasso using the current view
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> PointerOutcome {
        let transforms = self.camera.transforms();
        self.selection
            .handle_pointer(event, self.reconstruction.as_ref(), &transforms)
    }

    pub fn invert_selection(&mut self) {
        self.selection.invert(self.reconstruction.as_ref());
    }

    /// Delete the current selection, returning the number of removed entities
    pub fn delete_selection(&mut self) -> usize {
        let removed = self.selection.delete(self.reconstruction.as_mut());
        if removed > 0 {
            log::info!("deleted {} {:?}", removed, self.selection.last_target());
        }
        removed
    }

    /// Frame the reconstruction's points. Keeps the current view when there
    /// is nothing to frame.
    pub fn reset_view(&mut self) {
        if let Some(bounds) = self.reconstruction.as_ref().and_then(|r| r.bounds()) {
            self.camera.home(&bounds);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    pub fn scale_points(&mut self, steps: i32) {
        self.display.scale_points(steps);
    }

    pub fn scale_cameras(&mut self, steps: i32) {
        self.display.scale_cameras(steps);
    }

    /// Per-point colors with the selection highlighted
    pub fn point_colors(&self) -> Vec<[u8; 3]> {
        self.reconstruction
            .as_ref()
            .map(|r| {
                highlight_colors(
                    r,
                    self.selection.selected_points(),
                    self.display.highlight_color,
                )
            })
            .unwrap_or_default()
    }

    /// Camera glyphs at the current scale
    pub fn camera_frustums(&self) -> Vec<CameraFrustum> {
        self.reconstruction
            .as_ref()
            .map(|r| camera_frustums(r, self.display.camera_scale))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session() -> EditorSession {
        EditorSession::new(&EditorConfig::default(), 640, 480)
    }

    #[test]
    fn test_commands_without_reconstruction_are_noops() {
        let mut s = session();
        s.invert_selection();
        assert_eq!(s.delete_selection(), 0);
        s.reset_view();
        assert!(s.point_colors().is_empty());
        assert!(s.camera_frustums().is_empty());
        assert!(matches!(
            s.export_dir(std::env::temp_dir()),
            Err(SessionError::NoReconstruction)
        ));
    }

    #[test]
    fn test_failed_import_drops_reconstruction() {
        let dir = TempDir::new().unwrap();
        let mut s = session();
        s.load(Reconstruction::new());
        assert!(s.reconstruction().is_some());

        let err = s.import_dir(dir.path()).unwrap_err();
        assert!(matches!(err, SessionError::Io(_)));
        assert!(s.reconstruction().is_none());
    }

    #[test]
    fn test_scaling_goes_to_display() {
        let mut s = session();
        s.scale_points(1);
        s.scale_cameras(1);
        assert_eq!(s.display().point_size, 4.0);
        assert!(s.display().camera_scale > 0.2);
    }
}
