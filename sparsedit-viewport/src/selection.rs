//! Lasso selection of points and cameras
//!
//! Selections are stored as ordinal positions into the ascending-id order of
//! the targeted collection. Any deletion shifts positions, so a selection is
//! only meaningful against the reconstruction it was computed on.

use crate::camera::ViewTransforms;
use crate::lasso::{LassoOutcome, LassoTool, PointerEvent, ShapeMode};
use crate::polygon::{Lasso, ScreenPoint};
use serde::{Deserialize, Serialize};
use sparsedit_core::{Point3, Reconstruction, WorldToScreen};

/// Which collection a lasso selects from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionTarget {
    #[default]
    Points,
    /// Images, located by their camera centers
    Cameras,
}

/// What a pointer event did to the selection state
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    /// Not a lasso event; forward it to the camera manipulator
    Passthrough,
    /// The lasso outline changed and the overlay should be redrawn
    OverlayChanged,
    /// A lasso closed and the selection was recomputed
    Selected { target: SelectionTarget, count: usize },
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    target: SelectionTarget,
    last_target: SelectionTarget,
    selected_points: Vec<usize>,
    selected_cameras: Vec<usize>,
    lasso: LassoTool,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection the next lasso selects from
    pub fn target(&self) -> SelectionTarget {
        self.target
    }

    pub fn set_target(&mut self, target: SelectionTarget) {
        self.target = target;
    }

    /// Target of the most recent selection; invert and delete act on it
    pub fn last_target(&self) -> SelectionTarget {
        self.last_target
    }

    pub fn shape_mode(&self) -> ShapeMode {
        self.lasso.mode()
    }

    /// Switch the shape mode, dropping any lasso in progress
    pub fn set_shape_mode(&mut self, mode: ShapeMode) {
        log::debug!("shape mode {:?} -> {:?}", self.lasso.mode(), mode);
        self.lasso.set_mode(mode);
    }

    /// Ascending positions of the selected points
    pub fn selected_points(&self) -> &[usize] {
        &self.selected_points
    }

    /// Ascending positions of the selected images
    pub fn selected_cameras(&self) -> &[usize] {
        &self.selected_cameras
    }

    /// Selection for the given target
    pub fn selected(&self, target: SelectionTarget) -> &[usize] {
        match target {
            SelectionTarget::Points => &self.selected_points,
            SelectionTarget::Cameras => &self.selected_cameras,
        }
    }

    /// Outline of the lasso in progress
    pub fn lasso_overlay(&self) -> Vec<ScreenPoint> {
        self.lasso.overlay()
    }

    pub fn clear(&mut self) {
        self.selected_points.clear();
        self.selected_cameras.clear();
    }

    /// Replace both selections with the entities of the active target whose
    /// projection falls inside `polygon`. Returns the number selected.
    ///
    /// Both sets are cleared first, so a degenerate polygon or a missing
    /// reconstruction leaves nothing selected.
    pub fn select_in_polygon(
        &mut self,
        reconstruction: Option<&Reconstruction>,
        transforms: &ViewTransforms,
        polygon: &[ScreenPoint],
    ) -> usize {
        self.last_target = self.target;
        self.clear();

        let (Some(reconstruction), Some(lasso)) = (reconstruction, Lasso::new(polygon)) else {
            return 0;
        };

        let w2s = transforms.world_to_screen();
        let selected = match self.target {
            SelectionTarget::Points => {
                self.selected_points = positions_inside(
                    &w2s,
                    &lasso,
                    reconstruction.points().values().map(|p| p.position),
                );
                self.selected_points.len()
            }
            SelectionTarget::Cameras => {
                self.selected_cameras = positions_inside(
                    &w2s,
                    &lasso,
                    reconstruction.images().values().map(|img| img.center()),
                );
                self.selected_cameras.len()
            }
        };

        log::trace!(
            "lasso with {} vertices selected {} {:?}",
            polygon.len(),
            selected,
            self.target
        );
        selected
    }

    /// Replace the last-targeted selection with its complement.
    ///
    /// Positions outside the current collection are ignored. Without a
    /// reconstruction this does nothing.
    pub fn invert(&mut self, reconstruction: Option<&Reconstruction>) {
        let Some(reconstruction) = reconstruction else {
            return;
        };

        let (len, selection) = match self.last_target {
            SelectionTarget::Points => (reconstruction.num_points(), &mut self.selected_points),
            SelectionTarget::Cameras => (reconstruction.num_images(), &mut self.selected_cameras),
        };

        let mut keep = vec![true; len];
        for &position in selection.iter() {
            if let Some(flag) = keep.get_mut(position) {
                *flag = false;
            }
        }
        *selection = keep
            .iter()
            .enumerate()
            .filter_map(|(position, &flag)| flag.then_some(position))
            .collect();
    }

    /// Delete the last-targeted selection from the reconstruction and clear
    /// it. Returns the number of removed entities.
    pub fn delete(&mut self, reconstruction: Option<&mut Reconstruction>) -> usize {
        let Some(reconstruction) = reconstruction else {
            return 0;
        };

        match self.last_target {
            SelectionTarget::Points => {
                let removed = reconstruction.delete_points(&self.selected_points);
                self.selected_points.clear();
                removed
            }
            SelectionTarget::Cameras => {
                let removed = reconstruction.delete_images(&self.selected_cameras);
                self.selected_cameras.clear();
                removed
            }
        }
    }

    /// Feed a pointer event to the lasso and select once it closes
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        reconstruction: Option<&Reconstruction>,
        transforms: &ViewTransforms,
    ) -> PointerOutcome {
        match self.lasso.handle(event) {
            LassoOutcome::Passthrough => PointerOutcome::Passthrough,
            LassoOutcome::Updated => PointerOutcome::OverlayChanged,
            LassoOutcome::Ignored => PointerOutcome::Ignored,
            LassoOutcome::Closed(polygon) => {
                let count = self.select_in_polygon(reconstruction, transforms, &polygon);
                PointerOutcome::Selected {
                    target: self.target,
                    count,
                }
            }
        }
    }
}

fn positions_inside<I>(w2s: &WorldToScreen, lasso: &Lasso<'_>, positions: I) -> Vec<usize>
where
    I: Iterator<Item = Point3<f64>>,
{
    positions
        .enumerate()
        .filter_map(|(index, world)| {
            let s = w2s.project(&world);
            lasso.contains(s.x, s.y).then_some(index)
        })
        .collect()
}
