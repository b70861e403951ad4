//! Interactive lasso drawing
//!
//! [`LassoTool`] turns pointer events into a closed screen-space polygon.
//! In rectangle mode a primary-button drag spans the rectangle and the
//! release point becomes its final corner. In polygon mode every primary
//! press appends a vertex and a secondary press closes the shape. Either way
//! the tool falls back to [`ShapeMode::None`] once a shape has been closed.

use crate::polygon::{rectangle_polygon, ScreenPoint};
use serde::{Deserialize, Serialize};

/// Shape drawn by the next lasso gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMode {
    /// Pointer events belong to the camera manipulator
    #[default]
    None,
    Rectangle,
    Polygon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Pointer input in window coordinates with the origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press {
        button: PointerButton,
        position: ScreenPoint,
    },
    Release {
        button: PointerButton,
        position: ScreenPoint,
    },
    /// Pointer motion; `primary_down` is set while the primary button is held
    Motion {
        position: ScreenPoint,
        primary_down: bool,
    },
}

/// Result of feeding one event to the lasso
#[derive(Debug, Clone, PartialEq)]
pub enum LassoOutcome {
    /// No shape mode is active, the event should go to the camera manipulator
    Passthrough,
    /// The in-progress outline changed
    Updated,
    /// A shape was closed; the tool is back in [`ShapeMode::None`]
    Closed(Vec<ScreenPoint>),
    /// The event means nothing in the current state
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct LassoTool {
    mode: ShapeMode,
    /// Drag corners in rectangle mode, placed vertices in polygon mode
    vertices: Vec<ScreenPoint>,
    /// A rectangle drag or a polygon is in progress
    active: bool,
}

impl LassoTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ShapeMode {
        self.mode
    }

    /// Switch shape mode. Any shape in progress is discarded without closing it.
    pub fn set_mode(&mut self, mode: ShapeMode) {
        if self.active || !self.vertices.is_empty() {
            log::debug!("discarding lasso with {} vertices", self.vertices.len());
        }
        self.mode = mode;
        self.vertices.clear();
        self.active = false;
    }

    /// True while a rectangle is being dragged or a polygon is being placed
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Outline to draw for the shape in progress.
    ///
    /// A dragged rectangle is reported as its four corners, a polygon as the
    /// vertices placed so far. Empty when nothing is in progress.
    pub fn overlay(&self) -> Vec<ScreenPoint> {
        match (self.mode, self.vertices.as_slice()) {
            (ShapeMode::Rectangle, &[start, end]) if self.active => rectangle_polygon(start, end),
            (ShapeMode::Polygon, vertices) => vertices.to_vec(),
            _ => Vec::new(),
        }
    }

    pub fn handle(&mut self, event: &PointerEvent) -> LassoOutcome {
        match self.mode {
            ShapeMode::None => LassoOutcome::Passthrough,
            ShapeMode::Rectangle => self.handle_rectangle(event),
            ShapeMode::Polygon => self.handle_polygon(event),
        }
    }

    fn handle_rectangle(&mut self, event: &PointerEvent) -> LassoOutcome {
        match *event {
            PointerEvent::Press {
                button: PointerButton::Primary,
                position,
            } => {
                self.vertices = vec![position, position];
                self.active = true;
                LassoOutcome::Updated
            }
            PointerEvent::Motion {
                position,
                primary_down: true,
            } if self.active => {
                if let Some(end) = self.vertices.last_mut() {
                    *end = position;
                }
                LassoOutcome::Updated
            }
            PointerEvent::Release {
                button: PointerButton::Primary,
                position,
            } if self.active => {
                if let Some(end) = self.vertices.last_mut() {
                    *end = position;
                }
                let polygon = match self.vertices.as_slice() {
                    &[start, end] => rectangle_polygon(start, end),
                    _ => Vec::new(),
                };
                self.finish();
                LassoOutcome::Closed(polygon)
            }
            _ => LassoOutcome::Ignored,
        }
    }

    fn handle_polygon(&mut self, event: &PointerEvent) -> LassoOutcome {
        match *event {
            PointerEvent::Press {
                button: PointerButton::Primary,
                position,
            } => {
                self.vertices.push(position);
                self.active = true;
                LassoOutcome::Updated
            }
            PointerEvent::Press {
                button: PointerButton::Secondary,
                ..
            } if self.active => {
                let polygon = std::mem::take(&mut self.vertices);
                self.finish();
                LassoOutcome::Closed(polygon)
            }
            _ => LassoOutcome::Ignored,
        }
    }

    fn finish(&mut self) {
        self.vertices.clear();
        self.active = false;
        self.mode = ShapeMode::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: PointerButton, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Press {
            button,
            position: ScreenPoint::new(x, y),
        }
    }

    fn release(button: PointerButton, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Release {
            button,
            position: ScreenPoint::new(x, y),
        }
    }

    fn drag(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Motion {
            position: ScreenPoint::new(x, y),
            primary_down: true,
        }
    }

    #[test]
    fn test_none_mode_passes_through() {
        let mut tool = LassoTool::new();
        assert_eq!(
            tool.handle(&press(PointerButton::Primary, 1.0, 1.0)),
            LassoOutcome::Passthrough
        );
        assert!(tool.overlay().is_empty());
    }

    #[test]
    fn test_rectangle_drag() {
        let mut tool = LassoTool::new();
        tool.set_mode(ShapeMode::Rectangle);

        assert_eq!(tool.handle(&press(PointerButton::Primary, 10.0, 20.0)), LassoOutcome::Updated);
        assert_eq!(tool.handle(&drag(30.0, 5.0)), LassoOutcome::Updated);
        assert_eq!(tool.overlay().len(), 4);
        assert_eq!(tool.overlay()[0], ScreenPoint::new(10.0, 5.0));

        let outcome = tool.handle(&release(PointerButton::Primary, 30.0, 5.0));
        assert_eq!(
            outcome,
            LassoOutcome::Closed(vec![
                ScreenPoint::new(10.0, 5.0),
                ScreenPoint::new(30.0, 5.0),
                ScreenPoint::new(30.0, 20.0),
                ScreenPoint::new(10.0, 20.0),
            ])
        );
        assert_eq!(tool.mode(), ShapeMode::None);
        assert!(!tool.is_active());
    }

    #[test]
    fn test_rectangle_ignores_stray_events() {
        let mut tool = LassoTool::new();
        tool.set_mode(ShapeMode::Rectangle);

        assert_eq!(tool.handle(&drag(5.0, 5.0)), LassoOutcome::Ignored);
        assert_eq!(
            tool.handle(&release(PointerButton::Primary, 5.0, 5.0)),
            LassoOutcome::Ignored
        );
        assert_eq!(tool.mode(), ShapeMode::Rectangle);

        tool.handle(&press(PointerButton::Primary, 0.0, 0.0));
        let hover = PointerEvent::Motion {
            position: ScreenPoint::new(9.0, 9.0),
            primary_down: false,
        };
        assert_eq!(tool.handle(&hover), LassoOutcome::Ignored);
        assert_eq!(
            tool.handle(&release(PointerButton::Secondary, 9.0, 9.0)),
            LassoOutcome::Ignored
        );
    }

    #[test]
    fn test_polygon_placement() {
        let mut tool = LassoTool::new();
        tool.set_mode(ShapeMode::Polygon);

        // closing before any vertex does nothing
        assert_eq!(
            tool.handle(&press(PointerButton::Secondary, 0.0, 0.0)),
            LassoOutcome::Ignored
        );

        for &(x, y) in &[(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)] {
            assert_eq!(tool.handle(&press(PointerButton::Primary, x, y)), LassoOutcome::Updated);
        }
        assert_eq!(tool.overlay().len(), 3);
        assert_eq!(tool.handle(&drag(3.0, 3.0)), LassoOutcome::Ignored);

        match tool.handle(&press(PointerButton::Secondary, 1.0, 1.0)) {
            LassoOutcome::Closed(polygon) => assert_eq!(polygon.len(), 3),
            other => panic!("expected a closed polygon, got {other:?}"),
        }
        assert_eq!(tool.mode(), ShapeMode::None);
        assert!(tool.overlay().is_empty());
    }

    #[test]
    fn test_mode_switch_discards_vertices() {
        let mut tool = LassoTool::new();
        tool.set_mode(ShapeMode::Polygon);
        tool.handle(&press(PointerButton::Primary, 0.0, 0.0));
        tool.handle(&press(PointerButton::Primary, 4.0, 0.0));

        tool.set_mode(ShapeMode::None);
        assert!(tool.overlay().is_empty());
        assert!(!tool.is_active());

        tool.set_mode(ShapeMode::Polygon);
        tool.handle(&press(PointerButton::Primary, 1.0, 1.0));
        assert_eq!(tool.overlay(), vec![ScreenPoint::new(1.0, 1.0)]);
    }
}
