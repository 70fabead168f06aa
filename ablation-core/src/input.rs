//! Raw host input to engine intents.

use crate::event::{InputEvent, PointerButton};
use crate::geometry::Point;
use crate::AblationEngine;

impl AblationEngine {
    /// Process a raw input event. Returns whether the frame needs a redraw.
    ///
    /// - primary press: place the pending shape type, else click-select;
    /// - secondary press: rotate the active shape wherever the pointer is;
    /// - move: drag threshold and drag updates;
    /// - release or leaving the surface: end the drag;
    /// - wheel: scroll down shrinks, anything else grows;
    /// - arrow keys: move by the mode's step.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerDown {
                x,
                y,
                button,
                timestamp_ms,
            } => match button {
                PointerButton::Primary => {
                    let at = Point::new(x, y);
                    if self.state().placing().is_some() {
                        self.create_shape_at(at).is_some()
                    } else {
                        // Selection changes the outline even when the
                        // region stays the same.
                        let _ = self.select_at(at, timestamp_ms);
                        true
                    }
                }
                PointerButton::Secondary => self.rotate_active(),
                PointerButton::Middle => false,
            },
            InputEvent::PointerMove { x, y } => self.pointer_moved(Point::new(x, y)),
            InputEvent::PointerUp | InputEvent::PointerLeave => self.end_drag(),
            InputEvent::Wheel { delta_y } => {
                let direction = if delta_y > 0.0 { -1 } else { 1 };
                self.resize_active(direction)
            }
            InputEvent::Key(key) => {
                let (ux, uy) = key.direction();
                let step = self.config().step();
                self.move_active(ux * step, uy * step)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ArrowKey;
    use crate::{EngineConfig, ShapeKind, Sizing};

    fn down(x: f64, y: f64, button: PointerButton, timestamp_ms: u64) -> InputEvent {
        InputEvent::PointerDown {
            x,
            y,
            button,
            timestamp_ms,
        }
    }

    #[test]
    fn test_primary_press_places_pending_type() {
        let mut engine = AblationEngine::default();
        engine.select_shape_type(ShapeKind::Triangle);
        assert!(engine.handle_input(&down(300.0, 300.0, PointerButton::Primary, 0)));
        assert_eq!(engine.shapes().len(), 1);
        assert_eq!(engine.active_shape().map(|s| s.kind), Some(ShapeKind::Triangle));
    }

    #[test]
    fn test_secondary_press_rotates() {
        let mut engine = AblationEngine::default();
        engine.create_shape(ShapeKind::Square, Point::new(300.0, 300.0));
        assert!(engine.handle_input(&down(10.0, 10.0, PointerButton::Secondary, 0)));
        assert_eq!(engine.active_shape().map(|s| s.rotation_degrees), Some(45));
        // Secondary never deselects.
        assert!(engine.active_shape().is_some());
    }

    #[test]
    fn test_wheel_direction() {
        let mut engine = AblationEngine::default();
        engine.create_shape(ShapeKind::Circle, Point::new(300.0, 300.0));
        assert!(engine.handle_input(&InputEvent::Wheel { delta_y: 120.0 }));
        assert_eq!(engine.active_shape().map(|s| s.sizing), Some(Sizing::Level(2)));
        assert!(engine.handle_input(&InputEvent::Wheel { delta_y: -120.0 }));
        assert_eq!(engine.active_shape().map(|s| s.sizing), Some(Sizing::Level(4)));
    }

    #[test]
    fn test_arrow_keys_use_grid_pitch() {
        let mut engine = AblationEngine::new(EngineConfig::grid()).expect("valid");
        engine.create_shape(ShapeKind::Circle, Point::new(300.0, 300.0));
        assert!(engine.handle_input(&InputEvent::Key(ArrowKey::Right)));
        assert_eq!(
            engine.active_shape().map(|s| s.center),
            Some(Point::new(320.0, 300.0))
        );
    }

    #[test]
    fn test_pointer_leave_ends_drag() {
        let mut engine = AblationEngine::default();
        engine.create_shape(ShapeKind::Circle, Point::new(300.0, 300.0));
        engine.handle_input(&down(300.0, 300.0, PointerButton::Primary, 0));
        assert!(engine.handle_input(&InputEvent::PointerMove { x: 350.0, y: 300.0 }));
        assert!(engine.state().is_dragging());
        assert!(engine.handle_input(&InputEvent::PointerLeave));
        assert!(!engine.state().is_dragging());
    }
}
