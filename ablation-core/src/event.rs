//! Input events from the host and the intents they translate into.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::ShapeKind;

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    /// Left button / primary touch.
    Primary,
    /// Right button / long press.
    Secondary,
    /// Middle button.
    Middle,
}

/// Directional keys. Other keys never reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowKey {
    /// Move up (negative y).
    Up,
    /// Move down.
    Down,
    /// Move left (negative x).
    Left,
    /// Move right.
    Right,
}

impl ArrowKey {
    /// Unit direction on screen.
    #[must_use]
    pub fn direction(self) -> (f64, f64) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// Raw input as delivered by a host surface, in surface coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// A pointer button went down.
    PointerDown {
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
        /// Button pressed.
        button: PointerButton,
        /// Timestamp in milliseconds on a monotonic host clock.
        timestamp_ms: u64,
    },
    /// The pointer moved.
    PointerMove {
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
    },
    /// The primary button was released.
    PointerUp,
    /// The pointer left the surface.
    PointerLeave,
    /// Scroll wheel; positive `delta_y` scrolls down.
    Wheel {
        /// Vertical scroll delta.
        delta_y: f64,
    },
    /// A directional key was pressed.
    Key(ArrowKey),
}

/// A user intent the engine executes directly.
///
/// Scripts are JSON arrays of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Choose the type of the next shape to place.
    SelectShapeType {
        /// Shape kind.
        kind: ShapeKind,
    },
    /// Place the chosen shape type at a point.
    CreateShapeAt {
        /// Requested center.
        at: Point,
    },
    /// Click at a point: select, raise, or count towards a triple-click delete.
    SelectAt {
        /// Click position.
        at: Point,
        /// Click time in milliseconds.
        timestamp_ms: u64,
    },
    /// Begin dragging the active shape, grabbing it at `at`.
    StartDrag {
        /// Grab position.
        at: Point,
    },
    /// Move the dragged shape so the grab point follows `at`.
    DragTo {
        /// Pointer position.
        at: Point,
    },
    /// Finish the current drag.
    EndDrag,
    /// Rotate the active shape by its kind's step.
    RotateActive,
    /// Step the active shape's size ladder; the sign picks the direction.
    ResizeActive {
        /// Positive grows, negative shrinks.
        direction: i32,
    },
    /// Move the active shape by a delta.
    MoveActive {
        /// X delta.
        dx: f64,
        /// Y delta.
        dy: f64,
    },
    /// Delete the active shape.
    DeleteActive,
    /// Remove every shape.
    ClearShapes,
}

impl Intent {
    /// Whether the intent acts on the active shape.
    #[must_use]
    pub fn targets_active(&self) -> bool {
        matches!(
            self,
            Self::StartDrag { .. }
                | Self::RotateActive
                | Self::ResizeActive { .. }
                | Self::MoveActive { .. }
                | Self::DeleteActive
        )
    }

    /// Parse a JSON array of intents.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn parse_script(json: &str) -> crate::EngineResult<Vec<Intent>> {
        Ok(serde_json::from_str(json)?)
    }
}
