//! Polled window state to engine input events.
//!
//! minifb reports levels (button held, cursor position) rather than
//! events, so presses, releases, motion and leaving the window are
//! recovered here by comparing consecutive polls.

use ablation_core::{ArrowKey, InputEvent, PointerButton};

/// One poll of the window's pointer and keyboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Cursor position in surface pixels, `None` outside the window.
    pub pointer: Option<(f32, f32)>,
    /// Left button held.
    pub primary: bool,
    /// Right button held.
    pub secondary: bool,
    /// Middle button held.
    pub middle: bool,
    /// Vertical wheel movement since the last poll; positive scrolls up.
    pub scroll_y: Option<f32>,
    /// Arrow keys pressed since the last poll, repeats included.
    pub arrows: Vec<ArrowKey>,
}

/// Edge detector between consecutive [`InputSnapshot`]s.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    pointer: Option<(f32, f32)>,
    primary: bool,
    secondary: bool,
    middle: bool,
}

impl PointerTracker {
    /// Create a tracker that has seen no input yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events that happened between the previous snapshot and this one.
    ///
    /// Motion comes first so a press lands where the cursor is now.
    pub fn translate(&mut self, snapshot: &InputSnapshot, timestamp_ms: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();

        match (self.pointer, snapshot.pointer) {
            (Some(_), None) => events.push(InputEvent::PointerLeave),
            (previous, Some(now)) if previous != Some(now) => events.push(InputEvent::PointerMove {
                x: f64::from(now.0),
                y: f64::from(now.1),
            }),
            _ => {}
        }

        let buttons = [
            (PointerButton::Primary, self.primary, snapshot.primary),
            (PointerButton::Secondary, self.secondary, snapshot.secondary),
            (PointerButton::Middle, self.middle, snapshot.middle),
        ];
        for (button, was, is) in buttons {
            match (was, is, snapshot.pointer) {
                (false, true, Some((x, y))) => events.push(InputEvent::PointerDown {
                    x: f64::from(x),
                    y: f64::from(y),
                    button,
                    timestamp_ms,
                }),
                (true, false, _) if button == PointerButton::Primary => {
                    events.push(InputEvent::PointerUp);
                }
                _ => {}
            }
        }

        if let Some(scroll) = snapshot.scroll_y.filter(|s| *s != 0.0) {
            // Engine convention: positive delta scrolls down.
            events.push(InputEvent::Wheel {
                delta_y: -f64::from(scroll),
            });
        }

        events.extend(snapshot.arrows.iter().copied().map(InputEvent::Key));

        self.pointer = snapshot.pointer;
        self.primary = snapshot.primary;
        self.secondary = snapshot.secondary;
        self.middle = snapshot.middle;
        events
    }
}
