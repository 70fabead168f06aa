//! Interaction state machine states and click-chain tracking.

use crate::geometry::Point;
use crate::{ShapeId, ShapeKind};

/// A primary press on a shape that may turn into a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Press {
    /// Pointer position at press time.
    pub origin: Point,
    /// Pointer position minus shape center at press time.
    pub offset: Point,
}

/// Where the engine is in the select/create/drag cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A shape type was chosen; the next primary click places it.
    Placing(ShapeKind),
    /// A shape is the target of rotate/resize/move/delete.
    Active {
        /// The active shape.
        id: ShapeId,
        /// Armed drag candidate, if the pointer is still held.
        press: Option<Press>,
    },
    /// The active shape follows the pointer.
    Dragging {
        /// The dragged shape.
        id: ShapeId,
        /// Grab offset between pointer and shape center.
        offset: Point,
    },
}

impl InteractionState {
    /// The active shape, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<ShapeId> {
        match self {
            Self::Active { id, .. } | Self::Dragging { id, .. } => Some(*id),
            Self::Idle | Self::Placing(_) => None,
        }
    }

    /// The shape type waiting to be placed, if any.
    #[must_use]
    pub fn placing(&self) -> Option<ShapeKind> {
        match self {
            Self::Placing(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Placing(_) => "placing",
            Self::Active { .. } => "active",
            Self::Dragging { .. } => "dragging",
        }
    }
}

/// Counts consecutive quick clicks on the active shape.
///
/// A click extends the chain when it lands on the shape that is already
/// active and arrives within the window of the previous click; any other
/// click restarts the chain at 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickChain {
    count: u32,
    last_ms: Option<u64>,
}

impl ClickChain {
    /// Clicks needed to delete a shape.
    pub const DELETE_COUNT: u32 = 3;

    /// Record a click on `target` at `now_ms` and return the chain length.
    pub fn register(
        &mut self,
        target: ShapeId,
        active: Option<ShapeId>,
        now_ms: u64,
        window_ms: u64,
    ) -> u32 {
        let quick = active == Some(target)
            && self
                .last_ms
                .is_some_and(|last| now_ms.saturating_sub(last) < window_ms);

        if quick {
            self.count += 1;
        } else {
            self.count = 1;
        }
        self.last_ms = Some(now_ms);
        self.count
    }

    /// Current chain length.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Forget the chain.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_counts_quick_clicks_on_active() {
        let id = ShapeId::new();
        let mut chain = ClickChain::default();
        // First click selects; the shape was not active yet.
        assert_eq!(chain.register(id, None, 1000, 200), 1);
        assert_eq!(chain.register(id, Some(id), 1150, 200), 2);
        assert_eq!(chain.register(id, Some(id), 1300, 200), 3);
    }

    #[test]
    fn test_slow_click_restarts_chain() {
        let id = ShapeId::new();
        let mut chain = ClickChain::default();
        chain.register(id, None, 0, 200);
        assert_eq!(chain.register(id, Some(id), 150, 200), 2);
        // Exactly on the window boundary is too slow.
        assert_eq!(chain.register(id, Some(id), 350, 200), 1);
        assert_eq!(chain.register(id, Some(id), 400, 200), 2);
    }

    #[test]
    fn test_other_shape_restarts_chain() {
        let a = ShapeId::new();
        let b = ShapeId::new();
        let mut chain = ClickChain::default();
        chain.register(a, None, 0, 200);
        chain.register(a, Some(a), 50, 200);
        assert_eq!(chain.register(b, Some(a), 100, 200), 1);
        chain.reset();
        assert_eq!(chain.count(), 0);
    }

    #[test]
    fn test_state_accessors() {
        let id = ShapeId::new();
        let state = InteractionState::Dragging {
            id,
            offset: Point::default(),
        };
        assert_eq!(state.active_id(), Some(id));
        assert!(state.is_dragging());
        assert_eq!(InteractionState::Placing(ShapeKind::Square).placing(), Some(ShapeKind::Square));
        assert_eq!(InteractionState::Idle.active_id(), None);
        assert_eq!(state.name(), "dragging");
        assert_eq!(InteractionState::Idle.name(), "idle");
    }
}
