//! The ablation engine: one surface, its shapes, caches and interaction
//! state.
//!
//! Every intent runs to completion and leaves the caches invalidated
//! according to what it changed; the region itself is recomputed lazily on
//! the next [`AblationEngine::region`] read.

use crate::geometry::{clamp, snap_within, Point};
use crate::interaction::{ClickChain, InteractionState, Press};
use crate::{
    CacheManager, CacheStats, EngineConfig, EngineError, EngineResult, Intent, Region, Shape,
    ShapeId, ShapeKind, ShapeList,
};

/// Result of a click on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// A shape was hit; it is now active and on top.
    Selected(ShapeId),
    /// The click completed a triple-click and the shape was removed.
    Deleted(ShapeId),
    /// Nothing was hit; no shape is active.
    Missed,
}

/// An independent shape surface with its own caches.
#[derive(Debug, Clone)]
pub struct AblationEngine {
    config: EngineConfig,
    shapes: ShapeList,
    cache: CacheManager,
    state: InteractionState,
    clicks: ClickChain,
}

impl Default for AblationEngine {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

impl AblationEngine {
    /// Create an engine for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            cache: CacheManager::new(config.surface_size, config.incremental),
            config,
            shapes: ShapeList::new(),
            state: InteractionState::Idle,
            clicks: ClickChain::default(),
        }
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether placement snaps to a grid.
    #[must_use]
    pub fn is_grid_mode(&self) -> bool {
        self.config.grid_pitch.is_some()
    }

    /// Shapes in paint order, bottom first.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        self.shapes.as_slice()
    }

    /// Current interaction state.
    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// The active shape, for highlight rendering.
    #[must_use]
    pub fn active_shape(&self) -> Option<&Shape> {
        self.state.active_id().and_then(|id| self.shapes.get(id))
    }

    /// Cache path counters.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Cache internals, read-only.
    #[must_use]
    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// The composited region, recomputed if any intent invalidated it.
    pub fn region(&mut self) -> &Region {
        let active = self.state.active_id().and_then(|id| self.shapes.get(id));
        self.cache.region(self.shapes.as_slice(), active)
    }

    /// Choose the kind of the next shape to place. Deselects the active shape.
    pub fn select_shape_type(&mut self, kind: ShapeKind) {
        if self.state.active_id().is_some() {
            self.cache.invalidate_structure();
        }
        self.state = InteractionState::Placing(kind);
        tracing::debug!(%kind, state = self.state.name(), "Shape type selected");
    }

    /// Place the pending shape type at `at`. Returns `None` when no type is
    /// pending.
    pub fn create_shape_at(&mut self, at: Point) -> Option<ShapeId> {
        let kind = self.state.placing()?;
        Some(self.create_shape(kind, at))
    }

    /// Place a shape of `kind` near `at` and make it active.
    ///
    /// The center is snapped in grid mode, otherwise clamped so the shape's
    /// default radius stays on the surface.
    pub fn create_shape(&mut self, kind: ShapeKind, at: Point) -> ShapeId {
        let center = self.position_for(kind.default_radius(), at);
        let id = self.shapes.push(Shape::new(kind, center));
        self.state = InteractionState::Active { id, press: None };
        self.clicks.reset();
        self.cache.invalidate_structure();
        tracing::debug!(
            shape = %id,
            %kind,
            x = center.x,
            y = center.y,
            "Shape created"
        );
        id
    }

    /// Handle a primary click at `at`.
    ///
    /// Hits the topmost shape, raises it and makes it active with a drag
    /// candidate armed. The third quick click in a row on the active shape
    /// deletes it instead.
    pub fn select_at(&mut self, at: Point, timestamp_ms: u64) -> SelectOutcome {
        let previous = self.state.active_id();

        let Some(id) = self.shapes.pick(at) else {
            self.state = InteractionState::Idle;
            self.clicks.reset();
            if previous.is_some() {
                self.cache.invalidate_structure();
            }
            return SelectOutcome::Missed;
        };

        let count =
            self.clicks
                .register(id, previous, timestamp_ms, self.config.triple_click_window_ms);
        if count >= ClickChain::DELETE_COUNT {
            self.remove_shape(id);
            return SelectOutcome::Deleted(id);
        }

        let center = self.shapes.get(id).map_or(at, |s| s.center);
        self.state = InteractionState::Active {
            id,
            press: Some(Press {
                origin: at,
                offset: Point::new(at.x - center.x, at.y - center.y),
            }),
        };
        if previous != Some(id) {
            self.cache.invalidate_structure();
            tracing::debug!(shape = %id, state = self.state.name(), "Shape selected");
        }
        SelectOutcome::Selected(id)
    }

    /// Pointer motion while the primary button is held.
    ///
    /// Promotes an armed press to a drag once it travels past the threshold
    /// on either axis, then follows the pointer. Returns whether a shape
    /// moved.
    pub fn pointer_moved(&mut self, at: Point) -> bool {
        if let InteractionState::Active {
            id,
            press: Some(press),
        } = self.state
        {
            let dx = at.x - press.origin.x;
            let dy = at.y - press.origin.y;
            let threshold = self.config.drag_threshold;
            if dx.abs() <= threshold && dy.abs() <= threshold {
                return false;
            }
            self.state = InteractionState::Dragging {
                id,
                offset: press.offset,
            };
            tracing::debug!(shape = %id, state = self.state.name(), "Drag started");
        }
        self.drag_to(at)
    }

    /// Start dragging the active shape, grabbing it at `at`. Skips the
    /// threshold. Returns `false` when no shape is active.
    pub fn start_drag(&mut self, at: Point) -> bool {
        let Some(shape) = self.active_shape() else {
            return false;
        };
        let (id, center) = (shape.id, shape.center);
        self.state = InteractionState::Dragging {
            id,
            offset: Point::new(at.x - center.x, at.y - center.y),
        };
        true
    }

    /// Move the dragged shape so its grab point follows `at`.
    pub fn drag_to(&mut self, at: Point) -> bool {
        let InteractionState::Dragging { id, offset } = self.state else {
            return false;
        };
        self.reposition(id, Point::new(at.x - offset.x, at.y - offset.y))
    }

    /// Finish a drag and demand a full recompute. A pending drag candidate
    /// is disarmed. Returns whether a drag was in progress.
    pub fn end_drag(&mut self) -> bool {
        match self.state {
            InteractionState::Dragging { id, .. } => {
                self.state = InteractionState::Active { id, press: None };
                self.cache.force_full();
                tracing::debug!(shape = %id, state = self.state.name(), "Drag ended");
                true
            }
            InteractionState::Active { id, press: Some(_) } => {
                self.state = InteractionState::Active { id, press: None };
                false
            }
            _ => false,
        }
    }

    /// Rotate the active shape by its kind's step.
    pub fn rotate_active(&mut self) -> bool {
        let Some(id) = self.state.active_id() else {
            return false;
        };
        let rotated = self.shapes.get_mut(id).is_some_and(Shape::rotate_step);
        if rotated {
            self.cache.invalidate_transform();
        }
        rotated
    }

    /// Step the active shape's size ladder. Changes that would leave the
    /// surface are refused.
    pub fn resize_active(&mut self, direction: i32) -> bool {
        let Some(id) = self.state.active_id() else {
            return false;
        };
        let size = self.config.size_f64();
        let resized = self
            .shapes
            .get_mut(id)
            .is_some_and(|s| s.resize_step(direction, size));
        if resized {
            self.cache.invalidate_transform();
        }
        resized
    }

    /// Move the active shape by a delta, clamped or snapped like a drag.
    pub fn move_active(&mut self, dx: f64, dy: f64) -> bool {
        let Some(shape) = self.active_shape() else {
            return false;
        };
        let (id, target) = (shape.id, shape.center.offset(dx, dy));
        self.reposition(id, target)
    }

    /// Delete the active shape.
    pub fn delete_active(&mut self) -> bool {
        match self.state.active_id() {
            Some(id) => {
                self.remove_shape(id);
                true
            }
            None => false,
        }
    }

    /// Remove every shape and reset the interaction.
    pub fn clear_shapes(&mut self) {
        self.shapes.clear();
        self.state = InteractionState::Idle;
        self.clicks.reset();
        self.cache.invalidate_structure();
        tracing::debug!("Shapes cleared");
    }

    /// Execute one intent. Returns whether anything changed.
    pub fn apply(&mut self, intent: &Intent) -> bool {
        match intent {
            Intent::SelectShapeType { kind } => {
                self.select_shape_type(*kind);
                true
            }
            Intent::CreateShapeAt { at } => self.create_shape_at(*at).is_some(),
            Intent::SelectAt { at, timestamp_ms } => {
                self.select_at(*at, *timestamp_ms) != SelectOutcome::Missed
            }
            Intent::StartDrag { at } => self.start_drag(*at),
            Intent::DragTo { at } => self.drag_to(*at),
            Intent::EndDrag => self.end_drag(),
            Intent::RotateActive => self.rotate_active(),
            Intent::ResizeActive { direction } => self.resize_active(*direction),
            Intent::MoveActive { dx, dy } => self.move_active(*dx, *dy),
            Intent::DeleteActive => self.delete_active(),
            Intent::ClearShapes => {
                self.clear_shapes();
                true
            }
        }
    }

    /// Execute one intent, reporting intents that need an active shape when
    /// there is none.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoActiveShape`] for such intents.
    pub fn try_apply(&mut self, intent: &Intent) -> EngineResult<bool> {
        if intent.targets_active() && self.state.active_id().is_none() {
            return Err(EngineError::NoActiveShape);
        }
        Ok(self.apply(intent))
    }

    fn remove_shape(&mut self, id: ShapeId) {
        if let Err(e) = self.shapes.remove(id) {
            tracing::warn!("Failed to remove shape: {e}");
        }
        if self.state.active_id() == Some(id) {
            self.state = InteractionState::Idle;
        }
        self.clicks.reset();
        self.cache.invalidate_structure();
        tracing::debug!(shape = %id, "Shape deleted");
    }

    fn reposition(&mut self, id: ShapeId, target: Point) -> bool {
        let Some(radius) = self.shapes.get(id).map(Shape::radius) else {
            return false;
        };
        let center = self.position_for(radius, target);
        let Some(shape) = self.shapes.get_mut(id) else {
            return false;
        };
        if shape.center == center {
            return false;
        }
        shape.center = center;
        self.cache.invalidate_transform();
        true
    }

    fn position_for(&self, radius: f64, at: Point) -> Point {
        let size = self.config.size_f64();
        match self.config.grid_pitch {
            Some(pitch) => Point::new(
                snap_within(at.x, pitch, radius, size),
                snap_within(at.y, pitch, radius, size),
            ),
            None => Point::new(
                clamp(at.x, radius, size - radius),
                clamp(at.y, radius, size - radius),
            ),
        }
    }
}
