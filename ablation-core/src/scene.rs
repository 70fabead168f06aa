//! Ordered shape collection. Insertion order is paint order and hit-test
//! priority: later shapes are on top.

use crate::geometry::Point;
use crate::{EngineError, EngineResult, Shape, ShapeId};

/// All placed shapes of one engine, bottom to top.
#[derive(Debug, Clone, Default)]
pub struct ShapeList {
    shapes: Vec<Shape>,
}

impl ShapeList {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top of all others.
    pub fn push(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id;
        self.shapes.push(shape);
        id
    }

    /// Remove a shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is not found.
    pub fn remove(&mut self, id: ShapeId) -> EngineResult<Shape> {
        let index = self.index_of(id).ok_or(EngineError::ShapeNotFound(id))?;
        Ok(self.shapes.remove(index))
    }

    /// Get a shape by ID.
    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// Move a shape to the top of the paint order.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is not found.
    pub fn raise(&mut self, id: ShapeId) -> EngineResult<()> {
        let index = self.index_of(id).ok_or(EngineError::ShapeNotFound(id))?;
        let shape = self.shapes.remove(index);
        self.shapes.push(shape);
        Ok(())
    }

    /// Find the topmost shape containing `point`.
    #[must_use]
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.contains_point(point.x, point.y))
            .map(|s| s.id)
    }

    /// Hit-test `point` and raise the hit shape to the top.
    pub fn pick(&mut self, point: Point) -> Option<ShapeId> {
        let id = self.shape_at(point)?;
        // The id came from this collection a moment ago.
        self.raise(id).ok()?;
        Some(id)
    }

    /// Shapes in paint order.
    #[must_use]
    pub fn as_slice(&self) -> &[Shape] {
        &self.shapes
    }

    /// Iterate shapes in paint order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Number of shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Remove all shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }
}
