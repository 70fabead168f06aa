//! Parity compositor: turns a shape list into an even-odd region.
//!
//! A pixel is lit when an odd number of shapes contain it, so two
//! overlapping shapes cancel inside their intersection and only the
//! symmetric difference stays lit.

use std::time::Instant;

use crate::{Region, Shape, ShapeId};

/// Stateless region builder for a fixed surface size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compositor {
    size: u32,
}

impl Compositor {
    /// Create a compositor for a `size`x`size` surface.
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    /// Side length of produced regions.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of shapes containing the pixel `(x, y)`.
    #[must_use]
    pub fn overlap_count(shapes: &[Shape], x: u32, y: u32) -> usize {
        let (px, py) = (f64::from(x), f64::from(y));
        shapes.iter().filter(|s| s.contains_point(px, py)).count()
    }

    /// Full-surface parity region of `shapes`. Cost is O(W*H*N).
    #[must_use]
    pub fn compute_region(&self, shapes: &[Shape]) -> Region {
        self.compute_filtered(shapes, None)
    }

    /// Parity region of every shape except `excluded`.
    #[must_use]
    pub fn compute_background(&self, shapes: &[Shape], excluded: ShapeId) -> Region {
        self.compute_filtered(shapes, Some(excluded))
    }

    /// Combine a background region with the active shape by XOR.
    ///
    /// Only pixels inside the active shape's bounding box are tested; the
    /// rest are copied from the background. Without a usable background the
    /// whole region is recomputed from `shapes`, which must then include
    /// `active`.
    #[must_use]
    pub fn xor_update(
        &self,
        background: Option<&Region>,
        shapes: &[Shape],
        active: &Shape,
    ) -> Region {
        let Some(background) = background.filter(|b| b.size() == self.size) else {
            tracing::debug!("No background cache, falling back to full recompute");
            return self.compute_region(shapes);
        };

        let started = Instant::now();
        let mut region = background.clone();
        if let Some(bounds) = active.pixel_bounds(self.size) {
            for y in bounds.min_y..=bounds.max_y {
                for x in bounds.min_x..=bounds.max_x {
                    let inside = active.contains_point(f64::from(x), f64::from(y));
                    region.set(x, y, inside != background.is_lit(x, y));
                }
            }
        }
        tracing::trace!(
            shape = %active.id,
            elapsed = ?started.elapsed(),
            "Incremental XOR update"
        );
        region
    }

    fn compute_filtered(&self, shapes: &[Shape], excluded: Option<ShapeId>) -> Region {
        let started = Instant::now();
        let counted: Vec<&Shape> = shapes
            .iter()
            .filter(|s| Some(s.id) != excluded)
            .collect();

        let region = Region::from_fn(self.size, |x, y| {
            let (px, py) = (f64::from(x), f64::from(y));
            let hits = counted.iter().filter(|s| s.contains_point(px, py)).count();
            hits % 2 == 1
        });

        tracing::trace!(
            shapes = counted.len(),
            elapsed = ?started.elapsed(),
            "Full parity recompute"
        );
        region
    }
}
