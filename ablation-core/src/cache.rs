//! Region caching with a background/active split.
//!
//! While one shape is being transformed the parity of all other shapes is
//! fixed, so it is computed once into a background region and the active
//! shape is XORed over it on every update.
//!
//! Invalidation rules:
//! - structural change (add, remove, active identity change): drop both
//!   the full region and the background;
//! - transform-only change of the active shape: drop the full region only;
//! - end of an interaction: drop the full region and demand a full
//!   recompute on the next read.

use crate::{Compositor, Region, Shape, ShapeId};

/// How the next region read must be produced.
///
/// Ordered by strength: a pending full recompute is never downgraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Recompute {
    /// XOR the active shape over the background.
    Incremental,
    /// Scan every shape over the whole surface.
    Full,
}

/// Cached derived rasters. Field clearing is the only invalidation.
#[derive(Debug, Clone, Default)]
pub struct CacheState {
    /// Region over all shapes.
    pub full: Option<Region>,
    /// Region over all shapes except `background_owner`.
    pub background: Option<Region>,
    /// The shape the background was computed without.
    pub background_owner: Option<ShapeId>,
}

/// Counters describing which path produced each region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads answered by the cached full region.
    pub cache_hits: u64,
    /// Regions produced by a full scan.
    pub full_recomputes: u64,
    /// Regions produced by the incremental XOR path.
    pub incremental_updates: u64,
    /// Background regions computed.
    pub background_builds: u64,
}

/// Owns the region buffers of one engine and decides how to refresh them.
#[derive(Debug, Clone)]
pub struct CacheManager {
    compositor: Compositor,
    state: CacheState,
    pending: Option<Recompute>,
    incremental: bool,
    stats: CacheStats,
}

impl CacheManager {
    /// Create a cache for a `size`x`size` surface.
    ///
    /// With `incremental` off every refresh is a full scan.
    #[must_use]
    pub fn new(size: u32, incremental: bool) -> Self {
        Self {
            compositor: Compositor::new(size),
            state: CacheState::default(),
            pending: Some(Recompute::Full),
            incremental,
            stats: CacheStats::default(),
        }
    }

    /// The shape set or the active shape changed.
    pub fn invalidate_structure(&mut self) {
        tracing::trace!("Structural invalidation");
        self.state = CacheState::default();
        self.pending = Some(Recompute::Full);
    }

    /// Only the active shape's transform changed.
    pub fn invalidate_transform(&mut self) {
        self.state.full = None;
        self.pending = self.pending.max(Some(Recompute::Incremental));
    }

    /// An interaction ended; the next read is a full scan.
    pub fn force_full(&mut self) {
        self.state.full = None;
        self.pending = Some(Recompute::Full);
    }

    /// The recompute the next read will perform, if any.
    #[must_use]
    pub fn pending(&self) -> Option<Recompute> {
        self.pending
    }

    /// Current region, recomputing it if invalid.
    ///
    /// `active` is the shape under manipulation; it must be an element of
    /// `shapes`.
    pub fn region(&mut self, shapes: &[Shape], active: Option<&Shape>) -> &Region {
        let region = match self.state.full.take() {
            Some(cached) => {
                self.stats.cache_hits += 1;
                cached
            }
            None => self.rebuild(shapes, active),
        };
        self.pending = None;
        self.state.full.insert(region)
    }

    /// The cached full region, without recomputing.
    #[must_use]
    pub fn cached(&self) -> Option<&Region> {
        self.state.full.as_ref()
    }

    /// Raw cache state.
    #[must_use]
    pub fn state(&self) -> &CacheState {
        &self.state
    }

    /// Path counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn rebuild(&mut self, shapes: &[Shape], active: Option<&Shape>) -> Region {
        let mode = self.pending.unwrap_or(Recompute::Full);
        match (mode, active) {
            (Recompute::Incremental, Some(active)) if self.incremental => {
                if self.state.background.is_none()
                    || self.state.background_owner != Some(active.id)
                {
                    tracing::trace!(shape = %active.id, "Building background cache");
                    self.state.background =
                        Some(self.compositor.compute_background(shapes, active.id));
                    self.state.background_owner = Some(active.id);
                    self.stats.background_builds += 1;
                }
                self.stats.incremental_updates += 1;
                self.compositor
                    .xor_update(self.state.background.as_ref(), shapes, active)
            }
            _ => {
                self.stats.full_recomputes += 1;
                self.compositor.compute_region(shapes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::ShapeKind;

    fn scene() -> Vec<Shape> {
        vec![
            Shape::new(ShapeKind::Circle, Point::new(80.0, 80.0)),
            Shape::new(ShapeKind::Square, Point::new(110.0, 90.0)),
        ]
    }

    #[test]
    fn test_first_read_is_full_then_cached() {
        let shapes = scene();
        let mut cache = CacheManager::new(200, true);
        let _ = cache.region(&shapes, None);
        let _ = cache.region(&shapes, None);

        let stats = cache.stats();
        assert_eq!(stats.full_recomputes, 1);
        assert_eq!(stats.cache_hits, 1);
        assert!(cache.pending().is_none());
    }

    #[test]
    fn test_transform_keeps_background() {
        let mut shapes = scene();
        let mut cache = CacheManager::new(200, true);
        let _ = cache.region(&shapes, None);

        shapes[1].center = Point::new(120.0, 90.0);
        cache.invalidate_transform();
        let _ = cache.region(&shapes, Some(&shapes[1]));

        shapes[1].center = Point::new(130.0, 90.0);
        cache.invalidate_transform();
        let region = cache.region(&shapes, Some(&shapes[1])).clone();

        let stats = cache.stats();
        assert_eq!(stats.background_builds, 1);
        assert_eq!(stats.incremental_updates, 2);
        assert_eq!(cache.state().background_owner, Some(shapes[1].id));
        assert_eq!(region, Compositor::new(200).compute_region(&shapes));
    }

    #[test]
    fn test_structure_drops_background() {
        let shapes = scene();
        let mut cache = CacheManager::new(200, true);
        let _ = cache.region(&shapes, None);
        cache.invalidate_transform();
        let _ = cache.region(&shapes, Some(&shapes[0]));
        assert!(cache.state().background.is_some());

        cache.invalidate_structure();
        assert!(cache.state().background.is_none());
        assert!(cache.state().background_owner.is_none());
        assert!(cache.cached().is_none());
        assert_eq!(cache.pending(), Some(Recompute::Full));
    }

    #[test]
    fn test_force_full_not_downgraded() {
        let shapes = scene();
        let mut cache = CacheManager::new(200, true);
        let _ = cache.region(&shapes, None);

        cache.force_full();
        cache.invalidate_transform();
        assert_eq!(cache.pending(), Some(Recompute::Full));
        let _ = cache.region(&shapes, Some(&shapes[0]));
        assert_eq!(cache.stats().incremental_updates, 0);
        assert_eq!(cache.stats().full_recomputes, 2);
    }

    #[test]
    fn test_non_incremental_always_full() {
        let shapes = scene();
        let mut cache = CacheManager::new(200, false);
        let _ = cache.region(&shapes, None);
        cache.invalidate_transform();
        let _ = cache.region(&shapes, Some(&shapes[0]));
        assert_eq!(cache.stats().incremental_updates, 0);
        assert_eq!(cache.stats().background_builds, 0);
        assert_eq!(cache.stats().full_recomputes, 2);
    }
}
