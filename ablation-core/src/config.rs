//! Engine configuration and fixed ladders.

use serde::{Deserialize, Serialize};

use crate::{EngineError, EngineResult};

/// Default side length of the square surface, in pixels.
pub const SURFACE_SIZE: u32 = 600;

/// Number of grid cells per side in grid mode.
pub const GRID_DIVISIONS: u32 = 30;

/// Pixels per size unit.
pub const UNIT_PX: f64 = 20.0;

/// Discrete size ladder for circles and squares, in units.
pub const SIZE_LEVELS: [u32; 4] = [2, 4, 6, 8];

/// Size level given to newly created circles and squares.
pub const DEFAULT_SIZE_LEVEL: u32 = 4;

/// Scale ladder for triangles.
pub const SCALE_VALUES: [f64; 5] = [0.5, 0.75, 1.0, 1.5, 2.0];

/// Base size of newly created triangles, in pixels.
pub const DEFAULT_TRIANGLE_SIZE: f64 = 60.0;

/// Configuration for a single engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Side length of the square surface in pixels.
    pub surface_size: u32,
    /// Grid pitch in pixels. `None` selects free (clamped) placement.
    pub grid_pitch: Option<f64>,
    /// Per-axis pointer travel before a press becomes a drag.
    pub drag_threshold: f64,
    /// Arrow-key step in free mode. Grid mode steps by the pitch.
    pub move_step: f64,
    /// Maximum gap between consecutive clicks of a triple-click.
    pub triple_click_window_ms: u64,
    /// Serve transform-only changes through the incremental XOR path.
    pub incremental: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::free()
    }
}

impl EngineConfig {
    /// Free placement: shapes are clamped inside the surface.
    #[must_use]
    pub fn free() -> Self {
        Self {
            surface_size: SURFACE_SIZE,
            grid_pitch: None,
            drag_threshold: 5.0,
            move_step: 20.0,
            triple_click_window_ms: 200,
            incremental: true,
        }
    }

    /// Grid placement: shapes snap to a 30x30 grid.
    #[must_use]
    pub fn grid() -> Self {
        Self {
            grid_pitch: Some(f64::from(SURFACE_SIZE) / f64::from(GRID_DIVISIONS)),
            ..Self::free()
        }
    }

    /// Set the surface size, keeping a grid at the same number of divisions.
    #[must_use]
    pub fn with_surface_size(mut self, size: u32) -> Self {
        if self.grid_pitch.is_some() {
            self.grid_pitch = Some(f64::from(size) / f64::from(GRID_DIVISIONS));
        }
        self.surface_size = size;
        self
    }

    /// Enable or disable the incremental XOR path.
    #[must_use]
    pub fn with_incremental(mut self, incremental: bool) -> Self {
        self.incremental = incremental;
        self
    }

    /// Surface size as a float, for geometry.
    #[must_use]
    pub fn size_f64(&self) -> f64 {
        f64::from(self.surface_size)
    }

    /// Step used by directional moves.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.grid_pitch.unwrap_or(self.move_step)
    }

    /// Check that the configuration describes a usable surface.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] for a zero-sized surface or a
    /// non-positive pitch, threshold or step.
    pub fn validate(&self) -> EngineResult<()> {
        if self.surface_size == 0 {
            return Err(EngineError::InvalidConfig(
                "surface_size must be positive".to_string(),
            ));
        }
        if let Some(pitch) = self.grid_pitch {
            if !pitch.is_finite() || pitch <= 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "grid_pitch must be positive, got {pitch}"
                )));
            }
        }
        if !self.drag_threshold.is_finite() || self.drag_threshold <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "drag_threshold must be positive, got {}",
                self.drag_threshold
            )));
        }
        if !self.move_step.is_finite() || self.move_step <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "move_step must be positive, got {}",
                self.move_step
            )));
        }
        Ok(())
    }
}
