//! Two independent engines behind one mode switch.

use serde::{Deserialize, Serialize};

use crate::{AblationEngine, EngineConfig, EngineError, EngineResult};

/// Which engine receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Free placement with clamping.
    #[default]
    Explore,
    /// Grid-snapped placement.
    Challenge,
}

impl Mode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Explore => Self::Challenge,
            Self::Challenge => Self::Explore,
        }
    }
}

/// An explore engine and a challenge engine, each with its own shapes and
/// caches.
#[derive(Debug, Clone)]
pub struct Session {
    explore: AblationEngine,
    challenge: AblationEngine,
    mode: Mode,
}

impl Session {
    /// Create both engines for a `surface_size` surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration is invalid.
    pub fn new(surface_size: u32) -> EngineResult<Self> {
        Self::from_configs(
            EngineConfig::free().with_surface_size(surface_size),
            EngineConfig::grid().with_surface_size(surface_size),
        )
    }

    /// Create both engines from explicit configurations.
    ///
    /// # Errors
    ///
    /// Returns an error if either configuration is invalid, or if the
    /// challenge configuration has no grid.
    pub fn from_configs(explore: EngineConfig, challenge: EngineConfig) -> EngineResult<Self> {
        if challenge.grid_pitch.is_none() {
            return Err(EngineError::InvalidConfig(
                "challenge mode requires a grid pitch".to_string(),
            ));
        }
        Ok(Self {
            explore: AblationEngine::new(explore)?,
            challenge: AblationEngine::new(challenge)?,
            mode: Mode::Explore,
        })
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch the engine receiving input. Shapes of both modes are kept.
    pub fn switch_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::info!(?mode, "Switched mode");
        }
        self.mode = mode;
    }

    /// The engine of the current mode.
    #[must_use]
    pub fn current(&self) -> &AblationEngine {
        self.engine(self.mode)
    }

    /// Mutable access to the engine of the current mode.
    pub fn current_mut(&mut self) -> &mut AblationEngine {
        match self.mode {
            Mode::Explore => &mut self.explore,
            Mode::Challenge => &mut self.challenge,
        }
    }

    /// The engine of a given mode.
    #[must_use]
    pub fn engine(&self, mode: Mode) -> &AblationEngine {
        match mode {
            Mode::Explore => &self.explore,
            Mode::Challenge => &self.challenge,
        }
    }

    /// Clear the current mode's shapes.
    pub fn clear_current(&mut self) {
        tracing::info!(mode = ?self.mode, "Clearing shapes");
        self.current_mut().clear_shapes();
    }

    /// Clear both modes.
    pub fn clear_all(&mut self) {
        tracing::info!("Clearing shapes in all modes");
        self.explore.clear_shapes();
        self.challenge.clear_shapes();
    }
}
