//! # Stacked Ablation Desktop
//!
//! Native desktop host for the ablation engine. Shows the rendered frame
//! in a minifb framebuffer window and feeds mouse, wheel and keyboard input
//! back into the engine.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p ablation-desktop
//! ```
//!
//! ## Headless script replay:
//!
//! ```bash
//! cargo run -p ablation-desktop -- --script demo.json --export frame.png
//! ```
//!
//! ## Controls
//!
//! | Input | Action |
//! |-------|--------|
//! | `1` / `2` / `3` | Place next: circle / square / triangle |
//! | Left click | Place pending shape, select, drag; triple-click deletes |
//! | Right click | Rotate the active shape |
//! | Wheel | Resize the active shape |
//! | Arrows | Move the active shape |
//! | `Delete` | Delete the active shape |
//! | `M` | Toggle explore / challenge mode |
//! | `C` | Clear the current mode |
//! | `Esc` | Quit |
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `DesktopConfig` - Surface, mode, script and window settings
//! - `PointerTracker` - Turns polled window state into engine input events
//! - `AblationDesktopApp` - Window loop on top of a [`Session`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod app;
mod input;
mod script;

pub use app::AblationDesktopApp;
pub use input::{InputSnapshot, PointerTracker};
pub use script::{load_script, run_script, ScriptReport};

use std::path::PathBuf;

use ablation_core::config::{GRID_DIVISIONS, SURFACE_SIZE};
use ablation_core::{EngineConfig, EngineResult, Mode, Session};
use ablation_renderer::RendererConfig;
use clap::{Parser, ValueEnum};

/// Mode selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StartMode {
    /// Free placement.
    #[default]
    Explore,
    /// Grid-snapped placement.
    Challenge,
}

impl From<StartMode> for Mode {
    fn from(mode: StartMode) -> Self {
        match mode {
            StartMode::Explore => Mode::Explore,
            StartMode::Challenge => Mode::Challenge,
        }
    }
}

/// Integer window magnification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WindowScale {
    /// One window pixel per surface pixel.
    #[default]
    #[value(name = "1")]
    X1,
    /// Two window pixels per surface pixel.
    #[value(name = "2")]
    X2,
    /// Four window pixels per surface pixel.
    #[value(name = "4")]
    X4,
}

/// Command-line arguments for ablation-desktop.
#[derive(Debug, Clone, Parser)]
#[command(name = "ablation-desktop")]
#[command(about = "Stacked ablation: even-odd shape overlap explorer")]
#[command(version)]
pub struct CliArgs {
    /// Surface side length in pixels
    #[arg(long, env = "ABLATION_SURFACE_SIZE", default_value_t = SURFACE_SIZE)]
    pub size: u32,

    /// Mode to start in
    #[arg(long, value_enum, env = "ABLATION_MODE", default_value_t = StartMode::Explore)]
    pub mode: StartMode,

    /// Grid divisions per side in challenge mode
    #[arg(long, env = "ABLATION_GRID_DIVISIONS", default_value_t = GRID_DIVISIONS)]
    pub grid_divisions: u32,

    /// Serve every change with a full recompute
    #[arg(long)]
    pub no_incremental: bool,

    /// Replay a JSON intent script without opening a window
    #[arg(long, env = "ABLATION_SCRIPT")]
    pub script: Option<PathBuf>,

    /// Write the final frame of a script replay as PNG
    #[arg(long, requires = "script")]
    pub export: Option<PathBuf>,

    /// Window scale factor
    #[arg(long, value_enum, default_value_t = WindowScale::X1)]
    pub scale: WindowScale,
}

/// Desktop application configuration.
#[derive(Debug, Clone)]
pub struct DesktopConfig {
    /// Surface side length in pixels.
    pub surface_size: u32,
    /// Grid divisions per side in challenge mode.
    pub grid_divisions: u32,
    /// Mode receiving input at startup.
    pub mode: Mode,
    /// Use the incremental XOR path for transform-only changes.
    pub incremental: bool,
    /// Intent script to replay headlessly.
    pub script: Option<PathBuf>,
    /// PNG path for the final frame of a script replay.
    pub export: Option<PathBuf>,
    /// Window magnification.
    pub scale: WindowScale,
    /// Window title.
    pub title: String,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopConfig {
    /// Create a new desktop configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface_size: SURFACE_SIZE,
            grid_divisions: GRID_DIVISIONS,
            mode: Mode::Explore,
            incremental: true,
            script: None,
            export: None,
            scale: WindowScale::X1,
            title: "Stacked Ablation".to_string(),
        }
    }

    /// Engine configurations for explore and challenge mode.
    #[must_use]
    pub fn engine_configs(&self) -> (EngineConfig, EngineConfig) {
        let explore = EngineConfig::free()
            .with_surface_size(self.surface_size)
            .with_incremental(self.incremental);
        let challenge = EngineConfig {
            grid_pitch: Some(f64::from(self.surface_size) / f64::from(self.grid_divisions)),
            ..explore.clone()
        };
        (explore, challenge)
    }

    /// Frame settings for the window and PNG export: the default palette
    /// over an opaque black background.
    #[must_use]
    pub fn renderer_config(&self) -> RendererConfig {
        RendererConfig::default().with_background([0, 0, 0, 255])
    }

    /// Build a session in the configured start mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface size or grid divisions are invalid.
    pub fn session(&self) -> EngineResult<Session> {
        let (explore, challenge) = self.engine_configs();
        let mut session = Session::from_configs(explore, challenge)?;
        session.switch_mode(self.mode);
        Ok(session)
    }
}

impl From<CliArgs> for DesktopConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            surface_size: args.size,
            grid_divisions: args.grid_divisions,
            mode: args.mode.into(),
            incremental: !args.no_incremental,
            script: args.script,
            export: args.export,
            scale: args.scale,
            ..Self::new()
        }
    }
}
